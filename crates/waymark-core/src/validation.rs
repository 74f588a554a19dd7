//! # Validation Module
//!
//! Input validation for location drafts and edits.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form input (shell command / web form)                        │
//! │  └── Raw strings collected into a LocationDraft                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── name present, coordinates parse as finite numbers                 │
//! │  └── category inside the closed enumeration                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Persistence target (local snapshot / hosted table)           │
//! │  └── Only ever sees a NewLocation                                      │
//! │                                                                         │
//! │  A draft that fails here never reaches a persistence call.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::{non_empty, Category, LocationDraft, LocationPatch, NewLocation};
use crate::MAX_NAME_LENGTH;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a location name and returns it trimmed.
///
/// ## Example
/// ```rust
/// use waymark_core::validation::validate_name;
///
/// assert_eq!(validate_name("  Hollywood ").unwrap(), "Hollywood");
/// assert!(validate_name("   ").is_err());
/// ```
pub fn validate_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(name.to_string())
}

/// Validates a category typed into the form.
///
/// Empty input means [`Category::Other`]; anything else must be one of the
/// enumerated values.
pub fn validate_category_input(raw: &str) -> ValidationResult<Category> {
    if raw.trim().is_empty() {
        return Ok(Category::Other);
    }

    raw.parse().map_err(|_| ValidationError::NotAllowed {
        field: "category".to_string(),
        allowed: Category::allowed_values(),
    })
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Parses a coordinate typed as text.
///
/// ## Rules
/// - Must not be empty
/// - Must parse as a number
/// - Must be finite (`NaN`, `inf` rejected)
///
/// No range or geocoding checks are made; the map collaborator is trusted
/// with whatever finite value the user enters.
///
/// ## Example
/// ```rust
/// use waymark_core::validation::parse_coordinate;
///
/// assert_eq!(parse_coordinate("lat", " 34.05 ").unwrap(), 34.05);
/// assert!(parse_coordinate("lat", "north").is_err());
/// assert!(parse_coordinate("lng", "NaN").is_err());
/// ```
pub fn parse_coordinate(field: &str, raw: &str) -> ValidationResult<f64> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    let value: f64 = raw.parse().map_err(|_| ValidationError::NotANumber {
        field: field.to_string(),
        value: raw.to_string(),
    })?;

    validate_finite(field, value)
}

/// Rejects NaN and infinities.
pub fn validate_finite(field: &str, value: f64) -> ValidationResult<f64> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }
    Ok(value)
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates a whole draft.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  "Add location" form submitted                                          │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_draft(&draft) ← THIS FUNCTION                                 │
/// │       │                                                                 │
/// │       ├── name blank?          → Required { name }                      │
/// │       ├── lat/lng blank?       → Required { lat | lng }                 │
/// │       ├── lat/lng not numeric? → NotANumber                             │
/// │       ├── category unknown?    → NotAllowed                             │
/// │       │                                                                 │
/// │       └── OK → NewLocation handed to the persistence target            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_draft(draft: &LocationDraft) -> ValidationResult<NewLocation> {
    let name = validate_name(&draft.name)?;
    let lat = parse_coordinate("lat", &draft.lat)?;
    let lng = parse_coordinate("lng", &draft.lng)?;
    let category = validate_category_input(&draft.category)?;

    Ok(NewLocation {
        name,
        lat,
        lng,
        category,
        description: draft.description.trim().to_string(),
        image_url: draft.image_url.as_deref().and_then(non_empty),
        place_id: draft.place_id.as_deref().and_then(non_empty),
    })
}

/// Validates the fields a patch sets.
///
/// A patch may not blank out the name or set non-finite coordinates.
pub fn validate_patch(patch: &LocationPatch) -> ValidationResult<()> {
    if let Some(name) = &patch.name {
        validate_name(name)?;
    }
    if let Some(lat) = patch.lat {
        validate_finite("lat", lat)?;
    }
    if let Some(lng) = patch.lng {
        validate_finite("lng", lng)?;
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert_eq!(validate_name("Santa Monica").unwrap(), "Santa Monica");
        assert!(validate_name("").is_err());
        assert!(validate_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_parse_coordinate() {
        assert_eq!(parse_coordinate("lat", "1").unwrap(), 1.0);
        assert_eq!(parse_coordinate("lng", "-118.491191").unwrap(), -118.491191);

        assert_eq!(
            parse_coordinate("lat", "  "),
            Err(ValidationError::Required {
                field: "lat".to_string()
            })
        );
        assert!(matches!(
            parse_coordinate("lat", "12abc"),
            Err(ValidationError::NotANumber { .. })
        ));
        assert!(matches!(
            parse_coordinate("lng", "inf"),
            Err(ValidationError::NotFinite { .. })
        ));
    }

    #[test]
    fn test_validate_category_input() {
        assert_eq!(validate_category_input("").unwrap(), Category::Other);
        assert_eq!(validate_category_input("Nature").unwrap(), Category::Nature);
        assert!(matches!(
            validate_category_input("beach"),
            Err(ValidationError::NotAllowed { .. })
        ));
    }

    #[test]
    fn test_validate_draft_empty_name() {
        let draft = LocationDraft::new("", "1", "2");
        let err = validate_draft(&draft).unwrap_err();
        assert_eq!(err.field(), "name");
    }

    #[test]
    fn test_validate_draft_ok() {
        let draft = LocationDraft::new(" Getty Center ", "34.0780", "-118.4741")
            .with_category("museum")
            .with_image_url("")
            .with_place_id("ChIJ-getty");
        let new_location = validate_draft(&draft).unwrap();

        assert_eq!(new_location.name, "Getty Center");
        assert_eq!(new_location.category, Category::Museum);
        assert_eq!(new_location.image_url, None);
        assert_eq!(new_location.place_id.as_deref(), Some("ChIJ-getty"));
    }

    #[test]
    fn test_validate_patch() {
        assert!(validate_patch(&LocationPatch::default()).is_ok());

        let blank_name = LocationPatch {
            name: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(validate_patch(&blank_name).is_err());

        let bad_lat = LocationPatch {
            lat: Some(f64::NAN),
            ..Default::default()
        };
        assert!(validate_patch(&bad_lat).is_err());
    }
}
