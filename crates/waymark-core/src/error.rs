//! # Error Types
//!
//! Domain-specific error types for waymark-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  waymark-core errors (this file)                                        │
//! │  ├── CoreError        - General domain errors                           │
//! │  └── ValidationError  - Draft / patch validation failures               │
//! │                                                                         │
//! │  waymark-db errors (separate crate)                                     │
//! │  └── DbError          - Local storage failures                          │
//! │                                                                         │
//! │  waymark-remote errors (separate crate)                                 │
//! │  └── RemoteError      - Hosted table failures                           │
//! │                                                                         │
//! │  Shell errors (in app)                                                  │
//! │  └── AppError         - What the user sees                              │
//! │                                                                         │
//! │  Flow: ValidationError → StoreError → AppError → notification           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No location with this identifier is known.
    #[error("Location not found: {0}")]
    LocationNotFound(i64),

    /// A location with this identifier is already present.
    #[error("Location {0} already exists")]
    DuplicateLocation(i64),

    /// A category string outside the closed enumeration.
    ///
    /// ## When This Occurs
    /// - Parsing `"beach"` or `"entertainment"` (values seen in old data)
    /// - Typos typed into the category field
    #[error("Unknown category: '{0}'")]
    UnknownCategory(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These are raised before any persistence call is issued, so a failed
/// validation never touches the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// A coordinate that does not parse as a number.
    #[error("{field} must be a number, got '{value}'")]
    NotANumber { field: String, value: String },

    /// A coordinate that parses but is NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::NotANumber { field, .. }
            | ValidationError::NotFinite { field }
            | ValidationError::NotAllowed { field, .. } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
