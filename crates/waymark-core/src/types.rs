//! # Domain Types
//!
//! Core domain types used throughout Waymark.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ LocationDraft   │──►│  NewLocation    │──►│    Location     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  raw form text  │   │  validated      │   │  id assigned    │       │
//! │  │  name/lat/lng   │   │  f64 coords     │   │  by the store   │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │         ▲                                            ▲                  │
//! │  ┌──────┴──────────┐                        ┌───────┴─────────┐        │
//! │  │ PlaceCandidate  │                        │ LocationPatch   │        │
//! │  │ (places search) │                        │ (edit form)     │        │
//! │  └─────────────────┘                        └─────────────────┘        │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │    Category     │   │ CategoryFilter  │                              │
//! │  │  city, nature,  │   │  All            │                              │
//! │  │  restaurant ... │   │  Only(Category) │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifecycle
//! A draft is validated into a [`NewLocation`], the persistence target
//! assigns the identifier, and the result becomes a [`Location`] owned by
//! the [`LocationList`](crate::store::LocationList).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

// =============================================================================
// Location Id
// =============================================================================

/// Identifier of a location.
///
/// Integer-valued: the hosted table issues sequential ids and the local
/// store assigns `max + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct LocationId(i64);

impl LocationId {
    /// Wraps a raw identifier.
    #[inline]
    pub const fn new(id: i64) -> Self {
        LocationId(id)
    }

    /// Returns the raw identifier.
    #[inline]
    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LocationId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(LocationId)
    }
}

impl From<i64> for LocationId {
    fn from(id: i64) -> Self {
        LocationId(id)
    }
}

// =============================================================================
// Category
// =============================================================================

/// The closed set of location categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    City,
    Nature,
    Restaurant,
    Museum,
    Hotel,
    /// Fallback for drafts submitted without a category.
    #[default]
    Other,
}

impl Category {
    /// Every category, in the order the category picker lists them.
    pub const ALL: [Category; 6] = [
        Category::City,
        Category::Nature,
        Category::Restaurant,
        Category::Museum,
        Category::Hotel,
        Category::Other,
    ];

    /// Stored (lowercase) value of this category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::City => "city",
            Category::Nature => "nature",
            Category::Restaurant => "restaurant",
            Category::Museum => "museum",
            Category::Hotel => "hotel",
            Category::Other => "other",
        }
    }

    /// Maps any stored value onto the enumeration.
    ///
    /// Used at the load boundary, where rows written by older revisions may
    /// carry values like `"beach"`. Unknown or empty values become
    /// [`Category::Other`]; callers that want to reject them use `FromStr`.
    pub fn normalize(raw: &str) -> Category {
        raw.parse().unwrap_or(Category::Other)
    }

    /// Allowed values, for error messages.
    pub fn allowed_values() -> Vec<String> {
        Category::ALL.iter().map(|c| c.as_str().to_string()).collect()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == value)
            .ok_or_else(|| CoreError::UnknownCategory(s.trim().to_string()))
    }
}

// =============================================================================
// Category Filter
// =============================================================================

/// The category selector of the filter bar: `all` or exactly one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Returns true if a location passes this filter.
    #[inline]
    pub fn matches(&self, location: &Location) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => location.category == *category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("all"),
            CategoryFilter::Only(category) => category.fmt(f),
        }
    }
}

/// Parses a selector typed by the user.
///
/// Parsing is lenient: surrounding whitespace and letter case are ignored,
/// so `" NATURE "` reads as `nature`. Matching is not. [`matches`] compares
/// the parsed enum value with the stored category exactly.
///
/// [`matches`]: CategoryFilter::matches
impl FromStr for CategoryFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        filter.to_string()
    }
}

impl TryFrom<String> for CategoryFilter {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// =============================================================================
// Location
// =============================================================================

/// A named geographic point with category, description and media metadata.
///
/// Field names serialize in camelCase, matching the shape the map front-end
/// and the local snapshot have always used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    /// Unique identifier within the store.
    pub id: LocationId,

    /// Display name.
    pub name: String,

    /// Latitude in degrees (finite).
    pub lat: f64,

    /// Longitude in degrees (finite).
    pub lng: f64,

    pub category: Category,

    /// Free text, may be empty.
    #[serde(default)]
    pub description: String,

    /// Optional image shown in the detail panel.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    /// Optional reference into the external places service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,

    /// When the record was created (drives remote list order).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<String>")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Location {
    /// Coordinates as a `(lat, lng)` pair.
    #[inline]
    pub fn coordinates(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }

    /// Returns true if the name contains `needle` (already lowercased).
    pub(crate) fn name_contains_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
    }
}

// =============================================================================
// Drafts
// =============================================================================

/// Raw input of the "new location" form.
///
/// Coordinates stay text until validation: the form lets users type them,
/// and place search fills them in as strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LocationDraft {
    pub name: String,
    pub lat: String,
    pub lng: String,
    /// Empty means [`Category::Other`].
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub place_id: Option<String>,
}

impl LocationDraft {
    /// Creates a draft with the three required fields.
    pub fn new(name: impl Into<String>, lat: impl Into<String>, lng: impl Into<String>) -> Self {
        LocationDraft {
            name: name.into(),
            lat: lat.into(),
            lng: lng.into(),
            ..Default::default()
        }
    }

    /// Builds a draft from a place-search result.
    pub fn from_candidate(candidate: &PlaceCandidate) -> Self {
        LocationDraft {
            name: candidate.name.clone(),
            lat: candidate.lat.to_string(),
            lng: candidate.lng.to_string(),
            place_id: candidate.place_id.clone(),
            ..Default::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    pub fn with_place_id(mut self, place_id: impl Into<String>) -> Self {
        self.place_id = Some(place_id.into());
        self
    }
}

/// A draft that passed validation, ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLocation {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub category: Category,
    pub description: String,
    pub image_url: Option<String>,
    pub place_id: Option<String>,
}

impl NewLocation {
    /// Turns the validated draft into a stored record.
    pub fn into_location(self, id: LocationId, created_at: Option<DateTime<Utc>>) -> Location {
        Location {
            id,
            name: self.name,
            lat: self.lat,
            lng: self.lng,
            category: self.category,
            description: self.description,
            image_url: self.image_url,
            place_id: self.place_id,
            created_at,
        }
    }
}

// =============================================================================
// Patch
// =============================================================================

/// Partial update of a location (the edit form).
///
/// `None` leaves a field untouched. For `image_url` and `place_id`, an empty
/// string clears the value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationPatch {
    pub name: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub category: Option<Category>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub place_id: Option<String>,
}

impl LocationPatch {
    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == LocationPatch::default()
    }

    /// Merges the patch into a copy of `location`.
    pub fn apply_to(&self, location: &Location) -> Location {
        let mut merged = location.clone();
        if let Some(name) = &self.name {
            merged.name = name.clone();
        }
        if let Some(lat) = self.lat {
            merged.lat = lat;
        }
        if let Some(lng) = self.lng {
            merged.lng = lng;
        }
        if let Some(category) = self.category {
            merged.category = category;
        }
        if let Some(description) = &self.description {
            merged.description = description.clone();
        }
        if let Some(image_url) = &self.image_url {
            merged.image_url = non_empty(image_url);
        }
        if let Some(place_id) = &self.place_id {
            merged.place_id = non_empty(place_id);
        }
        merged
    }
}

/// Maps blank strings to `None`.
pub fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// =============================================================================
// Place Candidate
// =============================================================================

/// A place-search or autocomplete result from the maps collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PlaceCandidate {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub place_id: Option<String>,
}

/// Truncates a suggestion list to what the form displays.
pub fn top_suggestions(mut candidates: Vec<PlaceCandidate>) -> Vec<PlaceCandidate> {
    candidates.truncate(crate::MAX_PLACE_SUGGESTIONS);
    candidates
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Location {
        Location {
            id: LocationId::new(1),
            name: "Santa Monica".to_string(),
            lat: 34.019454,
            lng: -118.491191,
            category: Category::Nature,
            description: String::new(),
            image_url: Some("https://img.example/pier.jpg".to_string()),
            place_id: None,
            created_at: None,
        }
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("city".parse::<Category>().unwrap(), Category::City);
        assert_eq!(" Museum ".parse::<Category>().unwrap(), Category::Museum);
        assert!("beach".parse::<Category>().is_err());
        assert!("".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_normalize() {
        assert_eq!(Category::normalize("hotel"), Category::Hotel);
        assert_eq!(Category::normalize("entertainment"), Category::Other);
        assert_eq!(Category::normalize(""), Category::Other);
    }

    #[test]
    fn test_category_serde_lowercase() {
        let json = serde_json::to_string(&Category::Restaurant).unwrap();
        assert_eq!(json, "\"restaurant\"");
    }

    #[test]
    fn test_category_filter_parsing() {
        assert_eq!("all".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "nature".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Nature)
        );
        assert!("beach".parse::<CategoryFilter>().is_err());
        assert_eq!(CategoryFilter::All.to_string(), "all");
    }

    #[test]
    fn test_category_filter_parse_is_lenient_match_is_exact() {
        let filter: CategoryFilter = " NATURE ".parse().unwrap();
        assert_eq!(filter, CategoryFilter::Only(Category::Nature));
        assert_eq!(" All".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);

        let mut location = sample();
        location.category = Category::Nature;
        assert!(filter.matches(&location));
        location.category = Category::Other;
        assert!(!filter.matches(&location));
    }

    #[test]
    fn test_category_filter_serde() {
        let json = serde_json::to_string(&CategoryFilter::Only(Category::City)).unwrap();
        assert_eq!(json, "\"city\"");
        let parsed: CategoryFilter = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(parsed, CategoryFilter::All);
    }

    #[test]
    fn test_location_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["imageUrl"], "https://img.example/pier.jpg");
        assert!(json.get("placeId").is_none());
    }

    #[test]
    fn test_patch_merges_fields() {
        let patch = LocationPatch {
            name: Some("Santa Monica Pier".to_string()),
            image_url: Some(String::new()),
            ..Default::default()
        };
        let merged = patch.apply_to(&sample());
        assert_eq!(merged.name, "Santa Monica Pier");
        assert_eq!(merged.image_url, None);
        assert_eq!(merged.category, Category::Nature);
        assert_eq!(merged.id, LocationId::new(1));
    }

    #[test]
    fn test_empty_patch() {
        assert!(LocationPatch::default().is_empty());
        let merged = LocationPatch::default().apply_to(&sample());
        assert_eq!(merged, sample());
    }

    #[test]
    fn test_draft_from_candidate() {
        let candidate = PlaceCandidate {
            name: "Griffith Observatory".to_string(),
            lat: 34.1184,
            lng: -118.3004,
            place_id: Some("ChIJ-griffith".to_string()),
        };
        let draft = LocationDraft::from_candidate(&candidate);
        assert_eq!(draft.lat, "34.1184");
        assert_eq!(draft.place_id.as_deref(), Some("ChIJ-griffith"));
    }

    #[test]
    fn test_top_suggestions_truncates() {
        let candidates = (0..8)
            .map(|i| PlaceCandidate {
                name: format!("Place {i}"),
                lat: 0.0,
                lng: 0.0,
                place_id: None,
            })
            .collect();
        assert_eq!(top_suggestions(candidates).len(), crate::MAX_PLACE_SUGGESTIONS);
    }
}
