//! # Wire Rows
//!
//! The hosted table's row shape and its mapping to [`Location`].
//!
//! ## Column Mapping
//! ```text
//! column        Location field   notes
//! ───────────   ──────────────   ────────────────────────────────────────
//! id            id               number, or a numeric string
//! name          name
//! lat / lng     lat / lng        must be finite
//! category      category         normalized; unknown → other (warn!)
//! description   description      null → ""
//! image_url     image_url        "" or null → None
//! place_id      place_id         "" or null → None
//! created_at    created_at       set by the backend
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;
use waymark_core::{Category, Location, LocationId, NewLocation};

use crate::error::RemoteError;

// =============================================================================
// Read Model
// =============================================================================

/// A location row as the backend returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRow {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: i64,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub place_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Accepts `42` as well as `"42"`.
fn deserialize_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdRepr {
        Number(i64),
        Text(String),
    }

    match IdRepr::deserialize(deserializer)? {
        IdRepr::Number(id) => Ok(id),
        IdRepr::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

impl TryFrom<LocationRow> for Location {
    type Error = RemoteError;

    fn try_from(row: LocationRow) -> Result<Self, Self::Error> {
        if !row.lat.is_finite() || !row.lng.is_finite() {
            return Err(RemoteError::InvalidRow {
                id: row.id,
                reason: "coordinates are not finite".to_string(),
            });
        }

        let raw_category = row.category.unwrap_or_default();
        let category = Category::normalize(&raw_category);
        if category.as_str() != raw_category {
            warn!(
                id = row.id,
                stored = %raw_category,
                "Unknown category on remote row, using 'other'"
            );
        }

        Ok(Location {
            id: LocationId::new(row.id),
            name: row.name,
            lat: row.lat,
            lng: row.lng,
            category,
            description: row.description.unwrap_or_default(),
            image_url: row.image_url.filter(|s| !s.trim().is_empty()),
            place_id: row.place_id.filter(|s| !s.trim().is_empty()),
            created_at: row.created_at,
        })
    }
}

// =============================================================================
// Write Model
// =============================================================================

/// Body of an insert or update request.
///
/// Never carries `id` or `created_at`; the backend owns both.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationWrite<'a> {
    pub name: &'a str,
    pub lat: f64,
    pub lng: f64,
    pub category: &'static str,
    pub description: &'a str,
    pub image_url: &'a str,
    pub place_id: Option<&'a str>,
}

impl<'a> From<&'a NewLocation> for LocationWrite<'a> {
    fn from(new: &'a NewLocation) -> Self {
        LocationWrite {
            name: &new.name,
            lat: new.lat,
            lng: new.lng,
            category: new.category.as_str(),
            description: &new.description,
            image_url: new.image_url.as_deref().unwrap_or(""),
            place_id: new.place_id.as_deref(),
        }
    }
}

impl<'a> From<&'a Location> for LocationWrite<'a> {
    fn from(location: &'a Location) -> Self {
        LocationWrite {
            name: &location.name,
            lat: location.lat,
            lng: location.lng,
            category: location.category.as_str(),
            description: &location.description,
            image_url: location.image_url.as_deref().unwrap_or(""),
            place_id: location.place_id.as_deref(),
        }
    }
}
