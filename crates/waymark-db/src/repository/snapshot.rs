//! # Location Snapshot Repository
//!
//! The full location collection of local-only mode, stored under
//! [`LOCATIONS_STORAGE_KEY`]. Every save rewrites the whole collection.
//!
//! Unlike favorites, a corrupt snapshot is an error: silently replacing it
//! with an empty list would lose every location on the next save.
//!
//! Category values outside the closed enumeration (`"beach"`,
//! `"entertainment"` from older data) are normalized to `other` on load.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, warn};
use waymark_core::{Category, Location, LocationId, LOCATIONS_STORAGE_KEY};

use crate::error::{DbError, DbResult};
use crate::repository::kv::KvRepository;

/// A snapshot entry as stored, before its category is checked.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredLocation {
    id: LocationId,
    name: String,
    lat: f64,
    lng: f64,
    #[serde(default)]
    category: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    place_id: Option<String>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

impl From<StoredLocation> for Location {
    fn from(stored: StoredLocation) -> Self {
        let category = Category::normalize(&stored.category);
        if category.as_str() != stored.category {
            warn!(
                id = %stored.id,
                stored = %stored.category,
                "Unknown category in snapshot, using 'other'"
            );
        }

        Location {
            id: stored.id,
            name: stored.name,
            lat: stored.lat,
            lng: stored.lng,
            category,
            description: stored.description,
            image_url: stored.image_url.filter(|s| !s.is_empty()),
            place_id: stored.place_id.filter(|s| !s.is_empty()),
            created_at: stored.created_at,
        }
    }
}

/// Repository for the local location snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotRepository {
    kv: KvRepository,
}

impl SnapshotRepository {
    pub fn new(kv: KvRepository) -> Self {
        SnapshotRepository { kv }
    }

    /// Reads the snapshot.
    ///
    /// ## Returns
    /// - `Ok(vec![])` if nothing was ever saved
    /// - `Err(DbError::Serialization)` if the stored value is not a location array
    pub async fn load(&self) -> DbResult<Vec<Location>> {
        let Some(raw) = self.kv.get(LOCATIONS_STORAGE_KEY).await? else {
            debug!("No location snapshot stored yet");
            return Ok(Vec::new());
        };

        let stored: Vec<StoredLocation> = serde_json::from_str(&raw).map_err(|e| {
            warn!(error = %e, "Location snapshot is corrupt");
            DbError::serialization(LOCATIONS_STORAGE_KEY, &e)
        })?;
        let locations: Vec<Location> = stored.into_iter().map(Location::from).collect();

        debug!(count = locations.len(), "Loaded location snapshot");
        Ok(locations)
    }

    /// Writes the whole collection.
    pub async fn save(&self, locations: &[Location]) -> DbResult<()> {
        let json = serde_json::to_string(locations)
            .map_err(|e| DbError::serialization(LOCATIONS_STORAGE_KEY, &e))?;
        self.kv.set(LOCATIONS_STORAGE_KEY, &json).await?;
        debug!(count = locations.len(), "Saved location snapshot");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use waymark_core::{Category, Location, LocationId, LOCATIONS_STORAGE_KEY};

    use crate::{Database, DbConfig, DbError};

    fn getty() -> Location {
        Location {
            id: LocationId::new(4),
            name: "Getty Center".to_string(),
            lat: 34.078,
            lng: -118.4741,
            category: Category::Museum,
            description: "Hilltop museum".to_string(),
            image_url: None,
            place_id: Some("ChIJ-getty".to_string()),
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_load_missing_is_empty() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.snapshots().load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.snapshots();

        repo.save(&[getty()]).await.unwrap();
        assert_eq!(repo.load().await.unwrap(), vec![getty()]);

        repo.save(&[]).await.unwrap();
        assert!(repo.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_is_error() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.kv().set(LOCATIONS_STORAGE_KEY, "[{\"id\":").await.unwrap();

        let err = db.snapshots().load().await.unwrap_err();
        assert!(matches!(err, DbError::Serialization { .. }));
    }

    #[tokio::test]
    async fn test_legacy_category_is_normalized() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let raw = r#"[
            {"id":2,"name":"Santa Monica","lat":34.019454,"lng":-118.491191,"category":"beach","description":""},
            {"id":3,"name":"Hollywood","lat":34.092809,"lng":-118.328659,"category":"entertainment","imageUrl":""}
        ]"#;
        db.kv().set(LOCATIONS_STORAGE_KEY, raw).await.unwrap();

        let locations = db.snapshots().load().await.unwrap();
        assert_eq!(locations.len(), 2);
        assert!(locations.iter().all(|l| l.category == Category::Other));
        assert_eq!(locations[1].image_url, None);
    }
}
