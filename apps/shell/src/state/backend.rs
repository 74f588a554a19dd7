//! # Persistence Backends
//!
//! The controller talks to its persistence targets through two traits.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Persistence Targets                                  │
//! │                                                                         │
//! │  AppState                                                               │
//! │     │                                                                   │
//! │     ├──► dyn LocationBackend                                            │
//! │     │       ├── LocalBackend   ──► SnapshotRepository (full snapshot)   │
//! │     │       └── RemoteBackend  ──► RemoteClient (row per location)      │
//! │     │                                                                   │
//! │     └──► dyn FavoritesStore                                             │
//! │             └── LocalFavorites ──► FavoritesRepository (always local)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every backend call returns the record as the target stored it; the
//! controller applies nothing until that confirmation arrives.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, info};
use waymark_core::{FavoriteSet, Location, LocationId, LocationList, NewLocation};
use waymark_db::{FavoritesRepository, SnapshotRepository};
use waymark_remote::RemoteClient;

use crate::error::{StoreError, StoreResult};

// =============================================================================
// Traits
// =============================================================================

/// Where location records are persisted.
#[async_trait]
pub trait LocationBackend: Send + Sync {
    /// Every stored location, in the target's order.
    async fn list(&self) -> StoreResult<Vec<Location>>;

    /// Persists a new location and returns it with its assigned id.
    async fn insert(&self, new: &NewLocation) -> StoreResult<Location>;

    /// Overwrites the record with the same id and returns the stored value.
    async fn update(&self, location: &Location) -> StoreResult<Location>;

    /// Removes the record with `id`.
    async fn delete(&self, id: LocationId) -> StoreResult<()>;

    /// Short label for logs and the status line.
    fn describe(&self) -> String;
}

/// Where favorite identifiers are persisted.
#[async_trait]
pub trait FavoritesStore: Send + Sync {
    /// Never fails; unreadable data loads as an empty set.
    async fn load(&self) -> FavoriteSet;

    async fn save(&self, favorites: &FavoriteSet) -> StoreResult<()>;
}

// =============================================================================
// Local Backend
// =============================================================================

/// Locations kept as one snapshot in the local key/value store.
///
/// ## Write Path
/// ```text
/// insert(new)
///    │
///    ├── copy = snapshot.clone()
///    ├── copy.push(new with next_local_id)
///    ├── SnapshotRepository::save(copy)   ◄── whole collection, every time
///    └── snapshot = copy                  ◄── only after the save succeeded
/// ```
pub struct LocalBackend {
    snapshots: SnapshotRepository,
    /// `None` until the snapshot has been read once.
    cache: Mutex<Option<LocationList>>,
}

impl LocalBackend {
    pub fn new(snapshots: SnapshotRepository) -> Self {
        LocalBackend {
            snapshots,
            cache: Mutex::new(None),
        }
    }

    async fn read_snapshot(&self) -> StoreResult<LocationList> {
        let locations = self.snapshots.load().await?;
        Ok(LocationList::from_vec(locations))
    }

    /// Applies `change` to a copy of the snapshot, saves the copy, then
    /// keeps it.
    async fn write_through<T>(
        &self,
        change: impl FnOnce(&mut LocationList) -> StoreResult<T> + Send,
    ) -> StoreResult<T> {
        let mut cache = self.cache.lock().await;
        let mut next = match cache.as_ref() {
            Some(list) => list.clone(),
            None => self.read_snapshot().await?,
        };

        let outcome = change(&mut next)?;
        self.snapshots.save(next.list()).await?;
        *cache = Some(next);
        Ok(outcome)
    }
}

#[async_trait]
impl LocationBackend for LocalBackend {
    async fn list(&self) -> StoreResult<Vec<Location>> {
        let list = self.read_snapshot().await?;
        let locations = list.list().to_vec();
        *self.cache.lock().await = Some(list);
        debug!(count = locations.len(), "Loaded local snapshot");
        Ok(locations)
    }

    async fn insert(&self, new: &NewLocation) -> StoreResult<Location> {
        let new = new.clone();
        let location = self
            .write_through(move |list| {
                let location = new.into_location(list.next_local_id(), Some(Utc::now()));
                list.push(location.clone())
                    .map_err(|e| StoreError::Persistence(e.to_string()))?;
                Ok(location)
            })
            .await?;
        debug!(id = %location.id, "Saved new location to local snapshot");
        Ok(location)
    }

    async fn update(&self, location: &Location) -> StoreResult<Location> {
        let location = location.clone();
        let id = location.id;
        self.write_through(move |list| {
            list.replace(location.clone())
                .map(|_| location)
                .ok_or_else(|| StoreError::Persistence(format!("Location {id} is not stored locally")))
        })
        .await
    }

    async fn delete(&self, id: LocationId) -> StoreResult<()> {
        self.write_through(move |list| {
            if list.remove(id).is_none() {
                debug!(id = %id, "Location already absent from local snapshot");
            }
            Ok(())
        })
        .await
    }

    fn describe(&self) -> String {
        "local snapshot".to_string()
    }
}

// =============================================================================
// Remote Backend
// =============================================================================

/// Locations kept as rows of the hosted table.
pub struct RemoteBackend {
    client: RemoteClient,
    label: String,
}

impl RemoteBackend {
    pub fn new(client: RemoteClient, label: impl Into<String>) -> Self {
        let label = label.into();
        info!(target_table = %label, "Using hosted locations table");
        RemoteBackend { client, label }
    }
}

#[async_trait]
impl LocationBackend for RemoteBackend {
    async fn list(&self) -> StoreResult<Vec<Location>> {
        Ok(self.client.list_locations().await?)
    }

    async fn insert(&self, new: &NewLocation) -> StoreResult<Location> {
        Ok(self.client.insert_location(new).await?)
    }

    async fn update(&self, location: &Location) -> StoreResult<Location> {
        Ok(self.client.update_location(location).await?)
    }

    async fn delete(&self, id: LocationId) -> StoreResult<()> {
        Ok(self.client.delete_location(id).await?)
    }

    fn describe(&self) -> String {
        format!("hosted table '{}'", self.label)
    }
}

// =============================================================================
// Local Favorites
// =============================================================================

/// Favorites in the local key/value store.
pub struct LocalFavorites {
    repository: FavoritesRepository,
}

impl LocalFavorites {
    pub fn new(repository: FavoritesRepository) -> Self {
        LocalFavorites { repository }
    }
}

#[async_trait]
impl FavoritesStore for LocalFavorites {
    async fn load(&self) -> FavoriteSet {
        self.repository.load().await
    }

    async fn save(&self, favorites: &FavoriteSet) -> StoreResult<()> {
        Ok(self.repository.save(favorites).await?)
    }
}
