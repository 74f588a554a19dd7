//! # Favorites Repository
//!
//! Persists the favorite identifiers under [`FAVORITES_STORAGE_KEY`] as a
//! JSON array of numbers, independent of where locations themselves live.
//!
//! ## Load Policy
//! ```text
//! stored value          load() result
//! ─────────────────     ─────────────────────────────
//! (missing)             empty set
//! "[1,3]"               {1, 3}
//! "garbage"             empty set  (warn! logged)
//! read error            empty set  (warn! logged)
//! ```

use tracing::{debug, warn};
use waymark_core::{FavoriteSet, FAVORITES_STORAGE_KEY};

use crate::error::{DbError, DbResult};
use crate::repository::kv::KvRepository;

/// Repository for the favorites collection.
#[derive(Debug, Clone)]
pub struct FavoritesRepository {
    kv: KvRepository,
}

impl FavoritesRepository {
    pub fn new(kv: KvRepository) -> Self {
        FavoritesRepository { kv }
    }

    /// Reads the favorites. Never fails; see the module docs.
    pub async fn load(&self) -> FavoriteSet {
        let raw = match self.kv.get(FAVORITES_STORAGE_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return FavoriteSet::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read favorites, starting empty");
                return FavoriteSet::new();
            }
        };

        match serde_json::from_str::<FavoriteSet>(&raw) {
            Ok(favorites) => {
                debug!(count = favorites.len(), "Loaded favorites");
                favorites
            }
            Err(e) => {
                warn!(error = %e, "Stored favorites are not a JSON id array, starting empty");
                FavoriteSet::new()
            }
        }
    }

    /// Writes the whole collection.
    pub async fn save(&self, favorites: &FavoriteSet) -> DbResult<()> {
        let json = serde_json::to_string(favorites)
            .map_err(|e| DbError::serialization(FAVORITES_STORAGE_KEY, &e))?;
        self.kv.set(FAVORITES_STORAGE_KEY, &json).await?;
        debug!(count = favorites.len(), "Saved favorites");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use waymark_core::{LocationId, FAVORITES_STORAGE_KEY};

    use crate::{Database, DbConfig};

    #[tokio::test]
    async fn test_load_missing_is_empty() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.favorites().load().await.is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.favorites();

        let mut favorites = repo.load().await;
        favorites.toggle(LocationId::new(3));
        favorites.toggle(LocationId::new(1));
        repo.save(&favorites).await.unwrap();

        let raw = db.kv().get(FAVORITES_STORAGE_KEY).await.unwrap();
        assert_eq!(raw.as_deref(), Some("[3,1]"));
        assert_eq!(repo.load().await, favorites);
    }

    #[tokio::test]
    async fn test_corrupt_value_loads_empty() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.kv().set(FAVORITES_STORAGE_KEY, "{not json").await.unwrap();
        assert!(db.favorites().load().await.is_empty());
    }
}
