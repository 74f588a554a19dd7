//! # Application State
//!
//! The single controller owning every piece of client state. Its methods
//! are the only write surface; command handlers never touch the pieces
//! directly.
//!
//! ## Owned State
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  AppState                                                               │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌──────────────┐  │
//! │  │ LocationList │ │ FavoriteSet  │ │  Selection   │ │ FilterState  │  │
//! │  │ (store)      │ │ (ids)        │ │ Empty |      │ │ + stored     │  │
//! │  │              │ │              │ │ Focused(loc) │ │ SearchResult │  │
//! │  └──────────────┘ └──────────────┘ └──────────────┘ └──────────────┘  │
//! │         ▲                ▲                                              │
//! │         │                │                                              │
//! │  dyn LocationBackend   dyn FavoritesStore                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Mutation Policy: Confirm, Then Apply
//! ```text
//! add / update / delete
//!    │
//!    ├── 1. validate input              ──► StoreError::Validation (no call)
//!    ├── 2. call the backend            ──► StoreError::Persistence (no change)
//!    └── 3. backend confirmed:
//!           store, stored search result, selection, favorites
//!           are all brought in line with the confirmed record
//! ```
//!
//! ## Selection Transitions
//! ```text
//!            select(id)                     update(id) of focused
//!   Empty ───────────────► Focused(loc) ◄────────────────┐
//!     ▲                        │    └──────────────────────┘
//!     │  clear / search /      │
//!     └── delete of focused ◄──┘
//! ```
//! Changing the category filter leaves the selection alone.

use tracing::{debug, error, info, warn};
use waymark_core::validation::{validate_draft, validate_patch};
use waymark_core::{
    CategoryFilter, FavoriteSet, FilterState, Location, LocationDraft, LocationId, LocationList,
    LocationPatch, SearchResult, Selection,
};

use crate::error::{StoreError, StoreResult};
use crate::state::backend::{FavoritesStore, LocationBackend};

/// The controller.
pub struct AppState {
    backend: Box<dyn LocationBackend>,
    favorites_store: Box<dyn FavoritesStore>,

    store: LocationList,
    favorites: FavoriteSet,
    selection: Selection,
    filter: FilterState,
    search_result: SearchResult,
}

impl AppState {
    /// Creates an empty controller. Call [`AppState::load`] to read the
    /// persisted state.
    pub fn new(backend: Box<dyn LocationBackend>, favorites_store: Box<dyn FavoritesStore>) -> Self {
        AppState {
            backend,
            favorites_store,
            store: LocationList::new(),
            favorites: FavoriteSet::new(),
            selection: Selection::default(),
            filter: FilterState::default(),
            search_result: SearchResult::default(),
        }
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Reads favorites and locations from their persistence targets.
    ///
    /// Favorites always load. If listing locations fails the store keeps its
    /// previous contents and the error is returned for logging.
    ///
    /// ## Returns
    /// The number of locations loaded.
    pub async fn load(&mut self) -> StoreResult<usize> {
        self.favorites = self.favorites_store.load().await;
        debug!(count = self.favorites.len(), "Loaded favorites");

        let locations = match self.backend.list().await {
            Ok(locations) => locations,
            Err(e) => {
                error!(backend = %self.backend.describe(), error = %e, "Failed to load locations");
                return Err(e);
            }
        };

        self.store = LocationList::from_vec(locations);
        self.filter.query.clear();
        self.search_result.reset(&self.store);
        self.refresh_selection_after_load();
        self.prune_favorites().await;

        info!(
            backend = %self.backend.describe(),
            locations = self.store.len(),
            favorites = self.favorites.len(),
            "State loaded"
        );
        Ok(self.store.len())
    }

    fn refresh_selection_after_load(&mut self) {
        if let Some(id) = self.selection.focused_id() {
            match self.store.get(id) {
                Some(location) => {
                    let location = location.clone();
                    self.selection.on_updated(&location);
                }
                None => self.selection.clear(),
            }
        }
    }

    /// Drops favorites whose location no longer exists.
    async fn prune_favorites(&mut self) {
        let removed = self.favorites.retain_existing(&self.store);
        if removed > 0 {
            warn!(removed, "Pruned favorites of missing locations");
            if let Err(e) = self.favorites_store.save(&self.favorites).await {
                error!(error = %e, "Failed to save pruned favorites");
            }
        }
    }

    // =========================================================================
    // Location Store
    // =========================================================================

    /// Every known location, in load order.
    pub fn locations(&self) -> &[Location] {
        self.store.list()
    }

    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.store.get(id)
    }

    /// Validates and persists a new location.
    ///
    /// ## Returns
    /// The record as the backend stored it (with its assigned id).
    pub async fn add(&mut self, draft: &LocationDraft) -> StoreResult<Location> {
        let new = validate_draft(draft).map_err(|e| {
            warn!(field = e.field(), error = %e, "Rejected new location");
            StoreError::Validation(e)
        })?;

        let created = self.backend.insert(&new).await?;
        self.store
            .push(created.clone())
            .map_err(|e| StoreError::Persistence(e.to_string()))?;
        self.search_result.on_added(&created);

        debug!(id = %created.id, name = %created.name, "Location added");
        Ok(created)
    }

    /// Merges `patch` into the location with `id` and persists the result.
    ///
    /// ## Returns
    /// - `Ok(None)` if no location has that id (nothing happens)
    /// - `Ok(Some(updated))` once the backend confirmed the write
    pub async fn update(
        &mut self,
        id: LocationId,
        patch: &LocationPatch,
    ) -> StoreResult<Option<Location>> {
        validate_patch(patch).map_err(|e| {
            warn!(id = %id, field = e.field(), error = %e, "Rejected location edit");
            StoreError::Validation(e)
        })?;

        let Some(current) = self.store.get(id) else {
            debug!(id = %id, "Update of unknown location ignored");
            return Ok(None);
        };
        if patch.is_empty() {
            return Ok(Some(current.clone()));
        }

        let merged = patch.apply_to(current);
        let confirmed = self.backend.update(&merged).await?;

        self.store.replace(confirmed.clone());
        self.search_result.on_updated(&confirmed);
        if self.selection.on_updated(&confirmed) {
            debug!(id = %id, "Refreshed selected location");
        }

        debug!(id = %id, "Location updated");
        Ok(Some(confirmed))
    }

    /// Deletes the location with `id`, pruning it from favorites and the
    /// selection.
    ///
    /// ## Returns
    /// - `Ok(None)` if no location has that id (nothing happens)
    /// - `Ok(Some(removed))` once the backend confirmed the delete
    pub async fn delete(&mut self, id: LocationId) -> StoreResult<Option<Location>> {
        if !self.store.contains(id) {
            debug!(id = %id, "Delete of unknown location ignored");
            return Ok(None);
        }

        self.backend.delete(id).await?;

        let removed = self.store.remove(id);
        self.search_result.on_deleted(id);
        if self.selection.on_deleted(id) {
            debug!(id = %id, "Cleared selection of deleted location");
        }
        if self.favorites.remove(id) {
            if let Err(e) = self.favorites_store.save(&self.favorites).await {
                error!(id = %id, error = %e, "Failed to save favorites after delete");
            }
        }

        debug!(id = %id, "Location deleted");
        Ok(removed)
    }

    /// Clears the image of a location whose image failed to load.
    pub async fn clear_broken_image(&mut self, id: LocationId) -> StoreResult<Option<Location>> {
        let patch = LocationPatch {
            image_url: Some(String::new()),
            ..Default::default()
        };
        self.update(id, &patch).await
    }

    // =========================================================================
    // Favorites
    // =========================================================================

    /// Flips favorite membership of `id` and persists the set.
    ///
    /// ## Returns
    /// - `Ok(None)` if no location has that id
    /// - `Ok(Some(is_favorite))` with the new membership
    pub async fn toggle_favorite(&mut self, id: LocationId) -> StoreResult<Option<bool>> {
        if !self.store.contains(id) {
            debug!(id = %id, "Favorite toggle of unknown location ignored");
            return Ok(None);
        }

        let mut next = self.favorites.clone();
        let now_favorite = next.toggle(id);
        self.favorites_store.save(&next).await?;
        self.favorites = next;

        debug!(id = %id, favorite = now_favorite, "Favorite toggled");
        Ok(Some(now_favorite))
    }

    /// Toggles the focused location. `Ok(None)` when nothing is selected.
    pub async fn toggle_selected_favorite(&mut self) -> StoreResult<Option<bool>> {
        match self.selection.focused_id() {
            Some(id) => self.toggle_favorite(id).await,
            None => Ok(None),
        }
    }

    /// Returns true if `id` is a favorite of a location in the store.
    ///
    /// Favorite ids without a stored location (a failed load leaves them
    /// unreconciled) never count.
    pub fn is_favorite(&self, id: LocationId) -> bool {
        self.favorites.contains(id) && self.store.contains(id)
    }

    /// Favorite locations in store order.
    pub fn favorite_locations(&self) -> Vec<&Location> {
        self.favorites.favorite_locations(&self.store)
    }

    /// Number of favorite locations, always equal to the length of
    /// [`favorite_locations`](Self::favorite_locations).
    pub fn favorite_count(&self) -> usize {
        self.favorite_locations().len()
    }

    /// Returns true if the focused location is a favorite.
    pub fn is_selected_favorite(&self) -> bool {
        self.selection
            .focused_id()
            .is_some_and(|id| self.is_favorite(id))
    }

    // =========================================================================
    // Search / Filter
    // =========================================================================

    /// Runs a text search over the whole store and clears the selection.
    ///
    /// The query is kept as typed. A blank query shows everything.
    ///
    /// ## Returns
    /// The visible set after the current category projection.
    pub fn search(&mut self, query: &str) -> Vec<Location> {
        self.search_result = SearchResult::from_search(&self.store, query);
        self.filter.query = query.to_string();
        self.selection.clear();

        debug!(query = %self.filter.query, hits = self.search_result.len(), "Search executed");
        self.visible()
    }

    /// Changes the category projection. The stored search result and the
    /// selection are untouched.
    pub fn set_category(&mut self, category: CategoryFilter) -> Vec<Location> {
        self.filter.category = category;
        debug!(category = %category, "Category filter changed");
        self.visible()
    }

    /// Text search result, then category projection.
    pub fn visible(&self) -> Vec<Location> {
        self.search_result.visible(self.filter.category)
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Focuses the location with `id`. `None` if it does not exist.
    pub fn select(&mut self, id: LocationId) -> Option<&Location> {
        let location = self.store.get(id)?.clone();
        self.selection.select(location);
        self.selection.focused()
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Label of the active location backend.
    pub fn backend_name(&self) -> String {
        self.backend.describe()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
