//! # Favorites Set
//!
//! The user-flagged subset of location identifiers.
//!
//! Stored as an ordered, duplicate-free list so the serialized form is the
//! same JSON array of ids the web client keeps in local storage
//! (`[3, 1, 7]`), and the favorites view lists entries in store order.
//!
//! ## Invariant
//! Every id refers to a location currently in the store. The controller
//! calls [`FavoriteSet::remove`] on delete and
//! [`FavoriteSet::retain_existing`] after a reload.

use serde::{Deserialize, Serialize};

use crate::store::LocationList;
use crate::types::{Location, LocationId};

/// Set of favorited location identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FavoriteSet {
    ids: Vec<LocationId>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        FavoriteSet { ids: Vec::new() }
    }

    /// Builds a set from persisted ids, dropping repeats.
    pub fn from_ids(ids: impl IntoIterator<Item = LocationId>) -> Self {
        let mut set = FavoriteSet::new();
        for id in ids {
            set.insert(id);
        }
        set
    }

    /// Flips membership of `id`.
    ///
    /// ## Returns
    /// `true` if `id` is a favorite after the call.
    pub fn toggle(&mut self, id: LocationId) -> bool {
        if self.remove(id) {
            false
        } else {
            self.ids.push(id);
            true
        }
    }

    #[inline]
    pub fn contains(&self, id: LocationId) -> bool {
        self.ids.contains(&id)
    }

    /// Adds `id`; returns false if it was already present.
    pub fn insert(&mut self, id: LocationId) -> bool {
        if self.contains(id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Removes `id`; returns false if it was not present.
    pub fn remove(&mut self, id: LocationId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|f| *f != id);
        self.ids.len() != before
    }

    /// Drops ids that no longer refer to a stored location.
    ///
    /// ## Returns
    /// The number of stale ids removed.
    pub fn retain_existing(&mut self, store: &LocationList) -> usize {
        let before = self.ids.len();
        self.ids.retain(|id| store.contains(*id));
        before - self.ids.len()
    }

    /// Favorite locations, in store order.
    pub fn favorite_locations<'a>(&self, store: &'a LocationList) -> Vec<&'a Location> {
        store.list().iter().filter(|l| self.contains(l.id)).collect()
    }

    /// Identifiers in insertion order.
    pub fn ids(&self) -> &[LocationId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
