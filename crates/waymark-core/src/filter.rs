//! # Search / Filter Pipeline
//!
//! Derives the visible set from the location list.
//!
//! ## Composition
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  LocationList ──search(query)──► SearchResult ──apply_category(c)──►   │
//! │                  (on submit,      (stored)       (every render,         │
//! │                   clears the                      pure projection)      │
//! │                   selection)                                            │
//! │                                                         Visible set     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The text search runs once per submission and its result is kept. The
//! category selector only projects over that stored result, so switching
//! categories back to `all` shows the last search again.

use serde::{Deserialize, Serialize};

use crate::store::LocationList;
use crate::types::{CategoryFilter, Location, LocationId};

// =============================================================================
// Pure Functions
// =============================================================================

/// Case-insensitive substring match of `query` against location names.
///
/// A query that trims to empty returns the input unchanged.
///
/// ## Example
/// ```rust
/// use waymark_core::filter::search;
/// use waymark_core::types::{Category, Location, LocationId};
///
/// let hollywood = Location {
///     id: LocationId::new(2),
///     name: "Hollywood".into(),
///     lat: 34.092809,
///     lng: -118.328659,
///     category: Category::Other,
///     description: String::new(),
///     image_url: None,
///     place_id: None,
///     created_at: None,
/// };
///
/// assert_eq!(search(&[hollywood.clone()], "HOLLY").len(), 1);
/// assert!(search(&[hollywood], "beach").is_empty());
/// ```
pub fn search(locations: &[Location], query: &str) -> Vec<Location> {
    if query.trim().is_empty() {
        return locations.to_vec();
    }

    // Surrounding whitespace is part of the needle
    let needle = query.to_lowercase();
    locations
        .iter()
        .filter(|l| l.name_contains_lowercase(&needle))
        .cloned()
        .collect()
}

/// Keeps the locations whose category equals the selector.
///
/// `CategoryFilter::All` passes the input through.
pub fn apply_category(locations: &[Location], category: CategoryFilter) -> Vec<Location> {
    locations
        .iter()
        .filter(|l| category.matches(l))
        .cloned()
        .collect()
}

// =============================================================================
// Filter State
// =============================================================================

/// Current search text and category choice. Ephemeral, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub query: String,
    pub category: CategoryFilter,
}

impl FilterState {
    /// Returns true when neither a query nor a category narrows the list.
    pub fn is_unfiltered(&self) -> bool {
        self.query.trim().is_empty() && self.category == CategoryFilter::All
    }
}

// =============================================================================
// Stored Search Result
// =============================================================================

/// The result of the last submitted text search.
///
/// Kept in step with the store by the controller: records confirmed by the
/// persistence target are appended, replaced or removed here as well,
/// without re-running the query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResult {
    items: Vec<Location>,
}

impl SearchResult {
    /// Runs `query` against the store.
    pub fn from_search(store: &LocationList, query: &str) -> Self {
        SearchResult {
            items: search(store.list(), query),
        }
    }

    /// Resets to the whole store (after a load).
    pub fn reset(&mut self, store: &LocationList) {
        self.items = store.list().to_vec();
    }

    /// Stored text-search result.
    pub fn items(&self) -> &[Location] {
        &self.items
    }

    /// Category projection over the stored result.
    pub fn visible(&self, category: CategoryFilter) -> Vec<Location> {
        apply_category(&self.items, category)
    }

    /// A new record was confirmed: it is appended.
    pub fn on_added(&mut self, location: &Location) {
        if !self.items.iter().any(|l| l.id == location.id) {
            self.items.push(location.clone());
        }
    }

    /// A record was updated: the stored copy, if any, is replaced in place.
    pub fn on_updated(&mut self, location: &Location) {
        if let Some(slot) = self.items.iter_mut().find(|l| l.id == location.id) {
            *slot = location.clone();
        }
    }

    /// A record was deleted.
    pub fn on_deleted(&mut self, id: LocationId) {
        self.items.retain(|l| l.id != id);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
