//! # Selection State
//!
//! At most one "currently focused" location.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │            select(loc)                                                  │
//! │   ┌───────┐ ───────────────────────► ┌──────────────┐                   │
//! │   │ Empty │                          │ Focused(loc) │ ◄──┐              │
//! │   └───────┘ ◄─────────────────────── └──────────────┘ ───┘              │
//! │              clear()                    on_updated(loc')                │
//! │              search submitted           (same id: refresh)              │
//! │              on_deleted(loc.id)                                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The focused record is a copy, so the controller must forward every
//! update and delete here; that is what keeps it from going stale.

use crate::types::{Location, LocationId};

/// The single focused location, if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Selection {
    #[default]
    Empty,
    Focused(Location),
}

impl Selection {
    /// Focuses `location`, replacing any previous focus.
    pub fn select(&mut self, location: Location) {
        *self = Selection::Focused(location);
    }

    pub fn clear(&mut self) {
        *self = Selection::Empty;
    }

    /// The focused record.
    pub fn focused(&self) -> Option<&Location> {
        match self {
            Selection::Empty => None,
            Selection::Focused(location) => Some(location),
        }
    }

    pub fn focused_id(&self) -> Option<LocationId> {
        self.focused().map(|l| l.id)
    }

    pub fn is_focused_on(&self, id: LocationId) -> bool {
        self.focused_id() == Some(id)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Selection::Empty)
    }

    /// Reacts to a deletion: clears the focus if it pointed at `id`.
    ///
    /// ## Returns
    /// `true` if the selection was cleared.
    pub fn on_deleted(&mut self, id: LocationId) -> bool {
        if self.is_focused_on(id) {
            self.clear();
            true
        } else {
            false
        }
    }

    /// Reacts to an update: refreshes the focus if it is the same record.
    ///
    /// ## Returns
    /// `true` if the focused copy was replaced.
    pub fn on_updated(&mut self, location: &Location) -> bool {
        match self {
            Selection::Focused(current) if current.id == location.id => {
                *current = location.clone();
                true
            }
            _ => false,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    fn location(id: i64, name: &str) -> Location {
        Location {
            id: LocationId::new(id),
            name: name.to_string(),
            lat: 1.0,
            lng: 2.0,
            category: Category::City,
            description: String::new(),
            image_url: None,
            place_id: None,
            created_at: None,
        }
    }

    #[test]
    fn test_select_and_clear() {
        let mut selection = Selection::default();
        assert!(selection.is_empty());

        selection.select(location(1, "a"));
        assert_eq!(selection.focused_id(), Some(LocationId::new(1)));

        selection.clear();
        assert!(selection.focused().is_none());
    }

    #[test]
    fn test_on_deleted_only_clears_matching_focus() {
        let mut selection = Selection::default();
        selection.select(location(1, "a"));

        assert!(!selection.on_deleted(LocationId::new(2)));
        assert!(selection.is_focused_on(LocationId::new(1)));

        assert!(selection.on_deleted(LocationId::new(1)));
        assert!(selection.is_empty());
    }

    #[test]
    fn test_on_updated_refreshes_same_record() {
        let mut selection = Selection::default();
        selection.select(location(1, "old"));

        assert!(!selection.on_updated(&location(2, "other")));
        assert_eq!(selection.focused().unwrap().name, "old");

        assert!(selection.on_updated(&location(1, "new")));
        assert_eq!(selection.focused().unwrap().name, "new");
    }

    #[test]
    fn test_on_updated_when_empty_stays_empty() {
        let mut selection = Selection::Empty;
        assert!(!selection.on_updated(&location(1, "a")));
        assert!(selection.is_empty());
    }
}
