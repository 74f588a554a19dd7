//! # Location List
//!
//! The in-memory, ordered collection behind the location store.
//!
//! ## Invariants
//! - Identifiers are unique within the list
//! - Order is load/insertion order (the hosted table loads newest first)
//! - Mutations never reorder surviving records
//!
//! Persistence is not this type's concern: the controller writes a record
//! here only after its persistence target confirmed the change.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{Location, LocationId};

/// Ordered collection of locations with unique identifiers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationList {
    items: Vec<Location>,
}

impl LocationList {
    /// Creates an empty list.
    pub fn new() -> Self {
        LocationList { items: Vec::new() }
    }

    /// Builds a list from loaded records.
    ///
    /// Records repeating an earlier identifier are dropped; the first
    /// occurrence wins.
    pub fn from_vec(locations: Vec<Location>) -> Self {
        let mut list = LocationList::new();
        for location in locations {
            if !list.contains(location.id) {
                list.items.push(location);
            }
        }
        list
    }

    /// All locations in order.
    #[inline]
    pub fn list(&self) -> &[Location] {
        &self.items
    }

    /// Looks up a location by identifier.
    pub fn get(&self, id: LocationId) -> Option<&Location> {
        self.items.iter().find(|l| l.id == id)
    }

    pub fn contains(&self, id: LocationId) -> bool {
        self.items.iter().any(|l| l.id == id)
    }

    /// Appends a confirmed record.
    ///
    /// ## Returns
    /// - `Err(CoreError::DuplicateLocation)` if the identifier is taken
    pub fn push(&mut self, location: Location) -> CoreResult<()> {
        if self.contains(location.id) {
            return Err(CoreError::DuplicateLocation(location.id.get()));
        }
        self.items.push(location);
        Ok(())
    }

    /// Replaces the record with the same identifier, keeping its position.
    ///
    /// ## Returns
    /// The previous record, or `None` (and no change) if the id is unknown.
    pub fn replace(&mut self, location: Location) -> Option<Location> {
        let slot = self.items.iter_mut().find(|l| l.id == location.id)?;
        Some(std::mem::replace(slot, location))
    }

    /// Removes the record with `id`, returning it if present.
    pub fn remove(&mut self, id: LocationId) -> Option<Location> {
        let index = self.items.iter().position(|l| l.id == id)?;
        Some(self.items.remove(index))
    }

    /// Identifier for a record created without a remote authority.
    ///
    /// One past the largest identifier in use, starting at 1.
    pub fn next_local_id(&self) -> LocationId {
        let max = self.items.iter().map(|l| l.id.get()).max().unwrap_or(0);
        LocationId::new(max + 1)
    }

    /// Identifiers in order.
    pub fn ids(&self) -> impl Iterator<Item = LocationId> + '_ {
        self.items.iter().map(|l| l.id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consumes the list, returning its records.
    pub fn into_vec(self) -> Vec<Location> {
        self.items
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
            lat: 0.0,
            lng: 0.0,
            category: Category::City,
            description: String::new(),
            image_url: None,
            place_id: None,
            created_at: None,
        }
    }

    #[test]
    fn test_from_vec_drops_duplicates() {
        let list = LocationList::from_vec(vec![
            location(1, "first"),
            location(2, "second"),
            location(1, "again"),
        ]);
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(LocationId::new(1)).unwrap().name, "first");
    }

    #[test]
    fn test_push_rejects_duplicate() {
        let mut list = LocationList::new();
        list.push(location(1, "a")).unwrap();
        assert!(list.push(location(1, "b")).is_err());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut list = LocationList::from_vec(vec![location(1, "a"), location(2, "b")]);
        let previous = list.replace(location(1, "a2")).unwrap();
        assert_eq!(previous.name, "a");
        assert_eq!(list.list()[0].name, "a2");

        assert!(list.replace(location(9, "missing")).is_none());
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_remove() {
        let mut list = LocationList::from_vec(vec![location(1, "a"), location(2, "b")]);
        assert!(list.remove(LocationId::new(1)).is_some());
        assert!(list.remove(LocationId::new(1)).is_none());
        assert_eq!(list.ids().collect::<Vec<_>>(), vec![LocationId::new(2)]);
    }

    #[test]
    fn test_next_local_id() {
        assert_eq!(LocationList::new().next_local_id(), LocationId::new(1));
        let list = LocationList::from_vec(vec![location(3, "a"), location(7, "b")]);
        assert_eq!(list.next_local_id(), LocationId::new(8));
    }
}
