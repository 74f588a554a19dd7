//! # waymark-core: Pure State Logic for Waymark
//!
//! This crate is the **heart** of Waymark. It holds the location/favorites
//! state-management layer as plain data structures and pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Waymark Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Shell (apps/shell)                           │   │
//! │  │    map view ──► detail panel ──► favorites view                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ AppState (single controller)           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ waymark-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   store   │  │ favorites │  │  filter   │  │   │
//! │  │   │ Location  │  │ Location  │  │ Favorite  │  │  search   │  │   │
//! │  │   │ Category  │  │   List    │  │   Set     │  │ category  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │ selection │  │validation │  │directions │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                 │                                   │                   │
//! │  ┌──────────────▼──────────────┐   ┌────────────────▼───────────────┐  │
//! │  │  waymark-db (local KV)      │   │  waymark-remote (hosted table) │  │
//! │  └─────────────────────────────┘   └────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Location, Category, drafts and patches)
//! - [`store`] - Ordered in-memory location collection
//! - [`favorites`] - Favorite location identifiers
//! - [`selection`] - The single focused location
//! - [`filter`] - Text search and category projection
//! - [`validation`] - Draft and patch validation
//! - [`directions`] - External directions links
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use waymark_core::filter::search;
//! use waymark_core::validation::validate_draft;
//! use waymark_core::{LocationDraft, LocationId};
//!
//! let draft = LocationDraft::new("Hollywood", "34.092809", "-118.328659");
//! let new_location = validate_draft(&draft).unwrap();
//! let location = new_location.into_location(LocationId::new(1), None);
//!
//! let hits = search(&[location], "holly");
//! assert_eq!(hits.len(), 1);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod directions;
pub mod error;
pub mod favorites;
pub mod filter;
pub mod selection;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use waymark_core::Location` instead of
// `use waymark_core::types::Location`

pub use error::{CoreError, CoreResult, ValidationError};
pub use favorites::FavoriteSet;
pub use filter::{FilterState, SearchResult};
pub use selection::Selection;
pub use store::LocationList;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Local storage key holding the serialized favorite identifiers.
///
/// Kept identical to the key the web client has always used so that an
/// existing browser snapshot can be imported verbatim.
pub const FAVORITES_STORAGE_KEY: &str = "travel-guide-favorite-ids";

/// Local storage key holding the full location snapshot (local-only mode).
pub const LOCATIONS_STORAGE_KEY: &str = "travel-guide-locations";

/// Map center used before any location is selected (downtown Los Angeles).
pub const DEFAULT_MAP_CENTER: (f64, f64) = (34.052235, -118.243683);

/// Zoom level used for the default map center.
pub const DEFAULT_MAP_ZOOM: u8 = 12;

/// Maximum number of autocomplete suggestions shown for a place search.
pub const MAX_PLACE_SUGGESTIONS: usize = 5;

/// Maximum accepted length of a location name.
pub const MAX_NAME_LENGTH: usize = 200;
