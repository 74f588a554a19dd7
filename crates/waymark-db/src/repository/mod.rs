//! # Repository Module
//!
//! Local storage repositories for Waymark.
//!
//! ## Layering
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  AppState                                                              │
//! │       │                                                                 │
//! │       ├── db.favorites().save(&favorites)                              │
//! │       └── db.snapshots().save(store.list())                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  FavoritesRepository / SnapshotRepository   (typed, JSON documents)    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  KvRepository                                (raw strings by key)      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  local_storage table                                                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`kv::KvRepository`] - Raw key/value access
//! - [`favorites::FavoritesRepository`] - The favorite identifier collection
//! - [`snapshot::SnapshotRepository`] - The full location collection

pub mod favorites;
pub mod kv;
pub mod snapshot;
