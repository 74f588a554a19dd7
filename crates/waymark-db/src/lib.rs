//! # waymark-db: Local Storage Layer for Waymark
//!
//! This crate is the local persistent key/value collaborator. It stores two
//! logical keys in SQLite through sqlx:
//!
//! - the favorites identifier collection
//! - the full location collection (local-only mode)
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Waymark Data Flow                                │
//! │                                                                         │
//! │  AppState (toggle_favorite / add / delete)                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    waymark-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │                │    │  (embedded)  │  │   │
//! │  │   │               │    │ KvRepository   │    │ 001_local_   │  │   │
//! │  │   │ SqlitePool    │◄───│ FavoritesRepo  │    │  storage.sql │  │   │
//! │  │   │               │    │ SnapshotRepo   │    │              │  │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   <data dir>/waymark/waymark.db                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Key/value, favorites and snapshot repositories
//! - [`seed`] - Demo locations for local-only mode
//!
//! ## Usage
//!
//! ```rust,ignore
//! use waymark_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/waymark.db")).await?;
//!
//! let mut favorites = db.favorites().load().await;
//! favorites.toggle(LocationId::new(3));
//! db.favorites().save(&favorites).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod seed;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::favorites::FavoritesRepository;
pub use repository::kv::KvRepository;
pub use repository::snapshot::SnapshotRepository;
