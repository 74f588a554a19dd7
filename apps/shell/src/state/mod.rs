//! # State Module
//!
//! Application state for the shell.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  AppState (app.rs)                                              │   │
//! │  │  the only write surface for locations, favorites, selection    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                   │                              │                      │
//! │                   ▼                              ▼                      │
//! │  ┌──────────────────────────────┐  ┌──────────────────────────────┐    │
//! │  │  LocationBackend             │  │  FavoritesStore              │    │
//! │  │  LocalBackend | RemoteBackend│  │  LocalFavorites              │    │
//! │  │  (backend.rs)                │  │  (backend.rs)                │    │
//! │  └──────────────────────────────┘  └──────────────────────────────┘    │
//! │                                                                         │
//! │  AppConfig (config.rs): read-only after startup                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod app;
mod backend;
mod config;

pub use app::AppState;
pub use backend::{FavoritesStore, LocalBackend, LocalFavorites, LocationBackend, RemoteBackend};
pub use config::{AppConfig, StorageConfig, StorageMode, CONFIG_FILE_NAME, DATABASE_FILE_NAME};
