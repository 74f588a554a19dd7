//! # waymark-remote: Hosted Table Client
//!
//! The persistent remote table collaborator. Every location mutation in
//! remote mode is a single request here, and the shell applies the result to
//! its in-memory state only after the request succeeded.
//!
//! ## Request Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  RemoteClient                      HTTP                                 │
//! │  ─────────────────────────         ───────────────────────────────────  │
//! │  list_locations()          ──►     GET    /rest/v1/locations            │
//! │                                           ?select=*&order=created_at.desc│
//! │  insert_location(&new)     ──►     POST   /rest/v1/locations            │
//! │  update_location(&loc)     ──►     PATCH  /rest/v1/locations?id=eq.{id} │
//! │  delete_location(id)       ──►     DELETE /rest/v1/locations?id=eq.{id} │
//! │  create_trip(name)         ──►     POST   /rest/v1/trips?select=id      │
//! │                                                                         │
//! │  Headers: apikey, Authorization: Bearer, Prefer: return=representation  │
//! │  Non-2xx  ──► RemoteError::Rejected { status, message }                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No retries and no optimistic writes happen here; a failed call is
//! reported once and the caller decides what the user sees.

pub mod client;
pub mod config;
pub mod error;
pub mod row;

pub use client::{RemoteClient, TripId};
pub use config::RemoteConfig;
pub use error::{RemoteError, RemoteResult};
pub use row::LocationRow;
