//! # Shell Error Types
//!
//! Two layers of errors live here.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Waymark                                │
//! │                                                                         │
//! │  Command handler                                                        │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  AppState (controller)                                           │  │
//! │  │  Result<T, StoreError>                                           │  │
//! │  │         │                                                        │  │
//! │  │         ├── draft rejected ──── StoreError::Validation ──┐       │  │
//! │  │         │                                                │       │  │
//! │  │         └── backend failed ──── StoreError::Persistence ─┤       │  │
//! │  │              (DbError / RemoteError)                     │       │  │
//! │  └──────────────────────────────────────────────────────────┼───────┘  │
//! │                                                             ▼          │
//! │  AppError { code, message } ──────────────────────► notification line  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `StoreError` is the controller's taxonomy: a mutation either fails
//! validation before any persistence call, or the persistence target
//! rejects it. In both cases the in-memory state is left unchanged.

use serde::Serialize;
use thiserror::Error;
use waymark_core::{CoreError, ValidationError};
use waymark_db::DbError;
use waymark_remote::RemoteError;

// =============================================================================
// Store Error
// =============================================================================

/// Result type alias for controller operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors returned by [`AppState`](crate::state::AppState) mutations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// Missing or malformed input, rejected before any persistence call.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The persistence target rejected the call or could not be reached.
    ///
    /// ## When This Occurs
    /// - The hosted table refused a write (row-level security, constraints)
    /// - The network call failed or timed out
    /// - The local snapshot could not be written
    #[error("{0}")]
    Persistence(String),
}

impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        StoreError::Persistence(format!("Local storage failed: {err}"))
    }
}

impl From<RemoteError> for StoreError {
    fn from(err: RemoteError) -> Self {
        let message = match &err {
            RemoteError::Rejected { message, .. } => message.clone(),
            other => other.to_string(),
        };
        if err.is_transient() {
            StoreError::Persistence(format!("{message} (the service may be busy, try again)"))
        } else {
            StoreError::Persistence(message)
        }
    }
}

// =============================================================================
// App Error
// =============================================================================

/// Result type alias for shell commands.
pub type AppResult<T> = Result<T, AppError>;

/// Error shown to the user when a command fails.
///
/// ## Serialization
/// ```json
/// {
///   "code": "PERSISTENCE",
///   "message": "new row violates row-level security policy"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for shell notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed
    Validation,

    /// The persistence target rejected the call
    Persistence,

    /// No location with the given id
    NotFound,

    /// The command needs a selected location
    NoSelection,

    /// Configuration is missing or invalid
    Config,

    /// Anything else
    Internal,
}

impl AppError {
    /// Creates a new error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(id: impl std::fmt::Display) -> Self {
        AppError::new(ErrorCode::NotFound, format!("Location not found: {id}"))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Validation, message)
    }

    /// Creates a "select a location first" error.
    pub fn no_selection() -> Self {
        AppError::new(ErrorCode::NoSelection, "Select a location first")
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Config, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(e) => AppError::validation(e.to_string()),
            StoreError::Persistence(message) => AppError::new(ErrorCode::Persistence, message),
        }
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::LocationNotFound(id) => AppError::not_found(id),
            CoreError::DuplicateLocation(id) => {
                AppError::internal(format!("Location {id} already exists"))
            }
            CoreError::UnknownCategory(value) => AppError::validation(format!(
                "Unknown category '{value}'. Use all, {}",
                waymark_core::Category::allowed_values().join(", ")
            )),
            CoreError::Validation(e) => AppError::validation(e.to_string()),
        }
    }
}

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => {
                AppError::new(ErrorCode::NotFound, format!("{entity} not found: {id}"))
            }
            DbError::ConnectionFailed(reason) | DbError::MigrationFailed(reason) => {
                tracing::error!("Database unavailable: {}", reason);
                AppError::new(ErrorCode::Persistence, "Local database is unavailable")
            }
            other => {
                tracing::error!("Database operation failed: {}", other);
                AppError::new(ErrorCode::Persistence, "Local storage operation failed")
            }
        }
    }
}

impl From<RemoteError> for AppError {
    fn from(err: RemoteError) -> Self {
        if err.is_config_error() {
            return AppError::config(err.to_string());
        }
        AppError::from(StoreError::from(err))
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}
