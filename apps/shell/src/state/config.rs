//! # Shell Configuration
//!
//! Where locations are persisted and how to reach the hosted table.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command line flags (highest priority, applied by run())            │
//! │     --storage remote --trip <uuid>                                     │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     WAYMARK_STORAGE_MODE=remote                                        │
//! │     WAYMARK_REMOTE_URL=https://abcd1234.supabase.co                    │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     ~/.config/waymark/waymark.toml (Linux)                             │
//! │     ~/Library/Application Support/com.waymark.waymark/ (macOS)         │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     local storage in the platform data directory                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # waymark.toml
//! trip_id = "67e55044-10b1-426f-9247-bb680e5fe0c8"   # optional
//!
//! [storage]
//! mode = "remote"                # local | remote
//! database_path = "/tmp/waymark.db"
//!
//! [remote]
//! url = "https://abcd1234.supabase.co"
//! api_key = "eyJhbGciOi..."
//! table = "locations"
//! trips_table = "trips"
//! timeout_secs = 30
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use waymark_remote::{RemoteConfig, TripId};

use crate::error::{AppError, AppResult};

/// File name of the config file inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "waymark.toml";

/// File name of the local database inside the platform data directory.
pub const DATABASE_FILE_NAME: &str = "waymark.db";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "waymark", "waymark")
}

// =============================================================================
// Storage Mode
// =============================================================================

/// Where location records are persisted.
///
/// Favorites are always kept in the local database, whatever the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    /// Full snapshot in the local key/value store.
    #[default]
    Local,

    /// Rows in the hosted locations table.
    Remote,
}

impl fmt::Display for StorageMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageMode::Local => write!(f, "local"),
            StorageMode::Remote => write!(f, "remote"),
        }
    }
}

impl FromStr for StorageMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "local" | "offline" => Ok(StorageMode::Local),
            "remote" | "hosted" => Ok(StorageMode::Remote),
            other => Err(AppError::config(format!(
                "Unknown storage mode: '{other}'. Valid options: local, remote"
            ))),
        }
    }
}

// =============================================================================
// Storage Settings
// =============================================================================

/// `[storage]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub mode: StorageMode,

    /// SQLite file for favorites (and locations in local mode).
    /// Defaults to `waymark.db` in the platform data directory.
    #[serde(default)]
    pub database_path: Option<PathBuf>,
}

// =============================================================================
// App Config
// =============================================================================

/// Complete shell configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Trip to attach to in remote mode. Created at startup when unset.
    #[serde(default)]
    pub trip_id: Option<String>,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub remote: RemoteConfig,
}

impl AppConfig {
    /// Loads configuration from file and environment.
    ///
    /// An explicit `config_path` must exist; the default path is optional.
    pub fn load(config_path: Option<&Path>) -> AppResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parses a TOML config file.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::config(format!("Cannot read config file {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> AppResult<Self> {
        toml::from_str(contents).map_err(|e| AppError::config(format!("Invalid config file: {e}")))
    }

    /// Validates the configuration.
    ///
    /// ## Rules
    /// - remote mode needs a usable `[remote]` section
    /// - `trip_id`, when set, is a UUID
    pub fn validate(&self) -> AppResult<()> {
        if self.storage.mode == StorageMode::Remote {
            self.remote.validate()?;
        }
        self.trip_id()?;
        Ok(())
    }

    /// Applies `WAYMARK_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(mode) = lookup("WAYMARK_STORAGE_MODE") {
            match mode.parse() {
                Ok(parsed) => {
                    debug!(mode = %mode, "Overriding storage mode from environment");
                    self.storage.mode = parsed;
                }
                Err(_) => warn!(mode = %mode, "Unknown storage mode in environment"),
            }
        }

        if let Some(path) = lookup("WAYMARK_DB_PATH") {
            self.storage.database_path = Some(PathBuf::from(path));
        }

        if let Some(url) = lookup("WAYMARK_REMOTE_URL") {
            debug!(url = %url, "Overriding remote url from environment");
            self.remote.url = url;
        }

        if let Some(key) = lookup("WAYMARK_REMOTE_API_KEY") {
            self.remote.api_key = key;
        }

        if let Some(trip) = lookup("WAYMARK_TRIP_ID") {
            self.trip_id = Some(trip);
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// SQLite file path: the configured one, or the platform data directory.
    pub fn database_path(&self) -> AppResult<PathBuf> {
        if let Some(path) = &self.storage.database_path {
            return Ok(path.clone());
        }
        project_dirs()
            .map(|dirs| dirs.data_dir().join(DATABASE_FILE_NAME))
            .ok_or_else(|| AppError::config("Could not determine app data directory"))
    }

    /// Parsed trip id, if one is configured.
    pub fn trip_id(&self) -> AppResult<Option<TripId>> {
        match self.trip_id.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw
                .parse()
                .map(Some)
                .map_err(|e| AppError::config(format!("trip_id '{raw}' is not a UUID: {e}"))),
        }
    }

    pub fn mode(&self) -> StorageMode {
        self.storage.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_storage_mode_parsing() {
        assert_eq!("local".parse::<StorageMode>().unwrap(), StorageMode::Local);
        assert_eq!("Remote".parse::<StorageMode>().unwrap(), StorageMode::Remote);
        assert!("cloud-ish".parse::<StorageMode>().is_err());
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.mode(), StorageMode::Local);
        assert!(config.validate().is_ok());
        assert_eq!(config.remote.table, "locations");
    }

    #[test]
    fn test_remote_mode_requires_credentials() {
        let mut config = AppConfig::default();
        config.storage.mode = StorageMode::Remote;
        assert_eq!(config.validate().unwrap_err().code, ErrorCode::Config);

        config.remote = RemoteConfig::new("https://example.supabase.co", "anon-key");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_trip_id_must_be_uuid() {
        let mut config = AppConfig::default();
        config.trip_id = Some("my-trip".into());
        assert!(config.validate().is_err());

        config.trip_id = Some("67e55044-10b1-426f-9247-bb680e5fe0c8".into());
        assert!(config.trip_id().unwrap().is_some());

        config.trip_id = Some("  ".into());
        assert_eq!(config.trip_id().unwrap(), None);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[storage]
mode = "remote"
database_path = "/tmp/waymark-test.db"

[remote]
url = "https://example.supabase.co"
api_key = "anon-key"
"#
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.mode(), StorageMode::Remote);
        assert_eq!(
            config.database_path().unwrap(),
            PathBuf::from("/tmp/waymark-test.db")
        );
        assert_eq!(config.remote.trips_table, "trips");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert_eq!(err.code, ErrorCode::Config);
    }

    #[test]
    fn test_invalid_toml_is_error() {
        let err = AppConfig::from_toml_str("[storage\nmode = ").unwrap_err();
        assert_eq!(err.code, ErrorCode::Config);
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("WAYMARK_STORAGE_MODE", "remote"),
            ("WAYMARK_DB_PATH", "/tmp/override.db"),
            ("WAYMARK_REMOTE_URL", "https://override.supabase.co"),
            ("WAYMARK_REMOTE_API_KEY", "override-key"),
        ]);

        let mut config = AppConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.mode(), StorageMode::Remote);
        assert_eq!(config.remote.url, "https://override.supabase.co");
        assert_eq!(config.remote.api_key, "override-key");
        assert_eq!(
            config.storage.database_path,
            Some(PathBuf::from("/tmp/override.db"))
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_mode_override_is_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides(|key| (key == "WAYMARK_STORAGE_MODE").then(|| "sideways".into()));
        assert_eq!(config.mode(), StorageMode::Local);
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = toml::to_string_pretty(&AppConfig::default()).unwrap();
        assert!(toml_str.contains("[storage]"));
        assert!(toml_str.contains("[remote]"));
    }
}
