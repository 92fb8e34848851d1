// crates/contact-desk-config/src/lib.rs
// ============================================================================
// Module: Contact Desk Configuration
// Description: Canonical configuration model, loading, and validation.
// Purpose: Provide fail-closed config input handling for process bootstrap.
// Dependencies: contact-desk-store-sqlite, serde, thiserror, toml
// ============================================================================

//! ## Overview
//! Configuration loads from a TOML file (or defaults when no file is given)
//! and validates fail-closed: oversized files, non-UTF-8 content, unknown
//! keys, and out-of-range values are all rejected before the server starts.
//! Config files are untrusted input.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::SocketAddr;
use std::path::Path;
use std::path::PathBuf;

use contact_desk_store_sqlite::SqliteStoreConfig;
use contact_desk_store_sqlite::SqliteStoreMode;
use contact_desk_store_sqlite::SqliteSyncMode;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum accepted config file size in bytes.
const MAX_CONFIG_BYTES: u64 = 1024 * 1024;
/// Maximum length of a single config path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total config path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Default server bind address (loopback only).
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
/// Default request body cap in bytes.
const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024;
/// Default database file path.
const DEFAULT_STORE_PATH: &str = "contact-desk.db";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration errors.
///
/// # Invariants
/// - Messages never embed config file contents, only structural detail.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("config io error: {0}")]
    Io(String),
    /// Config file failed structural checks before parsing.
    #[error("config rejected: {0}")]
    Rejected(String),
    /// Config file failed TOML parsing.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Config values failed validation.
    #[error("config invalid: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Model
// ============================================================================

/// Server section of the configuration.
///
/// # Invariants
/// - `bind_addr` must parse as a socket address.
/// - `max_body_bytes` is greater than zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    /// Socket address the HTTP server binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Maximum accepted request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

/// Store section of the configuration.
///
/// Mirrors [`SqliteStoreConfig`] so the file format stays flat and the
/// store crate keeps its own serde defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    /// Path to the `SQLite` database file.
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
    /// Busy timeout in milliseconds.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
    /// `SQLite` journal mode.
    #[serde(default)]
    pub journal_mode: SqliteStoreMode,
    /// `SQLite` sync mode.
    #[serde(default)]
    pub sync_mode: SqliteSyncMode,
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            busy_timeout_ms: default_busy_timeout_ms(),
            journal_mode: SqliteStoreMode::default(),
            sync_mode: SqliteSyncMode::default(),
        }
    }
}

impl StoreSection {
    /// Converts the section into the store crate's configuration type.
    #[must_use]
    pub fn to_sqlite_config(&self) -> SqliteStoreConfig {
        SqliteStoreConfig {
            path: self.path.clone(),
            busy_timeout_ms: self.busy_timeout_ms,
            journal_mode: self.journal_mode,
            sync_mode: self.sync_mode,
        }
    }
}

/// Top-level Contact Desk configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContactDeskConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerSection,
    /// `SQLite` store settings.
    #[serde(default)]
    pub store: StoreSection,
}

/// Returns the default bind address.
fn default_bind_addr() -> String {
    DEFAULT_BIND_ADDR.to_string()
}

/// Returns the default request body cap.
const fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

/// Returns the default database path.
fn default_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_PATH)
}

/// Returns the default store busy timeout.
const fn default_busy_timeout_ms() -> u64 {
    5_000
}

// ============================================================================
// SECTION: Loading
// ============================================================================

impl ContactDeskConfig {
    /// Loads configuration from the given path, or defaults when `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the path fails structural guards, the
    /// file cannot be read or parsed, or validation rejects a value.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            None => Self::default(),
            Some(path) => {
                validate_config_path(path)?;
                let metadata =
                    std::fs::metadata(path).map_err(|err| ConfigError::Io(err.to_string()))?;
                if metadata.len() > MAX_CONFIG_BYTES {
                    return Err(ConfigError::Rejected(format!(
                        "config file exceeds size limit: {} bytes (max {MAX_CONFIG_BYTES})",
                        metadata.len()
                    )));
                }
                let bytes =
                    std::fs::read(path).map_err(|err| ConfigError::Io(err.to_string()))?;
                let text = String::from_utf8(bytes).map_err(|_| {
                    ConfigError::Rejected("config file must be utf-8".to_string())
                })?;
                toml::from_str(&text).map_err(|err| ConfigError::Parse(err.to_string()))?
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates loaded values beyond what serde enforces.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for out-of-range or malformed
    /// values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.bind_addr.parse::<SocketAddr>().is_err() {
            return Err(ConfigError::Invalid(format!(
                "bind_addr is not a socket address: {}",
                self.server.bind_addr
            )));
        }
        if self.server.max_body_bytes == 0 {
            return Err(ConfigError::Invalid(
                "max_body_bytes must be greater than zero".to_string(),
            ));
        }
        if self.store.busy_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "busy_timeout_ms must be greater than zero".to_string(),
            ));
        }
        if self.store.path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("store path must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Validates the config file path before touching the filesystem.
fn validate_config_path(path: &Path) -> Result<(), ConfigError> {
    let display = path.display().to_string();
    if display.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Rejected(format!(
            "config path exceeds max length: {} (max {MAX_TOTAL_PATH_LENGTH})",
            display.len()
        )));
    }
    for component in path.components() {
        let component_text = component.as_os_str().to_string_lossy();
        if component_text.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Rejected(format!(
                "config path component too long: {} (max {MAX_PATH_COMPONENT_LENGTH})",
                component_text.len()
            )));
        }
    }
    Ok(())
}
