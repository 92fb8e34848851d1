// crates/contact-desk-store-sqlite/src/store.rs
// ============================================================================
// Module: SQLite Contact Store
// Description: Durable ContactStore backed by SQLite WAL.
// Purpose: Persist contact records with parameterized single-statement CRUD.
// Dependencies: contact-desk-core, rusqlite, serde, thiserror
// ============================================================================

//! ## Overview
//! This module implements a durable [`ContactStore`] using `SQLite`. Each
//! operation is a single parameterized statement; there are no cross-call
//! transactions and no in-memory cache. The connection handle is constructed
//! by process bootstrap and owned by the store value, never a lazy global.
//! Database contents are untrusted; row decoding fails closed on malformed
//! identifiers.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use contact_desk_core::Contact;
use contact_desk_core::ContactFields;
use contact_desk_core::ContactId;
use contact_desk_core::ContactStore;
use contact_desk_core::ListPage;
use contact_desk_core::StoreError;
use rusqlite::Connection;
use rusqlite::OpenFlags;
use rusqlite::OptionalExtension;
use rusqlite::Row;
use rusqlite::params;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// `SQLite` schema version for the store.
const SCHEMA_VERSION: i64 = 1;
/// Default busy timeout (ms).
const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;
/// Maximum length of a single path component.
const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Column list shared by every row-returning statement.
const CONTACT_COLUMNS: &str = "id, name, email, phone, title, created";

// ============================================================================
// SECTION: Config
// ============================================================================

/// `SQLite` journal mode configuration.
///
/// # Invariants
/// - Values map 1:1 to `SQLite` `journal_mode` pragma settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteStoreMode {
    /// WAL journal mode (recommended).
    #[default]
    Wal,
    /// Delete journal mode (legacy).
    Delete,
}

impl SqliteStoreMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Wal => "wal",
            Self::Delete => "delete",
        }
    }
}

/// `SQLite` sync mode configuration.
///
/// # Invariants
/// - Values map 1:1 to `SQLite` `synchronous` pragma settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SqliteSyncMode {
    /// Full synchronous mode (safest).
    #[default]
    Full,
    /// Normal synchronous mode (balanced).
    Normal,
}

impl SqliteSyncMode {
    /// Returns the `SQLite` pragma value.
    #[must_use]
    pub const fn pragma_value(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Normal => "normal",
        }
    }
}

/// Configuration for the `SQLite` contact store.
///
/// # Invariants
/// - `path` must resolve to a file path (not a directory).
/// - `busy_timeout_ms` is interpreted as milliseconds.
#[derive(Debug, Clone, Deserialize)]
pub struct SqliteStoreConfig {
    /// Path to the `SQLite` database file.
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

/// Returns the default busy timeout for `SQLite` connections.
const fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// `SQLite` store errors.
///
/// # Invariants
/// - Error messages avoid embedding contact field values.
#[derive(Debug, Error, Clone)]
pub enum SqliteStoreError {
    /// Store I/O error.
    #[error("sqlite store io error: {0}")]
    Io(String),
    /// `SQLite` engine error.
    #[error("sqlite store db error: {0}")]
    Db(String),
    /// Store schema version mismatch.
    #[error("sqlite store version mismatch: {0}")]
    VersionMismatch(String),
    /// Invalid store data.
    #[error("sqlite store invalid data: {0}")]
    Invalid(String),
}

impl From<SqliteStoreError> for StoreError {
    fn from(error: SqliteStoreError) -> Self {
        match error {
            SqliteStoreError::Io(message) => Self::Io(message),
            SqliteStoreError::Db(message) => Self::Db(message),
            SqliteStoreError::VersionMismatch(message) => Self::VersionMismatch(message),
            SqliteStoreError::Invalid(message) => Self::Invalid(message),
        }
    }
}

/// Maps a `rusqlite` error into a store error.
fn db_error(error: &rusqlite::Error) -> SqliteStoreError {
    SqliteStoreError::Db(error.to_string())
}

// ============================================================================
// SECTION: Store
// ============================================================================

/// `SQLite`-backed contact store with WAL support.
///
/// # Invariants
/// - Connection access is serialized through a mutex; `SQLite` itself
///   provides the only write locking in the system.
/// - Identifiers are assigned by the database (`INSERT` never names `id`).
#[derive(Clone)]
pub struct SqliteContactStore {
    /// Shared connection guarded by a mutex.
    connection: Arc<Mutex<Connection>>,
}

impl SqliteContactStore {
    /// Opens (creating if necessary) the store at the configured path.
    ///
    /// # Errors
    ///
    /// Returns [`SqliteStoreError`] when the path is invalid, the database
    /// cannot be opened, or the stored schema version is unsupported.
    pub fn new(config: &SqliteStoreConfig) -> Result<Self, SqliteStoreError> {
        validate_store_path(&config.path)?;
        ensure_parent_dir(&config.path)?;
        let connection = open_connection(config)?;
        init_schema(&connection)?;
        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    /// Locks the shared connection, surfacing poisoning as a db error.
    fn lock(&self) -> Result<MutexGuard<'_, Connection>, SqliteStoreError> {
        self.connection
            .lock()
            .map_err(|_| SqliteStoreError::Db("connection mutex poisoned".to_string()))
    }
}

/// Decodes one contact row in [`CONTACT_COLUMNS`] order.
fn row_to_contact(row: &Row<'_>) -> rusqlite::Result<(i64, ContactFields)> {
    let id: i64 = row.get(0)?;
    let fields = ContactFields {
        name: row.get(1)?,
        email: row.get(2)?,
        phone: row.get(3)?,
        title: row.get(4)?,
        created: row.get(5)?,
    };
    Ok((id, fields))
}

/// Converts a decoded row into a contact, failing closed on a bad id.
fn decode_contact(raw_id: i64, fields: ContactFields) -> Result<Contact, SqliteStoreError> {
    let id = ContactId::from_raw(raw_id)
        .ok_or_else(|| SqliteStoreError::Invalid(format!("non-positive row id: {raw_id}")))?;
    Ok(fields.into_contact(id))
}

impl ContactStore for SqliteContactStore {
    fn list_page(&self, page: Option<ListPage>) -> Result<Vec<Contact>, StoreError> {
        let guard = self.lock()?;
        let sql = format!("SELECT {CONTACT_COLUMNS} FROM contacts ORDER BY id ASC");
        let rows = match page {
            Some(window) => {
                let sql = format!("{sql} LIMIT ?1 OFFSET ?2");
                let mut statement = guard.prepare(&sql).map_err(|err| db_error(&err))?;
                let mapped = statement
                    .query_map(
                        params![i64::from(window.limit), i64::from(window.offset)],
                        row_to_contact,
                    )
                    .map_err(|err| db_error(&err))?;
                mapped.collect::<rusqlite::Result<Vec<_>>>().map_err(|err| db_error(&err))?
            }
            None => {
                let mut statement = guard.prepare(&sql).map_err(|err| db_error(&err))?;
                let mapped =
                    statement.query_map(params![], row_to_contact).map_err(|err| db_error(&err))?;
                mapped.collect::<rusqlite::Result<Vec<_>>>().map_err(|err| db_error(&err))?
            }
        };
        let mut contacts = Vec::with_capacity(rows.len());
        for (raw_id, fields) in rows {
            contacts.push(decode_contact(raw_id, fields)?);
        }
        Ok(contacts)
    }

    fn get_by_id(&self, id: ContactId) -> Result<Option<Contact>, StoreError> {
        let guard = self.lock()?;
        let sql = format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = ?1");
        let row = guard
            .query_row(&sql, params![id.get()], row_to_contact)
            .optional()
            .map_err(|err| db_error(&err))?;
        match row {
            Some((raw_id, fields)) => Ok(Some(decode_contact(raw_id, fields)?)),
            None => Ok(None),
        }
    }

    fn count(&self) -> Result<u64, StoreError> {
        let guard = self.lock()?;
        let total: i64 = guard
            .query_row("SELECT COUNT(1) FROM contacts", params![], |row| row.get(0))
            .map_err(|err| db_error(&err))?;
        u64::try_from(total)
            .map_err(|_| SqliteStoreError::Invalid(format!("negative row count: {total}")).into())
    }

    fn create(&self, fields: &ContactFields) -> Result<ContactId, StoreError> {
        let guard = self.lock()?;
        guard
            .execute(
                "INSERT INTO contacts (name, email, phone, title, created) VALUES (?1, ?2, ?3, \
                 ?4, ?5)",
                params![fields.name, fields.email, fields.phone, fields.title, fields.created],
            )
            .map_err(|err| db_error(&err))?;
        let raw_id = guard.last_insert_rowid();
        ContactId::from_raw(raw_id).ok_or_else(|| {
            SqliteStoreError::Invalid(format!("insert produced non-positive id: {raw_id}")).into()
        })
    }

    fn update(&self, id: ContactId, fields: &ContactFields) -> Result<bool, StoreError> {
        let guard = self.lock()?;
        let affected = guard
            .execute(
                "UPDATE contacts SET name = ?1, email = ?2, phone = ?3, title = ?4, created = ?5 \
                 WHERE id = ?6",
                params![
                    fields.name,
                    fields.email,
                    fields.phone,
                    fields.title,
                    fields.created,
                    id.get()
                ],
            )
            .map_err(|err| db_error(&err))?;
        Ok(affected > 0)
    }

    fn delete(&self, id: ContactId) -> Result<bool, StoreError> {
        let guard = self.lock()?;
        let affected = guard
            .execute("DELETE FROM contacts WHERE id = ?1", params![id.get()])
            .map_err(|err| db_error(&err))?;
        Ok(affected > 0)
    }

    fn readiness(&self) -> Result<(), StoreError> {
        let guard = self.lock()?;
        guard
            .query_row("SELECT 1", [], |_row| Ok(()))
            .map_err(|err| db_error(&err))?;
        Ok(())
    }
}

// ============================================================================
// SECTION: Connection Setup
// ============================================================================

/// Validates the configured database path before opening.
fn validate_store_path(path: &Path) -> Result<(), SqliteStoreError> {
    let display = path.display().to_string();
    if display.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(SqliteStoreError::Invalid(format!(
            "store path exceeds max length: {} (max {MAX_TOTAL_PATH_LENGTH})",
            display.len()
        )));
    }
    for component in path.components() {
        let component_text = component.as_os_str().to_string_lossy();
        if component_text.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(SqliteStoreError::Invalid(format!(
                "store path component too long: {} (max {MAX_PATH_COMPONENT_LENGTH})",
                component_text.len()
            )));
        }
    }
    if path.is_dir() {
        return Err(SqliteStoreError::Invalid(format!("store path is a directory: {display}")));
    }
    Ok(())
}

/// Creates the parent directory of the database file when missing.
fn ensure_parent_dir(path: &Path) -> Result<(), SqliteStoreError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|err| SqliteStoreError::Io(err.to_string()))?;
    }
    Ok(())
}

/// Opens the database connection and applies pragmas.
fn open_connection(config: &SqliteStoreConfig) -> Result<Connection, SqliteStoreError> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE;
    let connection = Connection::open_with_flags(&config.path, flags)
        .map_err(|err| SqliteStoreError::Io(err.to_string()))?;
    apply_pragmas(&connection, config)?;
    Ok(connection)
}

/// Applies busy timeout, journal, sync, and foreign-key pragmas.
fn apply_pragmas(
    connection: &Connection,
    config: &SqliteStoreConfig,
) -> Result<(), SqliteStoreError> {
    let timeout = i64::try_from(config.busy_timeout_ms).map_err(|_| {
        SqliteStoreError::Invalid(format!(
            "busy_timeout_ms out of range: {}",
            config.busy_timeout_ms
        ))
    })?;
    connection
        .pragma_update(None, "busy_timeout", timeout)
        .map_err(|err| db_error(&err))?;
    connection
        .pragma_update(None, "journal_mode", config.journal_mode.pragma_value())
        .map_err(|err| db_error(&err))?;
    connection
        .pragma_update(None, "synchronous", config.sync_mode.pragma_value())
        .map_err(|err| db_error(&err))?;
    connection.pragma_update(None, "foreign_keys", "on").map_err(|err| db_error(&err))?;
    Ok(())
}

/// Creates the schema and verifies the stored schema version.
fn init_schema(connection: &Connection) -> Result<(), SqliteStoreError> {
    connection
        .execute_batch("CREATE TABLE IF NOT EXISTS store_meta (version INTEGER NOT NULL);")
        .map_err(|err| db_error(&err))?;
    let stored: Option<i64> = connection
        .query_row("SELECT version FROM store_meta LIMIT 1", params![], |row| row.get(0))
        .optional()
        .map_err(|err| db_error(&err))?;
    match stored {
        None => {
            connection
                .execute("INSERT INTO store_meta (version) VALUES (?1)", params![SCHEMA_VERSION])
                .map_err(|err| db_error(&err))?;
        }
        Some(version) if version == SCHEMA_VERSION => {}
        Some(version) => {
            return Err(SqliteStoreError::VersionMismatch(format!(
                "unsupported schema version: {version} (expected {SCHEMA_VERSION})"
            )));
        }
    }
    connection
        .execute_batch(
            "CREATE TABLE IF NOT EXISTS contacts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                phone TEXT NOT NULL,
                title TEXT,
                created TEXT NOT NULL
            );",
        )
        .map_err(|err| db_error(&err))?;
    Ok(())
}
