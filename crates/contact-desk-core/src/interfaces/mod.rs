// crates/contact-desk-core/src/interfaces/mod.rs
// ============================================================================
// Module: Contact Desk Interfaces
// Description: Backend-agnostic storage interface for contact records.
// Purpose: Define the contract surface implemented by storage backends.
// Dependencies: crate::core, thiserror
// ============================================================================

//! ## Overview
//! The [`ContactStore`] trait is the seam between the web layer and the
//! backing store. Implementations issue parameterized statements only and
//! must be safe to share across request-serving threads. Mutations on an
//! absent id report `false` rather than an error; callers pre-check
//! existence where the distinction matters.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

use crate::core::contact::Contact;
use crate::core::contact::ContactFields;
use crate::core::contact::ContactId;

// ============================================================================
// SECTION: Paging
// ============================================================================

/// Limit/offset window for list queries.
///
/// # Invariants
/// - `limit` bounds the row count; `offset` skips preceding rows.
/// - An out-of-range window yields an empty slice, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListPage {
    /// Maximum number of rows returned.
    pub limit: u32,
    /// Number of leading rows skipped.
    pub offset: u32,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Storage backend errors.
///
/// # Invariants
/// - Messages may carry driver detail for logs but are never rendered to
///   end users; the web layer substitutes generic text.
#[derive(Debug, Error, Clone)]
pub enum StoreError {
    /// Store I/O error (file system, permissions).
    #[error("store io error: {0}")]
    Io(String),
    /// Database engine error.
    #[error("store db error: {0}")]
    Db(String),
    /// Store schema version mismatch.
    #[error("store version mismatch: {0}")]
    VersionMismatch(String),
    /// Invalid store configuration or data.
    #[error("store invalid data: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Contact Store
// ============================================================================

/// Backend-agnostic contact repository.
///
/// All operations hit the backing store directly; there is no in-memory
/// cache and no transaction spans more than one call.
pub trait ContactStore: Send + Sync {
    /// Lists contacts ordered by ascending id.
    ///
    /// `None` returns all rows; `Some` applies the limit/offset window.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the query fails.
    fn list_page(&self, page: Option<ListPage>) -> Result<Vec<Contact>, StoreError>;

    /// Fetches one contact by id, or `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the query fails.
    fn get_by_id(&self, id: ContactId) -> Result<Option<Contact>, StoreError>;

    /// Returns the total row count.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the query fails.
    fn count(&self) -> Result<u64, StoreError>;

    /// Inserts a new contact and returns the store-assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the insert fails.
    fn create(&self, fields: &ContactFields) -> Result<ContactId, StoreError>;

    /// Overwrites all writable fields of an existing contact.
    ///
    /// Returns `false` (not an error) when no row matched the id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the statement fails.
    fn update(&self, id: ContactId, fields: &ContactFields) -> Result<bool, StoreError>;

    /// Deletes a contact by id.
    ///
    /// Returns `false` (not an error) when no row matched the id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the statement fails.
    fn delete(&self, id: ContactId) -> Result<bool, StoreError>;

    /// Probes the backing store for liveness.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the store is unreachable.
    fn readiness(&self) -> Result<(), StoreError>;
}
