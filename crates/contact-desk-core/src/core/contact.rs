// crates/contact-desk-core/src/core/contact.rs
// ============================================================================
// Module: Contact Records
// Description: Contact identifier and record types.
// Purpose: Provide strongly typed contact records with stable wire forms.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! This module defines the single domain entity managed by Contact Desk.
//! Identifiers are store-assigned and 1-based; callers never supply them on
//! write paths. [`ContactFields`] is the writable subset parsed from a form
//! body and deliberately carries no identifier.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::num::NonZeroI64;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Identifier
// ============================================================================

/// Contact record identifier assigned by the backing store.
///
/// # Invariants
/// - Always >= 1 (non-zero, 1-based, SQLite rowid semantics).
/// - Immutable once assigned; never accepted from a request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(NonZeroI64);

impl ContactId {
    /// Creates a contact identifier from a non-zero value.
    #[must_use]
    pub const fn new(id: NonZeroI64) -> Self {
        Self(id)
    }

    /// Creates a contact identifier from a raw value (returns `None` if zero
    /// or negative).
    #[must_use]
    pub fn from_raw(raw: i64) -> Option<Self> {
        if raw < 1 {
            return None;
        }
        NonZeroI64::new(raw).map(Self)
    }

    /// Parses a contact identifier from a decimal path segment.
    ///
    /// Returns `None` for non-numeric, zero, or negative input so callers
    /// can treat a malformed id the same as an absent record.
    #[must_use]
    pub fn parse(segment: &str) -> Option<Self> {
        segment.trim().parse::<i64>().ok().and_then(Self::from_raw)
    }

    /// Returns the raw identifier value (always >= 1).
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0.get()
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.get().fmt(f)
    }
}

// ============================================================================
// SECTION: Records
// ============================================================================

/// A stored contact record.
///
/// # Invariants
/// - `id` uniquely identifies the record within the store.
/// - Field length limits are enforced at validation time, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Store-assigned identifier.
    pub id: ContactId,
    /// Contact display name.
    pub name: String,
    /// Contact email address.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Optional job title.
    pub title: Option<String>,
    /// Creation timestamp (`YYYY-MM-DD HH:MM:SS`).
    pub created: String,
}

/// The writable subset of a contact record.
///
/// # Invariants
/// - Never carries an identifier; ids are store-assigned.
/// - `created` is always populated by the time it reaches the store; the
///   web layer defaults it when the submitted value is absent or empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFields {
    /// Contact display name.
    pub name: String,
    /// Contact email address.
    pub email: String,
    /// Contact phone number.
    pub phone: String,
    /// Optional job title.
    pub title: Option<String>,
    /// Creation timestamp (`YYYY-MM-DD HH:MM:SS`).
    pub created: String,
}

impl ContactFields {
    /// Attaches a store-assigned identifier, producing a full record.
    #[must_use]
    pub fn into_contact(self, id: ContactId) -> Contact {
        Contact {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            title: self.title,
            created: self.created,
        }
    }
}
