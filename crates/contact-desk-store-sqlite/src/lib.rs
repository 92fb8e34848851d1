// crates/contact-desk-store-sqlite/src/lib.rs
// ============================================================================
// Module: Contact Desk SQLite Store Library
// Description: SQLite-backed ContactStore implementation.
// Purpose: Persist contact records behind the core storage interface.
// Dependencies: contact-desk-core, rusqlite, serde, thiserror
// ============================================================================

//! ## Overview
//! This crate provides [`SqliteContactStore`], the durable
//! [`contact_desk_core::ContactStore`] backend. All statements are
//! parameter-bound; caller-supplied values never enter SQL text.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod store;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use store::SqliteContactStore;
pub use store::SqliteStoreConfig;
pub use store::SqliteStoreError;
pub use store::SqliteStoreMode;
pub use store::SqliteSyncMode;
