// crates/contact-desk-core/src/lib.rs
// ============================================================================
// Module: Contact Desk Core Library
// Description: Domain model, validation rules, and storage interfaces.
// Purpose: Define the backend-agnostic core used by store and web crates.
// Dependencies: serde, thiserror, time
// ============================================================================

//! ## Overview
//! Contact Desk Core defines the [`Contact`] domain record, the
//! tagged-variant validation rules applied to submitted form data, and the
//! [`ContactStore`] trait implemented by storage backends. The core holds no
//! connection handles and performs no I/O; storage backends and the web
//! layer depend on it, never the reverse.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod interfaces;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use crate::core::contact::Contact;
pub use crate::core::contact::ContactFields;
pub use crate::core::contact::ContactId;
pub use crate::core::time::now_timestamp;
pub use crate::core::validation::Rule;
pub use crate::core::validation::Validation;
pub use crate::core::validation::validate;
pub use crate::interfaces::ContactStore;
pub use crate::interfaces::ListPage;
pub use crate::interfaces::StoreError;
