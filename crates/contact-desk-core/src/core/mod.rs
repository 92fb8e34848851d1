// crates/contact-desk-core/src/core/mod.rs
// ============================================================================
// Module: Contact Desk Core Model
// Description: Domain records, validation rules, and time helpers.
// Purpose: Group the pure domain modules behind one namespace.
// Dependencies: crate submodules
// ============================================================================

//! ## Overview
//! The core model is pure data plus deterministic helpers. Nothing in this
//! tree touches a database or the network.

pub mod contact;
pub mod time;
pub mod validation;
