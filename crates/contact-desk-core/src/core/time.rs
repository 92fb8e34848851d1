// crates/contact-desk-core/src/core/time.rs
// ============================================================================
// Module: Contact Desk Time Helpers
// Description: Wall-clock capture for contact creation timestamps.
// Purpose: Produce the canonical `YYYY-MM-DD HH:MM:SS` text form in one place.
// Dependencies: time
// ============================================================================

//! ## Overview
//! Contact records store their creation time as text in the canonical
//! `YYYY-MM-DD HH:MM:SS` form. The store never reads the clock itself;
//! callers default an absent `created` field through [`now_timestamp`]
//! before handing fields to the store.

// ============================================================================
// SECTION: Imports
// ============================================================================

use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

// ============================================================================
// SECTION: Format
// ============================================================================

/// Canonical timestamp layout for the `created` column.
const CREATED_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the current UTC wall-clock time as `YYYY-MM-DD HH:MM:SS`.
///
/// Formatting the canonical layout cannot fail for a valid
/// [`OffsetDateTime`]; a formatting error degrades to the Unix epoch text
/// rather than panicking.
#[must_use]
pub fn now_timestamp() -> String {
    OffsetDateTime::now_utc()
        .format(CREATED_FORMAT)
        .unwrap_or_else(|_| String::from("1970-01-01 00:00:00"))
}
