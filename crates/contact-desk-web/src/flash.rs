// crates/contact-desk-web/src/flash.rs
// ============================================================================
// Module: Flash Messages
// Description: One-shot post-redirect notices.
// Purpose: Carry a success or error notice across one redirect.
// Dependencies: std
// ============================================================================

//! ## Overview
//! A flash message is set before a redirect and consumed on the next
//! render. The store is a single process-level slot; setting a new message
//! replaces an unconsumed one. A poisoned slot degrades to "no message"
//! rather than failing the request.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Mutex;

// ============================================================================
// SECTION: Flash
// ============================================================================

/// Kind of a flash notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    /// Operation succeeded.
    Success,
    /// Operation failed or the target was missing.
    Error,
}

/// A one-shot user notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    /// Notice kind.
    pub kind: FlashKind,
    /// Notice text.
    pub message: String,
}

/// Process-level one-shot flash slot.
///
/// # Invariants
/// - `consume` returns each stored message at most once.
#[derive(Debug, Default)]
pub struct FlashStore {
    /// Current unconsumed message, if any.
    slot: Mutex<Option<Flash>>,
}

impl FlashStore {
    /// Creates an empty flash store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a notice, replacing any unconsumed one.
    pub fn set(&self, kind: FlashKind, message: &str) {
        if let Ok(mut guard) = self.slot.lock() {
            *guard = Some(Flash {
                kind,
                message: message.to_string(),
            });
        }
    }

    /// Takes the stored notice, leaving the slot empty.
    #[must_use]
    pub fn consume(&self) -> Option<Flash> {
        self.slot.lock().ok().and_then(|mut guard| guard.take())
    }
}
