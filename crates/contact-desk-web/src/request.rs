// crates/contact-desk-web/src/request.rs
// ============================================================================
// Module: Request Context
// Description: Explicit per-request value carrying method, path, and maps.
// Purpose: Replace implicit request globals with a value handlers receive.
// Dependencies: url
// ============================================================================

//! ## Overview
//! Every handler receives a [`RequestContext`] holding the method, the path,
//! and the decoded query and body maps. Query and body payloads are
//! untrusted; decoding tolerates malformed pairs by dropping them, and the
//! body is size-capped before it reaches this module.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use url::form_urlencoded;

// ============================================================================
// SECTION: Method
// ============================================================================

/// HTTP methods the application routes.
///
/// # Invariants
/// - Only methods with registered routes appear here; anything else is a
///   dispatch miss before routing starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// HTTP GET.
    Get,
    /// HTTP POST.
    Post,
}

impl Method {
    /// Parses a wire method token, returning `None` for unsupported verbs.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "GET" => Some(Self::Get),
            "POST" => Some(Self::Post),
            _ => None,
        }
    }
}

// ============================================================================
// SECTION: Request Context
// ============================================================================

/// Explicit request value passed into each handler.
///
/// # Invariants
/// - `path` carries no query string; the query map holds decoded pairs.
/// - Duplicate keys keep the last occurrence.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Request method.
    pub method: Method,
    /// Request path without the query string.
    pub path: String,
    /// Decoded query-string pairs.
    pub query: BTreeMap<String, String>,
    /// Decoded form body pairs.
    pub body: BTreeMap<String, String>,
}

impl RequestContext {
    /// Builds a context from a request target and raw body bytes.
    ///
    /// The target is split at the first `?`; both halves decode as
    /// `application/x-www-form-urlencoded` data.
    #[must_use]
    pub fn new(method: Method, target: &str, body_bytes: &[u8]) -> Self {
        let (path, query_text) = match target.split_once('?') {
            Some((path, query)) => (path, query),
            None => (target, ""),
        };
        Self {
            method,
            path: path.to_string(),
            query: decode_pairs(query_text.as_bytes()),
            body: decode_pairs(body_bytes),
        }
    }

    /// Returns one decoded query value.
    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    /// Returns one decoded body value.
    #[must_use]
    pub fn body_value(&self, key: &str) -> Option<&str> {
        self.body.get(key).map(String::as_str)
    }
}

/// Decodes urlencoded bytes into a key/value map, last occurrence winning.
fn decode_pairs(bytes: &[u8]) -> BTreeMap<String, String> {
    form_urlencoded::parse(bytes)
        .into_owned()
        .collect()
}
