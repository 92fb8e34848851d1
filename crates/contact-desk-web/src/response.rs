// crates/contact-desk-web/src/response.rs
// ============================================================================
// Module: Response Value
// Description: Status, content type, optional redirect target, and body.
// Purpose: Carry handler output back to the serve loop without wire types.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Handlers return a plain [`Response`] value; only the serve loop knows the
//! wire library. Redirects use 303 See Other so a POST is always followed by
//! a GET.

// ============================================================================
// SECTION: Response
// ============================================================================

/// Handler response value.
///
/// # Invariants
/// - `location` is `Some` iff `status` is a redirect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Content-Type header value for body responses.
    pub content_type: &'static str,
    /// Redirect target, when redirecting.
    pub location: Option<String>,
    /// Response body.
    pub body: String,
}

impl Response {
    /// Builds a 200 HTML response.
    #[must_use]
    pub const fn html(body: String) -> Self {
        Self {
            status: 200,
            content_type: "text/html; charset=utf-8",
            location: None,
            body,
        }
    }

    /// Builds a 303 redirect to the given path.
    #[must_use]
    pub fn redirect(path: &str) -> Self {
        Self {
            status: 303,
            content_type: "text/html; charset=utf-8",
            location: Some(path.to_string()),
            body: String::new(),
        }
    }

    /// Builds the router's 404 response.
    #[must_use]
    pub fn not_found() -> Self {
        Self {
            status: 404,
            content_type: "text/html; charset=utf-8",
            location: None,
            body: "<!doctype html><html><body><h1>404 Not Found</h1></body></html>".to_string(),
        }
    }

    /// Builds a generic 500 response that leaks no store detail.
    #[must_use]
    pub fn server_error() -> Self {
        Self {
            status: 500,
            content_type: "text/html; charset=utf-8",
            location: None,
            body: "<!doctype html><html><body><h1>Something went wrong. Please try again \
                   later.</h1></body></html>"
                .to_string(),
        }
    }
}
