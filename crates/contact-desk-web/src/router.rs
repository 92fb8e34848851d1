// crates/contact-desk-web/src/router.rs
// ============================================================================
// Module: Request Router
// Description: Ordered method+pattern dispatch with named placeholders.
// Purpose: Map an incoming method and path to a registered handler.
// Dependencies: crate::{request, response}
// ============================================================================

//! ## Overview
//! Routes register as `(method, pattern, handler)` triples. Patterns split
//! on `/`; a `{name}` segment binds the corresponding path segment's string
//! value into the params map, and literal segments compare case-sensitively.
//! Matching requires equal segment counts and an exact method match; the
//! first registered match wins, with no specificity ordering. A miss
//! (including a method mismatch on an otherwise-matching path) produces the
//! 404 response without invoking any handler.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use crate::request::Method;
use crate::request::RequestContext;
use crate::response::Response;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Placeholder bindings extracted from a matched path.
pub type RouteParams = BTreeMap<String, String>;

/// Boxed handler invoked with bound params and the request context.
pub type Handler = Box<dyn Fn(&RouteParams, &RequestContext) -> Response + Send + Sync>;

/// One compiled pattern segment.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Literal segment compared case-sensitively.
    Literal(String),
    /// `{name}` placeholder binding the path segment's value.
    Placeholder(String),
}

/// One registered route.
struct Route {
    /// Exact method required for a match.
    method: Method,
    /// Compiled pattern segments.
    segments: Vec<Segment>,
    /// Handler invoked on match.
    handler: Handler,
}

// ============================================================================
// SECTION: Router
// ============================================================================

/// Ordered route table.
///
/// # Invariants
/// - Registration order is dispatch order; the first match wins.
#[derive(Default)]
pub struct Router {
    /// Registered routes in registration order.
    routes: Vec<Route>,
}

impl Router {
    /// Creates an empty router.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for a method and path pattern.
    pub fn register(&mut self, method: Method, pattern: &str, handler: Handler) {
        let segments = pattern.split('/').map(compile_segment).collect();
        self.routes.push(Route {
            method,
            segments,
            handler,
        });
    }

    /// Dispatches a request to the first matching route, or 404.
    #[must_use]
    pub fn dispatch(&self, ctx: &RequestContext) -> Response {
        for route in &self.routes {
            if route.method != ctx.method {
                continue;
            }
            if let Some(params) = match_segments(&route.segments, &ctx.path) {
                return (route.handler)(&params, ctx);
            }
        }
        Response::not_found()
    }
}

/// Compiles one pattern segment.
fn compile_segment(segment: &str) -> Segment {
    segment.strip_prefix('{').and_then(|rest| rest.strip_suffix('}')).map_or_else(
        || Segment::Literal(segment.to_string()),
        |name| Segment::Placeholder(name.to_string()),
    )
}

/// Matches a path against compiled segments, binding placeholders.
fn match_segments(segments: &[Segment], path: &str) -> Option<RouteParams> {
    let parts: Vec<&str> = path.split('/').collect();
    if parts.len() != segments.len() {
        return None;
    }
    let mut params = RouteParams::new();
    for (segment, part) in segments.iter().zip(parts) {
        match segment {
            Segment::Literal(literal) => {
                if literal != part {
                    return None;
                }
            }
            Segment::Placeholder(name) => {
                params.insert(name.clone(), part.to_string());
            }
        }
    }
    Some(params)
}
