// crates/contact-desk-web/tests/router_unit.rs
// ============================================================================
// Module: Router Unit Tests
// Description: Pattern matching and dispatch order behavior.
// Purpose: Validate placeholder binding, method matching, and 404 fallback.
// ============================================================================

//! ## Overview
//! Unit-level tests for the router:
//! - `{name}` placeholders bind the path segment's string value
//! - Method mismatch on a matching path is a plain 404
//! - First registered match wins; literals compare case-sensitively

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use std::sync::Arc;
use std::sync::Mutex;

use contact_desk_web::Method;
use contact_desk_web::RequestContext;
use contact_desk_web::Response;
use contact_desk_web::RouteParams;
use contact_desk_web::Router;

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Registers a route that records the params it was invoked with.
fn record_route(
    router: &mut Router,
    method: Method,
    pattern: &str,
    marker: &str,
) -> Arc<Mutex<Option<RouteParams>>> {
    let seen = Arc::new(Mutex::new(None));
    let seen_clone = Arc::clone(&seen);
    let body = marker.to_string();
    router.register(
        method,
        pattern,
        Box::new(move |params, _ctx| {
            if let Ok(mut guard) = seen_clone.lock() {
                *guard = Some(params.clone());
            }
            Response::html(body.clone())
        }),
    );
    seen
}

fn get(path: &str) -> RequestContext {
    RequestContext::new(Method::Get, path, b"")
}

fn post(path: &str) -> RequestContext {
    RequestContext::new(Method::Post, path, b"")
}

// ============================================================================
// SECTION: Placeholder Binding
// ============================================================================

#[test]
fn placeholder_binds_path_segment_value() {
    let mut router = Router::new();
    let seen = record_route(&mut router, Method::Get, "/contacts/edit/{id}", "edit");
    let response = router.dispatch(&get("/contacts/edit/42"));
    assert_eq!(response.status, 200);
    let params = seen.lock().unwrap().clone().expect("handler invoked");
    assert_eq!(params.get("id").map(String::as_str), Some("42"));
}

#[test]
fn placeholder_binds_raw_string_even_when_not_numeric() {
    let mut router = Router::new();
    let seen = record_route(&mut router, Method::Get, "/contacts/edit/{id}", "edit");
    let response = router.dispatch(&get("/contacts/edit/abc"));
    assert_eq!(response.status, 200);
    let params = seen.lock().unwrap().clone().expect("handler invoked");
    assert_eq!(params.get("id").map(String::as_str), Some("abc"));
}

#[test]
fn multiple_placeholders_bind_independently() {
    let mut router = Router::new();
    let seen = record_route(&mut router, Method::Get, "/a/{first}/b/{second}", "pair");
    let response = router.dispatch(&get("/a/one/b/two"));
    assert_eq!(response.status, 200);
    let params = seen.lock().unwrap().clone().expect("handler invoked");
    assert_eq!(params.get("first").map(String::as_str), Some("one"));
    assert_eq!(params.get("second").map(String::as_str), Some("two"));
}

// ============================================================================
// SECTION: Misses
// ============================================================================

#[test]
fn method_mismatch_on_matching_path_is_not_found() {
    let mut router = Router::new();
    let seen = record_route(&mut router, Method::Get, "/contacts/edit/{id}", "edit");
    let response = router.dispatch(&post("/contacts/edit/42"));
    assert_eq!(response.status, 404);
    assert!(seen.lock().unwrap().is_none(), "handler must not run on method mismatch");
}

#[test]
fn segment_count_mismatch_is_not_found() {
    let mut router = Router::new();
    record_route(&mut router, Method::Get, "/contacts/edit/{id}", "edit");
    assert_eq!(router.dispatch(&get("/contacts/edit")).status, 404);
    assert_eq!(router.dispatch(&get("/contacts/edit/42/extra")).status, 404);
}

#[test]
fn literal_segments_compare_case_sensitively() {
    let mut router = Router::new();
    record_route(&mut router, Method::Get, "/contacts", "list");
    assert_eq!(router.dispatch(&get("/Contacts")).status, 404);
    assert_eq!(router.dispatch(&get("/contacts")).status, 200);
}

#[test]
fn empty_table_dispatches_not_found() {
    let router = Router::new();
    assert_eq!(router.dispatch(&get("/anything")).status, 404);
}

// ============================================================================
// SECTION: Ordering
// ============================================================================

#[test]
fn first_registered_match_wins() {
    let mut router = Router::new();
    router.register(
        Method::Get,
        "/contacts/{word}",
        Box::new(|_params, _ctx| Response::html("placeholder".to_string())),
    );
    router.register(
        Method::Get,
        "/contacts/create",
        Box::new(|_params, _ctx| Response::html("literal".to_string())),
    );
    // The placeholder route registered first, so it shadows the literal one.
    let response = router.dispatch(&get("/contacts/create"));
    assert_eq!(response.body, "placeholder");
}

#[test]
fn query_string_does_not_affect_matching() {
    let mut router = Router::new();
    record_route(&mut router, Method::Get, "/contacts", "list");
    let ctx = get("/contacts?page=2");
    assert_eq!(router.dispatch(&ctx).status, 200);
    assert_eq!(ctx.query_value("page"), Some("2"));
}
