// crates/contact-desk-web/tests/handlers_unit.rs
// ============================================================================
// Module: Handler Flow Tests
// Description: Controller behavior against a real SQLite store.
// Purpose: Validate the form state machine, flash notices, pagination, and
//          the full create/list/delete scenario.
// ============================================================================

//! ## Overview
//! End-to-end handler tests driven through the router with a temp-file
//! `SQLite` store:
//! - Create: validation failure re-renders with submitted values; success
//!   redirects and flashes
//! - Edit/update: missing ids redirect with an error notice
//! - Delete: confirmation is required before the destructive action
//! - The concrete create/list/confirm-delete scenario

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use std::sync::Arc;

use contact_desk_core::ContactStore;
use contact_desk_store_sqlite::SqliteContactStore;
use contact_desk_store_sqlite::SqliteStoreConfig;
use contact_desk_web::AppState;
use contact_desk_web::Method;
use contact_desk_web::RequestContext;
use contact_desk_web::Response;
use contact_desk_web::Router;
use contact_desk_web::build_router;
use tempfile::TempDir;

// ============================================================================
// SECTION: Helpers
// ============================================================================

struct Harness {
    /// Keeps the database directory alive for the test's duration.
    _dir: TempDir,
    /// Store handle shared with the handlers.
    store: Arc<SqliteContactStore>,
    /// Router with the full HTTP surface registered.
    router: Router,
}

fn harness() -> Harness {
    let dir = TempDir::new().expect("tempdir");
    let config = SqliteStoreConfig {
        path: dir.path().join("contacts.db"),
        busy_timeout_ms: 1_000,
        journal_mode: contact_desk_store_sqlite::SqliteStoreMode::Wal,
        sync_mode: contact_desk_store_sqlite::SqliteSyncMode::Normal,
    };
    let store = Arc::new(SqliteContactStore::new(&config).expect("open store"));
    let state = AppState::new(Arc::clone(&store) as Arc<dyn ContactStore>);
    let router = build_router(&state);
    Harness {
        _dir: dir,
        store,
        router,
    }
}

fn get(router: &Router, target: &str) -> Response {
    router.dispatch(&RequestContext::new(Method::Get, target, b""))
}

fn post(router: &Router, target: &str, body: &str) -> Response {
    router.dispatch(&RequestContext::new(Method::Post, target, body.as_bytes()))
}

const ANA_BODY: &str = "name=Ana&email=ana%40x.com&phone=11999999999&title=Dev";

// ============================================================================
// SECTION: Create Flow
// ============================================================================

#[test]
fn create_with_valid_data_redirects_and_persists() {
    let h = harness();
    let response = post(&h.router, "/contacts/create", ANA_BODY);
    assert_eq!(response.status, 303);
    assert_eq!(response.location.as_deref(), Some("/contacts"));
    let rows = h.store.list_page(None).expect("list");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Ana");
    assert_eq!(rows[0].title.as_deref(), Some("Dev"));
    assert!(!rows[0].created.is_empty(), "created must default when not submitted");
}

#[test]
fn create_with_invalid_data_rerenders_with_values_and_errors() {
    let h = harness();
    let response = post(&h.router, "/contacts/create", "name=&email=bad&phone=1");
    assert_eq!(response.status, 200, "validation failure re-shows the form");
    assert!(response.body.contains("required"), "missing name error expected");
    assert!(response.body.contains("valid email"), "email shape error expected");
    // Submitted values are re-rendered so the user does not retype.
    assert!(response.body.contains("value=\"bad\""));
    assert_eq!(h.store.count().expect("count"), 0, "nothing may be persisted");
}

#[test]
fn create_ignores_client_supplied_id() {
    let h = harness();
    let body = format!("{ANA_BODY}&id=999");
    let response = post(&h.router, "/contacts/create", &body);
    assert_eq!(response.status, 303);
    let rows = h.store.list_page(None).expect("list");
    assert_eq!(rows[0].id.get(), 1, "store assigns the id, not the client");
}

#[test]
fn create_honors_client_supplied_created_timestamp() {
    let h = harness();
    let body = format!("{ANA_BODY}&created=2020-01-02+03%3A04%3A05");
    post(&h.router, "/contacts/create", &body);
    let rows = h.store.list_page(None).expect("list");
    assert_eq!(rows[0].created, "2020-01-02 03:04:05");
}

// ============================================================================
// SECTION: Edit / Update Flow
// ============================================================================

#[test]
fn edit_form_prefills_stored_values() {
    let h = harness();
    post(&h.router, "/contacts/create", ANA_BODY);
    let response = get(&h.router, "/contacts/edit/1");
    assert_eq!(response.status, 200);
    assert!(response.body.contains("value=\"Ana\""));
    assert!(response.body.contains("/contacts/update/1"));
}

#[test]
fn edit_of_missing_id_redirects_with_notice() {
    let h = harness();
    let response = get(&h.router, "/contacts/edit/42");
    assert_eq!(response.status, 303);
    assert_eq!(response.location.as_deref(), Some("/contacts"));
    // The notice surfaces on the next rendered page.
    let list = get(&h.router, "/contacts");
    assert!(list.body.contains("Contact not found."));
}

#[test]
fn edit_with_non_numeric_id_behaves_like_missing() {
    let h = harness();
    let response = get(&h.router, "/contacts/edit/abc");
    assert_eq!(response.status, 303);
    assert_eq!(response.location.as_deref(), Some("/contacts"));
}

#[test]
fn update_overwrites_and_redirects() {
    let h = harness();
    post(&h.router, "/contacts/create", ANA_BODY);
    let response = post(
        &h.router,
        "/contacts/update/1",
        "name=Ana+Maria&email=ana.maria%40x.com&phone=11888888888&title=",
    );
    assert_eq!(response.status, 303);
    let rows = h.store.list_page(None).expect("list");
    assert_eq!(rows[0].name, "Ana Maria");
    assert_eq!(rows[0].email, "ana.maria@x.com");
    assert_eq!(rows[0].title, None, "empty title becomes absent");
}

#[test]
fn update_with_invalid_data_rerenders_form() {
    let h = harness();
    post(&h.router, "/contacts/create", ANA_BODY);
    let response = post(&h.router, "/contacts/update/1", "name=&email=bad&phone=1");
    assert_eq!(response.status, 200);
    assert!(response.body.contains("required"));
    let rows = h.store.list_page(None).expect("list");
    assert_eq!(rows[0].name, "Ana", "invalid submit must not overwrite");
}

#[test]
fn update_of_missing_id_redirects_with_notice() {
    let h = harness();
    let response = post(&h.router, "/contacts/update/42", ANA_BODY);
    assert_eq!(response.status, 303);
    assert_eq!(response.location.as_deref(), Some("/contacts"));
}

// ============================================================================
// SECTION: Delete Flow
// ============================================================================

#[test]
fn delete_without_confirmation_shows_prompt_and_keeps_row() {
    let h = harness();
    post(&h.router, "/contacts/create", ANA_BODY);
    let response = get(&h.router, "/contacts/delete/1");
    assert_eq!(response.status, 200);
    assert!(response.body.contains("Really delete"));
    assert!(response.body.contains("confirm=yes"));
    assert_eq!(h.store.count().expect("count"), 1);
}

#[test]
fn delete_with_confirmation_removes_row() {
    let h = harness();
    post(&h.router, "/contacts/create", ANA_BODY);
    let response = get(&h.router, "/contacts/delete/1?confirm=yes");
    assert_eq!(response.status, 303);
    assert_eq!(h.store.count().expect("count"), 0);
}

#[test]
fn delete_of_missing_id_redirects_with_notice() {
    let h = harness();
    let response = get(&h.router, "/contacts/delete/42?confirm=yes");
    assert_eq!(response.status, 303);
    assert_eq!(response.location.as_deref(), Some("/contacts"));
}

// ============================================================================
// SECTION: List And Pagination
// ============================================================================

#[test]
fn list_defaults_to_page_one_and_shows_five_rows() {
    let h = harness();
    for index in 0..7 {
        let body = format!("name=c{index}&email=c{index}%40x.com&phone=1");
        post(&h.router, "/contacts/create", &body);
    }
    let page_one = get(&h.router, "/contacts");
    assert!(page_one.body.contains("c0"));
    assert!(page_one.body.contains("c4"));
    assert!(!page_one.body.contains("c5"), "page one holds five rows");
    let page_two = get(&h.router, "/contacts?page=2");
    assert!(page_two.body.contains("c5"));
    assert!(page_two.body.contains("c6"));
}

#[test]
fn out_of_range_page_renders_empty_slice() {
    let h = harness();
    post(&h.router, "/contacts/create", ANA_BODY);
    let response = get(&h.router, "/contacts?page=99");
    assert_eq!(response.status, 200);
    assert!(!response.body.contains("Ana"));
}

// ============================================================================
// SECTION: Full Scenario
// ============================================================================

#[test]
fn create_list_confirm_delete_scenario() {
    let h = harness();
    // Create Ana; the store assigns id 1.
    let created = post(&h.router, "/contacts/create", ANA_BODY);
    assert_eq!(created.status, 303);
    let rows = h.store.list_page(None).expect("list");
    assert_eq!(rows[0].id.get(), 1);
    // List page 1 shows the single row.
    let list = get(&h.router, "/contacts");
    assert!(list.body.contains("Ana"));
    // Delete without confirm only shows the prompt.
    let prompt = get(&h.router, "/contacts/delete/1");
    assert_eq!(prompt.status, 200);
    assert_eq!(h.store.count().expect("count"), 1);
    // Confirmed delete removes the row.
    let deleted = get(&h.router, "/contacts/delete/1?confirm=yes");
    assert_eq!(deleted.status, 303);
    assert_eq!(h.store.count().expect("count"), 0);
    let empty = get(&h.router, "/contacts");
    assert!(!empty.body.contains("Ana"));
}
