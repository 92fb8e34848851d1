// crates/contact-desk-web/src/handlers.rs
// ============================================================================
// Module: Controller Handlers
// Description: Orchestrate validation, store calls, and response building.
// Purpose: Implement the two-state form flow for each mutating endpoint.
// Dependencies: contact-desk-core, log, crate::{flash, request, response, router, views}
// ============================================================================

//! ## Overview
//! Each mutating endpoint follows the same two-state machine: show the form
//! (GET, or a POST that failed validation) and apply-then-redirect (POST
//! with valid data). Deletion additionally requires `confirm=yes` before
//! acting. Store identifiers never come from a request body; only the path
//! `{id}` placeholder names a record. Raw store errors are logged and the
//! user sees generic text only.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;

use contact_desk_core::Contact;
use contact_desk_core::ContactFields;
use contact_desk_core::ContactId;
use contact_desk_core::ContactStore;
use contact_desk_core::ListPage;
use contact_desk_core::Rule;
use contact_desk_core::Validation;
use contact_desk_core::now_timestamp;
use contact_desk_core::validate;

use crate::flash::FlashKind;
use crate::flash::FlashStore;
use crate::request::Method;
use crate::request::RequestContext;
use crate::response::Response;
use crate::router::RouteParams;
use crate::router::Router;
use crate::views;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Fixed page size for the contact list.
pub const PAGE_SIZE: u32 = 5;

/// Path of the contact list, the redirect target of every mutation.
const LIST_PATH: &str = "/contacts";

// ============================================================================
// SECTION: State
// ============================================================================

/// Shared state handed to every handler.
///
/// # Invariants
/// - The store is the only shared mutable resource; it performs its own
///   locking.
pub struct AppState {
    /// Backing contact store.
    store: Arc<dyn ContactStore>,
    /// One-shot flash message slot.
    flash: FlashStore,
}

impl AppState {
    /// Creates shared handler state around a store handle.
    #[must_use]
    pub fn new(store: Arc<dyn ContactStore>) -> Arc<Self> {
        Arc::new(Self {
            store,
            flash: FlashStore::new(),
        })
    }
}

/// Returns the validation rules for submitted contact data.
fn contact_rules() -> Vec<(&'static str, Vec<Rule>)> {
    vec![
        ("name", vec![Rule::Required, Rule::MaxLength(255)]),
        ("email", vec![Rule::Required, Rule::Email, Rule::MaxLength(255)]),
        ("phone", vec![Rule::Required, Rule::MaxLength(20)]),
        ("title", vec![Rule::MaxLength(255)]),
    ]
}

/// Builds store fields from validated form data.
///
/// An empty `title` becomes `None`; an empty `created` defaults to the
/// current wall clock. The form never contributes an id.
fn fields_from(data: &BTreeMap<String, String>) -> ContactFields {
    let value = |key: &str| data.get(key).map_or("", String::as_str).trim().to_string();
    let title = value("title");
    let created = value("created");
    ContactFields {
        name: value("name"),
        email: value("email"),
        phone: value("phone"),
        title: if title.is_empty() { None } else { Some(title) },
        created: if created.is_empty() { now_timestamp() } else { created },
    }
}

/// Converts a stored contact into form-value pairs for the edit view.
fn contact_values(contact: &Contact) -> BTreeMap<String, String> {
    let mut values = BTreeMap::new();
    values.insert("name".to_string(), contact.name.clone());
    values.insert("email".to_string(), contact.email.clone());
    values.insert("phone".to_string(), contact.phone.clone());
    values.insert("title".to_string(), contact.title.clone().unwrap_or_default());
    values.insert("created".to_string(), contact.created.clone());
    values
}

/// Parses the `{id}` placeholder, treating malformed values as absent.
fn path_id(params: &RouteParams) -> Option<ContactId> {
    params.get("id").and_then(|segment| ContactId::parse(segment))
}

/// Sets a not-found flash and redirects to the list.
fn missing_contact(state: &AppState) -> Response {
    state.flash.set(FlashKind::Error, "Contact not found.");
    Response::redirect(LIST_PATH)
}

/// Logs a failed store write and redirects with a generic error flash.
fn store_write_failed(state: &AppState, operation: &str, error: &impl std::fmt::Display) -> Response {
    log::error!("contact {operation} failed: {error}");
    state.flash.set(FlashKind::Error, "Could not save the change. Please try again.");
    Response::redirect(LIST_PATH)
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// GET `/` home page.
fn home(state: &AppState, _params: &RouteParams, _ctx: &RequestContext) -> Response {
    Response::html(views::home_page(state.flash.consume().as_ref()))
}

/// GET `/contacts` paginated list.
fn list(state: &AppState, _params: &RouteParams, ctx: &RequestContext) -> Response {
    let page = ctx
        .query_value("page")
        .and_then(|value| value.parse::<u32>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1);
    // Page is not bounds-checked against the total; an out-of-range page
    // yields an empty slice.
    let offset = page.saturating_sub(1).saturating_mul(PAGE_SIZE);
    let window = ListPage {
        limit: PAGE_SIZE,
        offset,
    };
    let contacts = match state.store.list_page(Some(window)) {
        Ok(contacts) => contacts,
        Err(error) => {
            log::error!("contact list failed: {error}");
            return Response::server_error();
        }
    };
    let total = match state.store.count() {
        Ok(total) => total,
        Err(error) => {
            log::error!("contact count failed: {error}");
            return Response::server_error();
        }
    };
    let total_pages = total.div_ceil(u64::from(PAGE_SIZE)).max(1);
    let total_pages = u32::try_from(total_pages).unwrap_or(u32::MAX);
    Response::html(views::list_page(
        &contacts,
        page,
        total_pages,
        total,
        state.flash.consume().as_ref(),
    ))
}

/// GET `/contacts/create` empty form.
fn create_form(state: &AppState, _params: &RouteParams, _ctx: &RequestContext) -> Response {
    Response::html(views::create_form(
        &BTreeMap::new(),
        &Validation::default(),
        state.flash.consume().as_ref(),
    ))
}

/// POST `/contacts/create` validated insert.
fn create_submit(state: &AppState, _params: &RouteParams, ctx: &RequestContext) -> Response {
    let outcome = validate(&ctx.body, &contact_rules());
    if !outcome.passes() {
        return Response::html(views::create_form(&ctx.body, &outcome, None));
    }
    let fields = fields_from(&ctx.body);
    match state.store.create(&fields) {
        Ok(_) => {
            state.flash.set(FlashKind::Success, "Contact created.");
            Response::redirect(LIST_PATH)
        }
        Err(error) => store_write_failed(state, "create", &error),
    }
}

/// GET `/contacts/edit/{id}` pre-filled form.
fn edit_form(state: &AppState, params: &RouteParams, _ctx: &RequestContext) -> Response {
    let Some(id) = path_id(params) else {
        return missing_contact(state);
    };
    match state.store.get_by_id(id) {
        Ok(Some(contact)) => Response::html(views::edit_form(
            id,
            &contact_values(&contact),
            &Validation::default(),
            state.flash.consume().as_ref(),
        )),
        Ok(None) => missing_contact(state),
        Err(error) => {
            log::error!("contact load failed: {error}");
            Response::server_error()
        }
    }
}

/// POST `/contacts/update/{id}` validated overwrite.
fn update_submit(state: &AppState, params: &RouteParams, ctx: &RequestContext) -> Response {
    let Some(id) = path_id(params) else {
        return missing_contact(state);
    };
    // Existence pre-check: update reports false on zero rows, so a missing
    // record must redirect with a notice instead of silently succeeding.
    match state.store.get_by_id(id) {
        Ok(Some(_)) => {}
        Ok(None) => return missing_contact(state),
        Err(error) => {
            log::error!("contact load failed: {error}");
            return Response::server_error();
        }
    }
    let outcome = validate(&ctx.body, &contact_rules());
    if !outcome.passes() {
        return Response::html(views::edit_form(id, &ctx.body, &outcome, None));
    }
    let fields = fields_from(&ctx.body);
    match state.store.update(id, &fields) {
        Ok(true) => {
            state.flash.set(FlashKind::Success, "Contact updated.");
            Response::redirect(LIST_PATH)
        }
        Ok(false) => missing_contact(state),
        Err(error) => store_write_failed(state, "update", &error),
    }
}

/// GET `/contacts/delete/{id}` confirmation prompt or confirmed delete.
fn delete(state: &AppState, params: &RouteParams, ctx: &RequestContext) -> Response {
    let Some(id) = path_id(params) else {
        return missing_contact(state);
    };
    let contact = match state.store.get_by_id(id) {
        Ok(Some(contact)) => contact,
        Ok(None) => return missing_contact(state),
        Err(error) => {
            log::error!("contact load failed: {error}");
            return Response::server_error();
        }
    };
    if ctx.query_value("confirm") != Some("yes") {
        return Response::html(views::delete_confirm(&contact, state.flash.consume().as_ref()));
    }
    match state.store.delete(id) {
        Ok(true) => {
            state.flash.set(FlashKind::Success, "Contact deleted.");
            Response::redirect(LIST_PATH)
        }
        Ok(false) => missing_contact(state),
        Err(error) => store_write_failed(state, "delete", &error),
    }
}

// ============================================================================
// SECTION: Route Table
// ============================================================================

/// Registers the full HTTP surface onto a fresh router.
#[must_use]
pub fn build_router(state: &Arc<AppState>) -> Router {
    let mut router = Router::new();
    register(&mut router, state, Method::Get, "/", home);
    register(&mut router, state, Method::Get, "/contacts", list);
    register(&mut router, state, Method::Get, "/contacts/create", create_form);
    register(&mut router, state, Method::Post, "/contacts/create", create_submit);
    register(&mut router, state, Method::Get, "/contacts/edit/{id}", edit_form);
    register(&mut router, state, Method::Post, "/contacts/update/{id}", update_submit);
    register(&mut router, state, Method::Get, "/contacts/delete/{id}", delete);
    router
}

/// Registers one state-carrying handler function.
fn register(
    router: &mut Router,
    state: &Arc<AppState>,
    method: Method,
    pattern: &str,
    handler: fn(&AppState, &RouteParams, &RequestContext) -> Response,
) {
    let state = Arc::clone(state);
    router.register(
        method,
        pattern,
        Box::new(move |params, ctx| handler(&state, params, ctx)),
    );
}
