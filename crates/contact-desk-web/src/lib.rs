// crates/contact-desk-web/src/lib.rs
// ============================================================================
// Module: Contact Desk Web Library
// Description: Request routing, controller handlers, and HTML rendering.
// Purpose: Serve the contact CRUD surface over synchronous HTTP.
// Dependencies: contact-desk-core, log, thiserror, tiny_http, url
// ============================================================================

//! ## Overview
//! The web crate owns everything between the wire and the store: the
//! explicit [`RequestContext`] built from each request, the ordered
//! [`Router`] with `{name}` placeholder patterns, the controller handlers
//! orchestrating validation and the store, one-shot flash messages, and the
//! `tiny_http` serve loop. Requests are handled synchronously; the store is
//! the only shared mutable resource.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod flash;
pub mod handlers;
pub mod request;
pub mod response;
pub mod router;
pub mod server;
pub mod views;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use flash::Flash;
pub use flash::FlashKind;
pub use flash::FlashStore;
pub use handlers::AppState;
pub use handlers::PAGE_SIZE;
pub use handlers::build_router;
pub use request::Method;
pub use request::RequestContext;
pub use response::Response;
pub use router::RouteParams;
pub use router::Router;
pub use server::ServeError;
pub use server::serve;
