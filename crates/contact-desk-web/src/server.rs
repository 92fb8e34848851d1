// crates/contact-desk-web/src/server.rs
// ============================================================================
// Module: HTTP Serve Loop
// Description: Bridge between tiny_http wire requests and the router.
// Purpose: Accept requests, build contexts, dispatch, and write responses.
// Dependencies: log, tiny_http, crate::{request, response, router}
// ============================================================================

//! ## Overview
//! The serve loop is the only module that knows the wire library. Each
//! request is handled synchronously: decode into a [`RequestContext`],
//! dispatch through the [`Router`], write the [`Response`] back. Request
//! bodies are untrusted and read through a hard byte cap. The hosting
//! runtime may serve connections concurrently; the store's own locking is
//! the only coordination.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Read;

use thiserror::Error;
use tiny_http::Header;
use tiny_http::Server;
use tiny_http::StatusCode;

use crate::request::Method;
use crate::request::RequestContext;
use crate::response::Response;
use crate::router::Router;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Serve loop errors.
#[derive(Debug, Error)]
pub enum ServeError {
    /// The listening socket could not be bound.
    #[error("server bind error: {0}")]
    Bind(String),
}

// ============================================================================
// SECTION: Serve Loop
// ============================================================================

/// Binds the listener and serves requests until the process stops.
///
/// # Errors
///
/// Returns [`ServeError::Bind`] when the socket cannot be bound. Per-request
/// I/O failures are logged and do not stop the loop.
pub fn serve(bind_addr: &str, max_body_bytes: usize, router: &Router) -> Result<(), ServeError> {
    let server = Server::http(bind_addr).map_err(|err| ServeError::Bind(err.to_string()))?;
    log::info!("listening on http://{bind_addr}");
    for request in server.incoming_requests() {
        handle_request(request, max_body_bytes, router);
    }
    Ok(())
}

/// Handles one wire request end to end.
fn handle_request(mut request: tiny_http::Request, max_body_bytes: usize, router: &Router) {
    let method_token = request.method().to_string();
    let target = request.url().to_string();
    let response = match Method::parse(&method_token) {
        Some(method) => {
            let body = read_body(&mut request, max_body_bytes);
            let ctx = RequestContext::new(method, &target, &body);
            let response = router.dispatch(&ctx);
            log::debug!("{method_token} {target} -> {status}", status = response.status);
            response
        }
        None => Response::not_found(),
    };
    if let Err(error) = request.respond(to_wire(response)) {
        log::error!("response write failed: {error}");
    }
}

/// Reads the request body through the configured byte cap.
fn read_body(request: &mut tiny_http::Request, max_body_bytes: usize) -> Vec<u8> {
    let cap = u64::try_from(max_body_bytes).unwrap_or(u64::MAX);
    let mut body = Vec::new();
    if let Err(error) = request.as_reader().take(cap).read_to_end(&mut body) {
        log::error!("request body read failed: {error}");
        body.clear();
    }
    body
}

/// Converts a handler response into the wire representation.
fn to_wire(response: Response) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let mut wire = tiny_http::Response::from_data(response.body.into_bytes())
        .with_status_code(StatusCode(response.status));
    if let Ok(header) =
        Header::from_bytes(&b"Content-Type"[..], response.content_type.as_bytes())
    {
        wire = wire.with_header(header);
    }
    if let Some(location) = response.location
        && let Ok(header) = Header::from_bytes(&b"Location"[..], location.as_bytes())
    {
        wire = wire.with_header(header);
    }
    wire
}
