// crates/contact-desk-web/src/views.rs
// ============================================================================
// Module: HTML Views
// Description: Server-rendered pages for the contact CRUD surface.
// Purpose: Produce escaped HTML bodies for handlers; no template engine.
// Dependencies: contact-desk-core
// ============================================================================

//! ## Overview
//! Views are plain functions from typed data to an HTML string. Every
//! interpolated value passes through [`escape_html`]; submitted form values
//! are untrusted and re-rendered verbatim only after escaping. This is thin
//! glue by design, not a templating subsystem.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt::Write;

use contact_desk_core::Contact;
use contact_desk_core::ContactId;
use contact_desk_core::Validation;

use crate::flash::Flash;
use crate::flash::FlashKind;

// ============================================================================
// SECTION: Escaping
// ============================================================================

/// Escapes text for safe interpolation into HTML content and attributes.
#[must_use]
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

// ============================================================================
// SECTION: Layout
// ============================================================================

/// Wraps page content in the shared document shell with the flash banner.
fn layout(title: &str, flash: Option<&Flash>, main: &str) -> String {
    let banner = flash.map_or_else(String::new, |flash| {
        let class = match flash.kind {
            FlashKind::Success => "flash-success",
            FlashKind::Error => "flash-error",
        };
        format!("<p class=\"{class}\">{}</p>", escape_html(&flash.message))
    });
    format!(
        "<!doctype html><html><head><meta charset=\"utf-8\"><title>{title} | Contact \
         Desk</title></head><body><nav><a href=\"/\">Home</a> | <a \
         href=\"/contacts\">Contacts</a></nav>{banner}<main>{main}</main></body></html>",
        title = escape_html(title),
    )
}

/// Renders one labeled form field with its error message, if any.
fn field_row(
    label: &str,
    name: &str,
    value: &str,
    errors: &Validation,
) -> String {
    let error = errors
        .error(name)
        .map_or_else(String::new, |message| {
            format!("<span class=\"field-error\">{}</span>", escape_html(message))
        });
    format!(
        "<p><label for=\"{name}\">{label}</label><input id=\"{name}\" name=\"{name}\" \
         value=\"{value}\">{error}</p>",
        label = escape_html(label),
        value = escape_html(value),
    )
}

/// Looks up a submitted value for re-rendering, defaulting to empty.
fn submitted<'a>(values: &'a BTreeMap<String, String>, name: &str) -> &'a str {
    values.get(name).map_or("", String::as_str)
}

// ============================================================================
// SECTION: Pages
// ============================================================================

/// Renders the home/landing page.
#[must_use]
pub fn home_page(flash: Option<&Flash>) -> String {
    layout(
        "Home",
        flash,
        "<h1>Contact Desk</h1><p><a href=\"/contacts\">Browse contacts</a> or <a \
         href=\"/contacts/create\">add a new one</a>.</p>",
    )
}

/// Renders the paginated contact list.
#[must_use]
pub fn list_page(
    contacts: &[Contact],
    page: u32,
    total_pages: u32,
    total: u64,
    flash: Option<&Flash>,
) -> String {
    let mut rows = String::new();
    for contact in contacts {
        let title = contact.title.as_deref().unwrap_or("");
        let _ = write!(
            rows,
            "<tr><td>{id}</td><td>{name}</td><td>{email}</td><td>{phone}</td><td>{title}</td><td>\
             {created}</td><td><a href=\"/contacts/edit/{id}\">Edit</a> <a \
             href=\"/contacts/delete/{id}\">Delete</a></td></tr>",
            id = contact.id,
            name = escape_html(&contact.name),
            email = escape_html(&contact.email),
            phone = escape_html(&contact.phone),
            title = escape_html(title),
            created = escape_html(&contact.created),
        );
    }
    let prev = if page > 1 {
        format!("<a href=\"/contacts?page={}\">Previous</a>", page - 1)
    } else {
        String::new()
    };
    let next = if page < total_pages {
        format!("<a href=\"/contacts?page={}\">Next</a>", page + 1)
    } else {
        String::new()
    };
    let main = format!(
        "<h1>Contacts ({total})</h1><p><a href=\"/contacts/create\">New \
         contact</a></p><table><tr><th>Id</th><th>Name</th><th>Email</th><th>Phone</th><th>Title<\
         /th><th>Created</th><th></th></tr>{rows}</table><p>{prev} Page {page} of {total_pages} \
         {next}</p>",
    );
    layout("Contacts", flash, &main)
}

/// Renders the create form, re-showing submitted values and errors.
#[must_use]
pub fn create_form(
    values: &BTreeMap<String, String>,
    errors: &Validation,
    flash: Option<&Flash>,
) -> String {
    let main = format!(
        "<h1>New Contact</h1><form method=\"post\" \
         action=\"/contacts/create\">{name}{email}{phone}{title}{created}<p><button \
         type=\"submit\">Create</button></p></form>",
        name = field_row("Name", "name", submitted(values, "name"), errors),
        email = field_row("Email", "email", submitted(values, "email"), errors),
        phone = field_row("Phone", "phone", submitted(values, "phone"), errors),
        title = field_row("Title", "title", submitted(values, "title"), errors),
        created = field_row("Created", "created", submitted(values, "created"), errors),
    );
    layout("New Contact", flash, &main)
}

/// Renders the edit form, re-showing submitted values and errors.
#[must_use]
pub fn edit_form(
    id: ContactId,
    values: &BTreeMap<String, String>,
    errors: &Validation,
    flash: Option<&Flash>,
) -> String {
    let main = format!(
        "<h1>Edit Contact {id}</h1><form method=\"post\" \
         action=\"/contacts/update/{id}\">{name}{email}{phone}{title}{created}<p><button \
         type=\"submit\">Save</button></p></form>",
        name = field_row("Name", "name", submitted(values, "name"), errors),
        email = field_row("Email", "email", submitted(values, "email"), errors),
        phone = field_row("Phone", "phone", submitted(values, "phone"), errors),
        title = field_row("Title", "title", submitted(values, "title"), errors),
        created = field_row("Created", "created", submitted(values, "created"), errors),
    );
    layout("Edit Contact", flash, &main)
}

/// Renders the delete confirmation prompt.
#[must_use]
pub fn delete_confirm(contact: &Contact, flash: Option<&Flash>) -> String {
    let main = format!(
        "<h1>Delete Contact</h1><p>Really delete <strong>{name}</strong> \
         ({email})?</p><p><a href=\"/contacts/delete/{id}?confirm=yes\">Yes, delete</a> <a \
         href=\"/contacts\">Cancel</a></p>",
        name = escape_html(&contact.name),
        email = escape_html(&contact.email),
        id = contact.id,
    );
    layout("Delete Contact", flash, &main)
}
