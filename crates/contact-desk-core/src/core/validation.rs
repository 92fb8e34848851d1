// crates/contact-desk-core/src/core/validation.rs
// ============================================================================
// Module: Contact Desk Validation
// Description: Tagged-variant field rules and a small rule interpreter.
// Purpose: Check submitted form data before it reaches the store.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Validation runs over a flat field map. Each field carries an ordered rule
//! list; rules evaluate in listed order and stop at the first failure, so a
//! field contributes at most one error message. Fields without rules pass
//! through untouched. Submitted data is untrusted and is never echoed into
//! error messages.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

// ============================================================================
// SECTION: Rules
// ============================================================================

/// A single validation rule applied to one field.
///
/// # Invariants
/// - Rule evaluation is deterministic and side-effect free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Field must be non-empty after trimming whitespace.
    Required,
    /// Field must look like an RFC-5322-ish email address.
    Email,
    /// Field character length must not exceed the given maximum.
    MaxLength(usize),
}

impl Rule {
    /// Evaluates the rule against a field value, returning the failure
    /// message when the value does not satisfy it.
    fn check(self, field: &str, value: &str) -> Option<String> {
        match self {
            Self::Required => {
                if value.trim().is_empty() {
                    Some(format!("The {field} field is required."))
                } else {
                    None
                }
            }
            Self::Email => {
                if is_email_shaped(value.trim()) {
                    None
                } else {
                    Some(format!("The {field} field must be a valid email address."))
                }
            }
            Self::MaxLength(max) => {
                if value.chars().count() > max {
                    Some(format!("The {field} field may not exceed {max} characters."))
                } else {
                    None
                }
            }
        }
    }
}

/// Checks the basic shape of an email address.
///
/// Accepts `local@domain` where the local part is non-empty, the domain
/// contains an interior dot, and the whole value has no whitespace. This is
/// a shape check, not full RFC-5322 parsing.
fn is_email_shaped(value: &str) -> bool {
    if value.is_empty() || value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty()
}

// ============================================================================
// SECTION: Outcome
// ============================================================================

/// Outcome of validating a field map against a rule set.
///
/// # Invariants
/// - `errors` holds at most one message per field (first failing rule wins).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validation {
    /// Field name mapped to its first failing rule message.
    errors: BTreeMap<String, String>,
}

impl Validation {
    /// Returns true when no field produced an error.
    #[must_use]
    pub fn passes(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the field-to-message error map.
    #[must_use]
    pub const fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    /// Returns the error message for one field, if any.
    #[must_use]
    pub fn error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }
}

// ============================================================================
// SECTION: Interpreter
// ============================================================================

/// Validates a field map against ordered per-field rule lists.
///
/// A field absent from `data` is treated as an empty string, so `Required`
/// still fires for it. Fields present in `data` but without rules pass
/// through unchanged.
#[must_use]
pub fn validate(data: &BTreeMap<String, String>, rules: &[(&str, Vec<Rule>)]) -> Validation {
    let mut errors = BTreeMap::new();
    for (field, field_rules) in rules {
        let value = data.get(*field).map_or("", String::as_str);
        for rule in field_rules {
            if let Some(message) = rule.check(field, value) {
                errors.insert((*field).to_string(), message);
                break;
            }
        }
    }
    Validation {
        errors,
    }
}
