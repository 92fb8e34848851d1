//! Config load validation tests for contact-desk-config.
// crates/contact-desk-config/tests/load_validation.rs
// =============================================================================
// Module: Config Load Validation Tests
// Description: Validate config loading guards (path, size, encoding, values).
// Purpose: Ensure config input handling is strict and fail-closed.
// =============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use std::io::Write;
use std::path::Path;

use contact_desk_config::ConfigError;
use contact_desk_config::ContactDeskConfig;
use tempfile::NamedTempFile;

type TestResult = Result<(), String>;

fn assert_rejected(result: Result<ContactDeskConfig, ConfigError>, needle: &str) -> TestResult {
    match result {
        Err(error) => {
            let message = error.to_string();
            if message.contains(needle) {
                Ok(())
            } else {
                Err(format!("error {message} did not contain {needle}"))
            }
        }
        Ok(_) => Err("expected invalid config load".to_string()),
    }
}

#[test]
fn load_without_path_yields_validated_defaults() -> TestResult {
    let config = ContactDeskConfig::load(None).map_err(|err| err.to_string())?;
    if config.server.bind_addr != "127.0.0.1:8080" {
        return Err(format!("unexpected default bind addr: {}", config.server.bind_addr));
    }
    if config.server.max_body_bytes == 0 {
        return Err("default body cap must be non-zero".to_string());
    }
    Ok(())
}

#[test]
fn load_rejects_path_too_long() -> TestResult {
    let long_path = "a".repeat(5_000);
    let path = Path::new(&long_path);
    assert_rejected(ContactDeskConfig::load(Some(path)), "config path exceeds max length")
}

#[test]
fn load_rejects_path_component_too_long() -> TestResult {
    let long_component = "a".repeat(300);
    let path = Path::new(&long_component);
    assert_rejected(ContactDeskConfig::load(Some(path)), "config path component too long")
}

#[test]
fn load_rejects_oversized_file() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    let payload = vec![b'a'; 1_048_577];
    file.write_all(&payload).map_err(|err| err.to_string())?;
    assert_rejected(ContactDeskConfig::load(Some(file.path())), "config file exceeds size limit")
}

#[test]
fn load_rejects_non_utf8_file() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(&[0xFF, 0xFE, 0xFF]).map_err(|err| err.to_string())?;
    assert_rejected(ContactDeskConfig::load(Some(file.path())), "config file must be utf-8")
}

#[test]
fn load_rejects_unknown_keys() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(b"[server]\nbind_addr = \"127.0.0.1:8080\"\nmystery = 1\n")
        .map_err(|err| err.to_string())?;
    assert_rejected(ContactDeskConfig::load(Some(file.path())), "config parse error")
}

#[test]
fn load_rejects_malformed_bind_addr() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(b"[server]\nbind_addr = \"not-an-addr\"\n").map_err(|err| err.to_string())?;
    assert_rejected(ContactDeskConfig::load(Some(file.path())), "not a socket address")
}

#[test]
fn load_rejects_zero_busy_timeout() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(b"[store]\nbusy_timeout_ms = 0\n").map_err(|err| err.to_string())?;
    assert_rejected(ContactDeskConfig::load(Some(file.path())), "busy_timeout_ms")
}

#[test]
fn load_accepts_full_valid_file() -> TestResult {
    let mut file = NamedTempFile::new().map_err(|err| err.to_string())?;
    file.write_all(
        b"[server]\nbind_addr = \"127.0.0.1:9090\"\nmax_body_bytes = 32768\n\n[store]\npath = \
          \"data/contacts.db\"\nbusy_timeout_ms = 2500\njournal_mode = \"wal\"\nsync_mode = \
          \"normal\"\n",
    )
    .map_err(|err| err.to_string())?;
    let config = ContactDeskConfig::load(Some(file.path())).map_err(|err| err.to_string())?;
    if config.server.bind_addr != "127.0.0.1:9090" {
        return Err("bind_addr not honored".to_string());
    }
    let store = config.store.to_sqlite_config();
    if store.busy_timeout_ms != 2_500 {
        return Err("busy_timeout_ms not honored".to_string());
    }
    Ok(())
}
