//! Validation tests for contact-form-config.
// crates/contact-form-config/tests/config_validation.rs
// =============================================================================
// Module: Config Validation Tests
// Description: Validate server, store, and form constraints.
// Purpose: Ensure inconsistent configuration is rejected before startup.
// =============================================================================

use std::path::PathBuf;

use contact_form_config::ContactFormConfig;
use contact_form_config::DEFAULT_MAX_BODY_BYTES;
use contact_form_config::MAX_BODY_BYTES_LIMIT;
use contact_form_config::MIN_BODY_BYTES;
use contact_form_config::MAX_SUCCESS_DISPLAY_MS;
use contact_form_config::StoreType;
use contact_form_core::MAX_VALID_PAYLOAD_BYTES;

mod common;

type TestResult = Result<(), String>;

#[test]
fn server_rejects_invalid_bind() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.server.bind = "localhost".to_string();
    common::assert_invalid(config.validate(), "invalid bind address")
}

#[test]
fn server_rejects_zero_body_limit() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.server.max_body_bytes = 0;
    common::assert_invalid(config.validate(), "max_body_bytes below minimum")
}

#[test]
fn server_rejects_body_limit_below_largest_valid_submission() -> TestResult {
    let parsed = ContactFormConfig::from_toml_str("[server]\nmax_body_bytes = 16\n");
    common::assert_invalid(parsed.map(|_| ()), "max_body_bytes below minimum")?;

    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.server.max_body_bytes = MIN_BODY_BYTES - 1;
    common::assert_invalid(config.validate(), "max_body_bytes below minimum")?;
    config.server.max_body_bytes = MIN_BODY_BYTES;
    config.validate().map_err(|err| err.to_string())?;
    assert!(DEFAULT_MAX_BODY_BYTES >= MIN_BODY_BYTES);
    assert_eq!(MIN_BODY_BYTES, MAX_VALID_PAYLOAD_BYTES);
    Ok(())
}

#[test]
fn server_rejects_oversized_body_limit() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.server.max_body_bytes = MAX_BODY_BYTES_LIMIT + 1;
    common::assert_invalid(config.validate(), "max_body_bytes exceeds limit")
}

#[test]
fn audit_rejects_empty_path() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.server.audit.path = Some(String::new());
    common::assert_invalid(config.validate(), "audit.path must not be empty")
}

#[test]
fn memory_store_rejects_path() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.store.path = Some(PathBuf::from("contact.db"));
    common::assert_invalid(config.validate(), "memory store must not set path")
}

#[test]
fn sqlite_store_requires_path() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.store.store_type = StoreType::Sqlite;
    common::assert_invalid(config.validate(), "sqlite store requires path")
}

#[test]
fn sqlite_store_rejects_overlong_component() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.store.store_type = StoreType::Sqlite;
    config.store.path = Some(PathBuf::from("data").join("a".repeat(300)));
    common::assert_invalid(config.validate(), "config path component too long")
}

#[test]
fn sqlite_store_rejects_zero_busy_timeout() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.store.store_type = StoreType::Sqlite;
    config.store.path = Some(PathBuf::from("contact.db"));
    config.store.busy_timeout_ms = 0;
    common::assert_invalid(config.validate(), "busy_timeout_ms must be greater than zero")
}

#[test]
fn form_rejects_out_of_range_display_time() -> TestResult {
    let mut config = common::minimal_config().map_err(|err| err.to_string())?;
    config.form.success_display_ms = 0;
    common::assert_invalid(config.validate(), "success_display_ms out of range")?;
    config.form.success_display_ms = MAX_SUCCESS_DISPLAY_MS + 1;
    common::assert_invalid(config.validate(), "success_display_ms out of range")
}

#[test]
fn unknown_store_type_fails_to_parse() {
    assert!(common::config_from_toml("[store]\ntype = \"postgres\"\n").is_err());
}
