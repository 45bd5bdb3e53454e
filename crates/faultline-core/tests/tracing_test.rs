//! Tests for tracing initialization.

use faultline_core::tracing::init_tracing;
use faultline_core::tracing::setup::{DEFAULT_FILTER, LOG_ENV_VAR};

/// T0-TRC-01: init_tracing is idempotent
#[test]
fn test_init_tracing_twice() {
    init_tracing();
    init_tracing();
    tracing::info!("tracing initialized");
}

/// T0-TRC-02: filter constants
#[test]
fn test_filter_constants() {
    assert_eq!(LOG_ENV_VAR, "FAULTLINE_LOG");
    assert!(tracing_subscriber::EnvFilter::try_new(DEFAULT_FILTER).is_ok());
}
