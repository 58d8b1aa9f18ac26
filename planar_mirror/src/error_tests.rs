//! Unit tests for error.rs
//!
//! Tests all Error variants, the error macros, and trait implementations.

use crate::error::{Error, Result, log_and_return_error};

// ============================================================================
// ERROR DISPLAY TESTS
// ============================================================================

#[test]
fn test_backend_error_display() {
    let err = Error::BackendError("render target allocation failed".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Backend error"));
    assert!(display.contains("render target allocation failed"));
}

#[test]
fn test_out_of_memory_display() {
    let err = Error::OutOfMemory;
    assert_eq!(format!("{}", err), "Out of GPU memory");
}

#[test]
fn test_invalid_resource_display() {
    let err = Error::InvalidResource("mirror was destroyed".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Invalid resource"));
    assert!(display.contains("mirror was destroyed"));
}

#[test]
fn test_initialization_failed_display() {
    let err = Error::InitializationFailed("missing default viewpoint".to_string());
    let display = format!("{}", err);
    assert!(display.contains("Initialization failed"));
    assert!(display.contains("missing default viewpoint"));
}

// ============================================================================
// ERROR TRAIT IMPLEMENTATIONS
// ============================================================================

#[test]
fn test_error_is_std_error() {
    let err = Error::OutOfMemory;
    let _: &dyn std::error::Error = &err;
}

#[test]
fn test_error_clone_and_debug() {
    let err = Error::InvalidResource("viewpoint".to_string());
    let cloned = err.clone();
    assert!(format!("{:?}", cloned).contains("InvalidResource"));
}

// ============================================================================
// MACROS
// ============================================================================

fn failing_operation(fail: bool) -> Result<u32> {
    if fail {
        crate::mirror_bail!("mirror3d::test", "operation failed with code {}", 7);
    }
    Ok(1)
}

#[test]
fn test_mirror_bail_returns_backend_error() {
    match failing_operation(true) {
        Err(Error::BackendError(msg)) => assert_eq!(msg, "operation failed with code 7"),
        other => panic!("Expected BackendError, got {:?}", other),
    }
    assert_eq!(failing_operation(false).unwrap(), 1);
}

#[test]
fn test_mirror_err_builds_backend_error() {
    let err = crate::mirror_err!("mirror3d::test", "missing {}", "target");
    assert!(matches!(err, Error::BackendError(ref msg) if msg == "missing target"));
}

#[test]
fn test_log_and_return_error_preserves_variant() {
    let err = log_and_return_error(
        "mirror3d::test",
        Error::InitializationFailed("zero resolution".to_string()),
    );
    assert!(matches!(err, Error::InitializationFailed(_)));
}
