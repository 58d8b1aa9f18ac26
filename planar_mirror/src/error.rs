//! Error types for the planar mirror core
//!
//! This module defines the error types used throughout the crate,
//! including host renderer failures, configuration errors, and
//! lookups of stale keys.

use std::fmt;

/// Result type for mirror operations
pub type Result<T> = std::result::Result<T, Error>;

/// Mirror core errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Host renderer failure (allocation, render call, blit)
    BackendError(String),

    /// Out of GPU memory while creating a render target
    OutOfMemory,

    /// Invalid resource (unknown or destroyed mirror, viewpoint, render target)
    InvalidResource(String),

    /// Initialization failed (missing collaborator, bad configuration)
    InitializationFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Log an ERROR and build an `Error::BackendError` from a formatted message
///
/// # Example
///
/// ```no_run
/// use planar_mirror::mirror_err;
///
/// let err = mirror_err!("mirror3d::TargetManager", "target {} missing", 3);
/// ```
#[macro_export]
macro_rules! mirror_err {
    ($source:expr, $($arg:tt)*) => {{
        let message = format!($($arg)*);
        $crate::mirror_error!($source, "{}", message);
        $crate::mirror3d::Error::BackendError(message)
    }};
}

/// Log an ERROR and return early with an `Error::BackendError`
#[macro_export]
macro_rules! mirror_bail {
    ($source:expr, $($arg:tt)*) => {
        return Err($crate::mirror_err!($source, $($arg)*))
    };
}

/// Log an error with its variant-specific wording and hand it back.
///
/// Used where a specific variant (not `BackendError`) must be returned.
pub(crate) fn log_and_return_error(source: &str, error: Error) -> Error {
    match &error {
        Error::InitializationFailed(msg) => {
            crate::mirror_error!(source, "Initialization failed: {}", msg);
        }
        Error::InvalidResource(msg) => {
            crate::mirror_error!(source, "Invalid resource: {}", msg);
        }
        _ => {
            crate::mirror_error!(source, "{}", error);
        }
    }
    error
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
