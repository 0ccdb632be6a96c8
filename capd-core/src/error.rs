//! Common error types for CAPD

use thiserror::Error;

/// Common result type for CAPD operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the detection core
///
/// The detection engine itself is total: malformed per-beat fields default to
/// sentinel values and not-applicable analyses return empty results. Errors
/// occur only at the outermost parsing boundary and in the designation store.
#[derive(Error, Debug)]
pub enum Error {
    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
