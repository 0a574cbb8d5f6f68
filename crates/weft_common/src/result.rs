//! Common result and error types for the Weft toolchain.

/// The standard result type for fallible internal operations.
///
/// `Err` indicates an unrecoverable internal error — a bug in Weft itself,
/// not a problem with the input netlist. Input-contract violations are
/// reported through the typed errors of the crate that detects them.
pub type WeftResult<T> = Result<T, InternalError>;

/// An internal error indicating a bug in Weft, not a user input problem.
///
/// These should never occur during normal operation; one firing means an
/// invariant the code relies on has been broken.
#[derive(Debug, thiserror::Error)]
#[error("internal error: {message}")]
pub struct InternalError {
    /// Description of the broken invariant.
    pub message: String,
}

impl InternalError {
    /// Creates a new internal error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for InternalError {
    fn from(message: String) -> Self {
        Self { message }
    }
}
