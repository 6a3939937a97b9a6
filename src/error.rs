//! Error types for lnproof.

use crate::invoice::DecodeError;
use crate::preimage::PreimageError;
use thiserror::Error;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur outside the verification boundary.
///
/// Verification itself never returns these: [`crate::PaymentValidator`] folds
/// every failure into a [`crate::VerificationResult`].
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or written.
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invoice could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Preimage rejected by the strict parser.
    #[error(transparent)]
    Preimage(#[from] PreimageError),

    /// Input could not be collected (bad URL, closed stdin, ...).
    #[error("input error: {0}")]
    Input(String),
}
