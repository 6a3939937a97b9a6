//! Payment validation: the single entry point tying decoder, normalizer and
//! verifier together.
//!
//! ```text
//! (invoice, preimage)
//!        │
//!        ▼
//! strip whitespace ──(either empty)──▶ EmptyInput
//!        │
//!        ▼
//! decode invoice ──(error)──▶ UnsupportedFormat / MissingPaymentHash / DecodeFailure
//!        │
//!        ▼
//! normalize preimage ──(empty, lossy, strict error)──▶ Mismatch
//!        │
//!        ▼
//! SHA-256 + compare ──▶ Verified / Mismatch
//! ```
//!
//! [`PaymentValidator::validate_payment`] folds every failure into a
//! [`VerificationResult`] and never panics. [`PaymentValidator::try_verify`]
//! is the same check for callers that prefer `?`.

use crate::config::{PreimageMode, VerifierConfig};
use crate::error::Error;
use crate::invoice::{DecodeError, InvoiceDecoder};
use crate::preimage::{normalize, normalize_strict, strip_whitespace, PreimageError};
use crate::verifier::verify_hash;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Message for a blank invoice or preimage.
pub const MSG_EMPTY_INPUT: &str = "Please provide both invoice and preimage";
/// Message for an invoice with an unknown prefix.
pub const MSG_UNSUPPORTED_FORMAT: &str = "Unsupported invoice format";
/// Message for an invoice without a payment hash.
pub const MSG_MISSING_PAYMENT_HASH: &str = "Invalid invoice: payment hash not found";
/// Message for a preimage that settles the invoice.
pub const MSG_VERIFIED: &str = "Payment verified! ✓";
/// Message for a preimage that does not settle the invoice.
pub const MSG_INVALID_PREIMAGE: &str = "Invalid preimage ✗";

/// Machine-readable outcome of a verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationOutcome {
    /// SHA-256 of the preimage equals the payment hash.
    Verified,
    /// The preimage does not hash to the payment hash.
    Mismatch,
    /// Invoice or preimage was blank.
    EmptyInput,
    /// Invoice prefix matched no known scheme.
    UnsupportedFormat,
    /// Invoice decoded but has no payment hash.
    MissingPaymentHash,
    /// The invoice decoder rejected the encoding.
    DecodeFailure,
}

/// Result of one verification call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    /// True only when the preimage proves payment.
    pub success: bool,
    /// Human-readable message.
    pub message: String,
    /// Machine-readable outcome.
    pub outcome: VerificationOutcome,
}

impl VerificationResult {
    fn new(outcome: VerificationOutcome, message: impl Into<String>) -> Self {
        Self {
            success: outcome == VerificationOutcome::Verified,
            message: message.into(),
            outcome,
        }
    }

    /// Preimage settles the invoice.
    #[must_use]
    pub fn verified() -> Self {
        Self::new(VerificationOutcome::Verified, MSG_VERIFIED)
    }

    /// Preimage does not settle the invoice.
    #[must_use]
    pub fn mismatch() -> Self {
        Self::new(VerificationOutcome::Mismatch, MSG_INVALID_PREIMAGE)
    }

    /// Invoice or preimage missing.
    #[must_use]
    pub fn empty_input() -> Self {
        Self::new(VerificationOutcome::EmptyInput, MSG_EMPTY_INPUT)
    }

    /// Any other failure, reported as `Error: <message>`.
    #[must_use]
    pub fn decode_failure(message: impl std::fmt::Display) -> Self {
        Self::new(
            VerificationOutcome::DecodeFailure,
            format!("Error: {message}"),
        )
    }
}

impl From<DecodeError> for VerificationResult {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::UnsupportedFormat => {
                Self::new(VerificationOutcome::UnsupportedFormat, MSG_UNSUPPORTED_FORMAT)
            }
            DecodeError::MissingPaymentHash => Self::new(
                VerificationOutcome::MissingPaymentHash,
                MSG_MISSING_PAYMENT_HASH,
            ),
            DecodeError::DecodeFailure(message) => Self::decode_failure(message),
        }
    }
}

/// Verifies that a preimage settles an invoice.
#[derive(Debug, Clone)]
pub struct PaymentValidator {
    decoder: InvoiceDecoder,
    preimage_mode: PreimageMode,
}

impl PaymentValidator {
    /// Create a validator from configuration, using the LDK decoders.
    #[must_use]
    pub fn new(config: &VerifierConfig) -> Self {
        Self::with_decoder(InvoiceDecoder::new(config), config.preimage_mode)
    }

    /// Create a validator with an explicit invoice decoder.
    #[must_use]
    pub fn with_decoder(decoder: InvoiceDecoder, preimage_mode: PreimageMode) -> Self {
        Self {
            decoder,
            preimage_mode,
        }
    }

    /// The invoice decoder in use.
    #[must_use]
    pub const fn decoder(&self) -> &InvoiceDecoder {
        &self.decoder
    }

    /// Validate a payment proof.
    ///
    /// Whitespace anywhere in either input is ignored. The decoder is not
    /// consulted when either input is blank, and the preimage is not hashed
    /// when the invoice cannot be decoded.
    #[must_use]
    pub fn validate_payment(&self, invoice_raw: &str, preimage_raw: &str) -> VerificationResult {
        let invoice = strip_whitespace(invoice_raw);
        let preimage = strip_whitespace(preimage_raw);

        if invoice.is_empty() || preimage.is_empty() {
            debug!("Rejecting verification with blank input");
            return VerificationResult::empty_input();
        }

        let payment_hash = match self.decoder.payment_hash(&invoice) {
            Ok(hash) => hash,
            Err(e) => {
                warn!("Invoice rejected: {e}");
                return e.into();
            }
        };

        let bytes = self.preimage_bytes(&preimage).unwrap_or_else(|e| {
            debug!("Strict preimage parse failed: {e}");
            None
        });
        let result = match bytes {
            Some(bytes) if verify_hash(&bytes, &payment_hash) => VerificationResult::verified(),
            _ => VerificationResult::mismatch(),
        };

        info!(
            "Verification for payment hash {payment_hash}: {:?}",
            result.outcome
        );
        result
    }

    /// Verify a payment proof, returning failures as errors.
    ///
    /// A preimage that does not settle the invoice is `Ok(false)`, as is a
    /// lossy permissive parse.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Input`] for blank input, [`Error::Decode`] when no
    /// payment hash can be extracted, and [`Error::Preimage`] when the strict
    /// parser rejects the preimage.
    pub fn try_verify(&self, invoice_raw: &str, preimage_raw: &str) -> crate::Result<bool> {
        let invoice = strip_whitespace(invoice_raw);
        let preimage = strip_whitespace(preimage_raw);
        if invoice.is_empty() || preimage.is_empty() {
            return Err(Error::Input(MSG_EMPTY_INPUT.to_string()));
        }

        let payment_hash = self.decoder.payment_hash(&invoice)?;
        Ok(self
            .preimage_bytes(&preimage)?
            .is_some_and(|bytes| verify_hash(&bytes, &payment_hash)))
    }

    /// Preimage bytes fit for hashing, or `None` if the input must not be
    /// compared (empty or lossy).
    fn preimage_bytes(&self, preimage: &str) -> Result<Option<Vec<u8>>, PreimageError> {
        match self.preimage_mode {
            PreimageMode::Permissive => {
                let normalized = normalize(preimage);
                if normalized.is_empty() || !normalized.is_lossless() {
                    debug!(
                        "Preimage parse dropped {} group(s), yielding {} byte(s)",
                        normalized.dropped(),
                        normalized.bytes().len()
                    );
                    return Ok(None);
                }
                Ok(Some(normalized.bytes().to_vec()))
            }
            PreimageMode::Strict => {
                let bytes = normalize_strict(preimage)?;
                Ok((!bytes.is_empty()).then_some(bytes))
            }
        }
    }
}

impl Default for PaymentValidator {
    fn default() -> Self {
        Self::new(&VerifierConfig::default())
    }
}
