//! # lnproof
//!
//! Lightning payment-proof verification: given an invoice (BOLT11 or BOLT12)
//! and a claimed preimage, decide whether `SHA-256(preimage)` equals the
//! invoice's payment hash.
//!
//! The crate never talks to a Lightning node and does not check signatures,
//! expiry or routing hints. It only checks the hash relation.
//!
//! ## Architecture
//!
//! ```text
//! invoice ──▶ invoice::InvoiceDecoder ──▶ PaymentHash ─┐
//!                                                     ├─▶ verifier ──▶ VerificationResult
//! preimage ─▶ preimage::normalize ─────▶ bytes ───────┘
//!
//!            (validation::PaymentValidator owns the flow)
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use lnproof::{PaymentValidator, VerifierConfig};
//!
//! let validator = PaymentValidator::new(&VerifierConfig::default());
//! let result = validator.validate_payment("lnbc1...", "00112233...");
//! println!("{}", result.message);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod input;
pub mod invoice;
pub mod preimage;
pub mod session;
pub mod validation;
pub mod verifier;

pub use config::{Bolt12Scheme, PreimageMode, VerifierConfig};
pub use error::{Error, Result};
pub use input::FormInput;
pub use invoice::{DecodeError, DecodedInvoice, InvoiceDecoder, InvoiceVariant, PaymentHash};
pub use session::{Submission, ValidationSession};
pub use validation::{PaymentValidator, VerificationOutcome, VerificationResult};
