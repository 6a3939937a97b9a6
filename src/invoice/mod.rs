//! Invoice decoding: variant detection and payment hash extraction.
//!
//! Detection is a pure prefix test on the (lowercased) invoice string. Bolt11
//! prefixes always win over Bolt12 ones, and a string matching neither is
//! rejected rather than routed to a default decoder.
//!
//! ```text
//! raw invoice
//!      │
//!      ▼
//! ┌──────────────┐   no match
//! │  classify()  │─────────────▶ UnsupportedFormat
//! └──────┬───────┘
//!   ┌────┴─────┐
//! Bolt11     Bolt12
//!   │          │
//!   ▼          ▼
//! tagged     offer / invoice
//! fields     TLV stream
//!   └────┬─────┘
//!        ▼
//!  `payment_hash` field ──(absent)──▶ MissingPaymentHash
//! ```

mod bolt11;
mod bolt12;

pub use bolt11::Bolt11Decoder;
pub use bolt12::Bolt12Decoder;

use crate::config::{Bolt12Scheme, VerifierConfig};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Field name holding the payment hash in a [`DecodedInvoice`].
pub const PAYMENT_HASH: &str = "payment_hash";
/// Field name for the amount in millisatoshis.
pub const AMOUNT_MSAT: &str = "amount_msat";
/// Field name for the free-form description.
pub const DESCRIPTION: &str = "description";

/// Errors produced while turning an invoice string into a payment hash.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The string matches none of the known invoice prefixes.
    #[error("Unsupported invoice format")]
    UnsupportedFormat,

    /// The invoice decoded, but carries no usable payment hash.
    #[error("Invalid invoice: payment hash not found")]
    MissingPaymentHash,

    /// The variant decoder rejected the encoding.
    #[error("{0}")]
    DecodeFailure(String),
}

/// Lightning invoice encodings understood by the verifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvoiceVariant {
    /// BOLT11 payment request.
    Bolt11,
    /// BOLT12 offer or invoice.
    Bolt12,
}

impl fmt::Display for InvoiceVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bolt11 => write!(f, "bolt11"),
            Self::Bolt12 => write!(f, "bolt12"),
        }
    }
}

/// Classify an invoice string by prefix.
///
/// Bolt11 prefixes are tested first; the first match wins.
///
/// # Errors
///
/// Returns [`DecodeError::UnsupportedFormat`] if no prefix matches.
pub fn classify(
    raw: &str,
    bolt11_prefixes: &[String],
    bolt12_scheme: Bolt12Scheme,
) -> Result<InvoiceVariant, DecodeError> {
    let lowered = raw.trim().to_ascii_lowercase();
    if lowered.is_empty() {
        return Err(DecodeError::UnsupportedFormat);
    }

    if bolt11_prefixes
        .iter()
        .any(|prefix| lowered.starts_with(&prefix.to_ascii_lowercase()))
    {
        return Ok(InvoiceVariant::Bolt11);
    }

    if bolt12_scheme
        .prefixes()
        .iter()
        .any(|prefix| lowered.starts_with(prefix))
    {
        return Ok(InvoiceVariant::Bolt12);
    }

    Err(DecodeError::UnsupportedFormat)
}

/// 32-byte payment hash extracted from an invoice.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaymentHash([u8; 32]);

impl PaymentHash {
    /// Wrap raw hash bytes.
    #[must_use]
    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse a 64-character hex string, in either case.
    #[must_use]
    pub fn from_hex(hex_str: &str) -> Option<Self> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(hex_str.trim(), &mut bytes).ok()?;
        Some(Self(bytes))
    }

    /// Raw hash bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex rendering.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for PaymentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PaymentHash({})", self.to_hex())
    }
}

impl fmt::Display for PaymentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Semantic fields recovered from one invoice.
///
/// Built once per verification call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedInvoice {
    variant: InvoiceVariant,
    fields: BTreeMap<&'static str, String>,
}

impl DecodedInvoice {
    /// Create a decoded invoice from `(field, value)` pairs.
    pub fn new(
        variant: InvoiceVariant,
        fields: impl IntoIterator<Item = (&'static str, String)>,
    ) -> Self {
        Self {
            variant,
            fields: fields.into_iter().collect(),
        }
    }

    /// Which decoder produced this invoice.
    #[must_use]
    pub const fn variant(&self) -> InvoiceVariant {
        self.variant
    }

    /// Look up a field by name.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// All fields, ordered by name.
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.fields.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// The payment hash, if present and well formed.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::MissingPaymentHash`] if the field is absent or
    /// is not 32 bytes of hex.
    pub fn payment_hash(&self) -> Result<PaymentHash, DecodeError> {
        self.get(PAYMENT_HASH)
            .and_then(PaymentHash::from_hex)
            .ok_or(DecodeError::MissingPaymentHash)
    }
}

/// A decoder for one invoice encoding.
///
/// Implementations only need to parse; selecting the right decoder and
/// extracting the payment hash is done by [`InvoiceDecoder`].
pub trait VariantDecoder: Send + Sync {
    /// Decode the invoice string into its semantic fields.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::DecodeFailure`] if the encoding is malformed.
    fn decode(&self, raw: &str) -> Result<DecodedInvoice, DecodeError>;
}

/// Selects a variant decoder by prefix and extracts the payment hash.
#[derive(Clone)]
pub struct InvoiceDecoder {
    bolt11_prefixes: Vec<String>,
    bolt12_scheme: Bolt12Scheme,
    bolt11: Arc<dyn VariantDecoder>,
    bolt12: Arc<dyn VariantDecoder>,
}

impl InvoiceDecoder {
    /// Create a decoder backed by the LDK parsers.
    #[must_use]
    pub fn new(config: &VerifierConfig) -> Self {
        Self::with_decoders(config, Arc::new(Bolt11Decoder), Arc::new(Bolt12Decoder))
    }

    /// Create a decoder with explicit variant decoders.
    #[must_use]
    pub fn with_decoders(
        config: &VerifierConfig,
        bolt11: Arc<dyn VariantDecoder>,
        bolt12: Arc<dyn VariantDecoder>,
    ) -> Self {
        Self {
            bolt11_prefixes: config.bolt11_prefixes.clone(),
            bolt12_scheme: config.bolt12_scheme,
            bolt11,
            bolt12,
        }
    }

    /// Classify an invoice with this decoder's prefix settings.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnsupportedFormat`] if no prefix matches.
    pub fn classify(&self, raw: &str) -> Result<InvoiceVariant, DecodeError> {
        classify(raw, &self.bolt11_prefixes, self.bolt12_scheme)
    }

    /// Decode an invoice into its fields.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::UnsupportedFormat`] for unknown prefixes and
    /// [`DecodeError::DecodeFailure`] when the variant decoder rejects it.
    pub fn decode(&self, raw: &str) -> Result<DecodedInvoice, DecodeError> {
        let raw = raw.trim();
        let variant = self.classify(raw)?;
        debug!("Invoice classified as {variant} ({} chars)", raw.len());

        let decoder = match variant {
            InvoiceVariant::Bolt11 => &self.bolt11,
            InvoiceVariant::Bolt12 => &self.bolt12,
        };

        decoder.decode(raw).inspect_err(|e| {
            warn!("{variant} decoder rejected invoice: {e}");
        })
    }

    /// Decode an invoice and return its payment hash.
    ///
    /// # Errors
    ///
    /// Returns any [`DecodeError`]; a syntactically valid invoice without a
    /// payment hash yields [`DecodeError::MissingPaymentHash`].
    pub fn payment_hash(&self, raw: &str) -> Result<PaymentHash, DecodeError> {
        let decoded = self.decode(raw)?;
        let hash = decoded.payment_hash()?;
        debug!("Extracted payment hash {hash} from {} invoice", decoded.variant());
        Ok(hash)
    }
}

impl Default for InvoiceDecoder {
    fn default() -> Self {
        Self::new(&VerifierConfig::default())
    }
}

impl fmt::Debug for InvoiceDecoder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvoiceDecoder")
            .field("bolt11_prefixes", &self.bolt11_prefixes)
            .field("bolt12_scheme", &self.bolt12_scheme)
            .finish_non_exhaustive()
    }
}
