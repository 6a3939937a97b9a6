//! Preimage normalization.
//!
//! Preimages arrive as user-typed hex. The permissive parser walks the string
//! two characters at a time and silently drops any group that is not valid
//! hex, plus a dangling odd character. It never fails, but it records how
//! much it dropped so callers can refuse a lossy result. The strict parser
//! rejects such input outright.
//!
//! Preimage bytes are secrets in transit: nothing here logs or formats them.

use std::fmt;
use thiserror::Error;

/// Errors from the strict preimage parser.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PreimageError {
    /// Input is not an even-length hex string.
    #[error("invalid preimage hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

/// Remove every whitespace character, including internal newlines.
#[must_use]
pub fn strip_whitespace(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Bytes recovered from a preimage string.
#[derive(Clone, PartialEq, Eq)]
pub struct NormalizedPreimage {
    bytes: Vec<u8>,
    dropped: usize,
}

impl NormalizedPreimage {
    /// The parsed bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of 2-character groups (or a dangling character) that were dropped.
    #[must_use]
    pub const fn dropped(&self) -> usize {
        self.dropped
    }

    /// True when every character of the input contributed to a byte.
    #[must_use]
    pub const fn is_lossless(&self) -> bool {
        self.dropped == 0
    }

    /// True when no byte was recovered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for NormalizedPreimage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NormalizedPreimage")
            .field("len", &self.bytes.len())
            .field("dropped", &self.dropped)
            .finish()
    }
}

/// Parse a preimage permissively.
///
/// Whitespace is stripped first, so normalizing an already-clean string is a
/// no-op. Each 2-character group must be two hex digits (either case) or it
/// is dropped; a final odd character is dropped too.
#[must_use]
pub fn normalize(raw: &str) -> NormalizedPreimage {
    let digits: Vec<char> = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let mut bytes = Vec::with_capacity(digits.len() / 2);
    let mut dropped = 0;

    for group in digits.chunks(2) {
        match group {
            [hi, lo] => match (hi.to_digit(16), lo.to_digit(16)) {
                // both digits are < 16, so the byte cannot overflow
                (Some(hi), Some(lo)) => bytes.push(((hi << 4) | lo) as u8),
                _ => dropped += 1,
            },
            _ => dropped += 1,
        }
    }

    NormalizedPreimage { bytes, dropped }
}

/// Parse a preimage strictly.
///
/// # Errors
///
/// Returns [`PreimageError::InvalidHex`] for odd-length input or any non-hex
/// character.
pub fn normalize_strict(raw: &str) -> Result<Vec<u8>, PreimageError> {
    Ok(hex::decode(strip_whitespace(raw))?)
}
