//! SHA-256 preimage verification.
//!
//! The digest of the preimage is compared to the invoice's payment hash in
//! constant time. Hex input on the hash side is accepted in either case.

use crate::invoice::PaymentHash;
use crate::preimage::normalize;
use sha2::{Digest as _, Sha256};
use subtle::ConstantTimeEq;

/// SHA-256 digest of the preimage bytes.
#[must_use]
pub fn digest(preimage: &[u8]) -> [u8; 32] {
    Sha256::digest(preimage).into()
}

/// Lowercase, zero-padded hex of the SHA-256 digest.
#[must_use]
pub fn digest_hex(preimage: &[u8]) -> String {
    hex::encode(digest(preimage))
}

/// Check `SHA-256(preimage) == payment_hash`.
#[must_use]
pub fn verify_hash(preimage: &[u8], payment_hash: &PaymentHash) -> bool {
    let computed = digest(preimage);
    computed
        .as_slice()
        .ct_eq(payment_hash.as_bytes().as_slice())
        .into()
}

/// Check a preimage against a hex payment hash.
///
/// A hash that is not 32 bytes of hex never matches.
#[must_use]
pub fn verify(preimage: &[u8], payment_hash_hex: &str) -> bool {
    PaymentHash::from_hex(payment_hash_hex).is_some_and(|hash| verify_hash(preimage, &hash))
}

/// Payment hash (lowercase hex) for a hex preimage, parsed permissively.
#[must_use]
pub fn payment_hash_for_preimage_hex(preimage_hex: &str) -> String {
    digest_hex(normalize(preimage_hex).bytes())
}
