//! BOLT12 decoding on top of the `lightning` offers module.
//!
//! Two encodings reach this decoder:
//! - `lno1...` offers, which never carry a payment hash;
//! - `lni1...` invoices, bech32 without checksum, whose TLV stream holds one.
//!
//! Both may be split into `+`-separated chunks.

use super::{
    DecodeError, DecodedInvoice, InvoiceVariant, VariantDecoder, AMOUNT_MSAT, DESCRIPTION,
    PAYMENT_HASH,
};
use bech32::primitives::decode::CheckedHrpstring;
use bech32::NoChecksum;
use lightning::offers::invoice::Bolt12Invoice;
use lightning::offers::offer::{Amount, Offer};
use std::str::FromStr;

/// Field name for the offer issuer.
pub const ISSUER: &str = "issuer";
/// Field name for the offer id.
pub const OFFER_ID: &str = "offer_id";
/// Field name for the invoice creation time (unix seconds).
pub const CREATED_AT: &str = "created_at";
/// Field name for the invoice's relative expiry in seconds.
pub const RELATIVE_EXPIRY: &str = "relative_expiry";
/// Field name for the key the invoice was signed with.
pub const SIGNING_PUBKEY: &str = "signing_pubkey";

const INVOICE_HRP: &str = "lni";

/// Decoder for `lno1`/`lni1` strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bolt12Decoder;

impl VariantDecoder for Bolt12Decoder {
    fn decode(&self, raw: &str) -> Result<DecodedInvoice, DecodeError> {
        let encoded = join_chunks(raw)?;
        let lowered = encoded.to_ascii_lowercase();

        if lowered.starts_with("lno1") {
            decode_offer(&encoded)
        } else if lowered.starts_with("lni1") {
            decode_invoice(&encoded)
        } else {
            Err(DecodeError::DecodeFailure(
                "unrecognised bolt12 encoding".to_string(),
            ))
        }
    }
}

/// Join `+`-separated chunks, rejecting empty ones.
fn join_chunks(raw: &str) -> Result<String, DecodeError> {
    if !raw.contains('+') {
        return Ok(raw.to_string());
    }

    let mut joined = String::with_capacity(raw.len());
    for chunk in raw.split('+') {
        let chunk = chunk.trim();
        if chunk.is_empty() {
            return Err(DecodeError::DecodeFailure(
                "invalid bolt12 continuation".to_string(),
            ));
        }
        joined.push_str(chunk);
    }
    Ok(joined)
}

fn decode_offer(encoded: &str) -> Result<DecodedInvoice, DecodeError> {
    let offer = Offer::from_str(encoded)
        .map_err(|e| DecodeError::DecodeFailure(format!("invalid bolt12 offer: {e:?}")))?;

    let mut fields = vec![(OFFER_ID, hex::encode(offer.id().0))];
    if let Some(description) = offer.description() {
        fields.push((DESCRIPTION, description.to_string()));
    }
    if let Some(issuer) = offer.issuer() {
        fields.push((ISSUER, issuer.to_string()));
    }
    if let Some(Amount::Bitcoin { amount_msats }) = offer.amount() {
        fields.push((AMOUNT_MSAT, amount_msats.to_string()));
    }

    Ok(DecodedInvoice::new(InvoiceVariant::Bolt12, fields))
}

fn decode_invoice(encoded: &str) -> Result<DecodedInvoice, DecodeError> {
    let parsed = CheckedHrpstring::new::<NoChecksum>(encoded)
        .map_err(|e| DecodeError::DecodeFailure(format!("invalid bech32 encoding: {e}")))?;

    if parsed.hrp().lowercase_char_iter().ne(INVOICE_HRP.chars()) {
        return Err(DecodeError::DecodeFailure(format!(
            "unexpected bech32 hrp, wanted {INVOICE_HRP}"
        )));
    }

    let bytes: Vec<u8> = parsed.byte_iter().collect();
    let invoice = Bolt12Invoice::try_from(bytes)
        .map_err(|e| DecodeError::DecodeFailure(format!("invalid bolt12 invoice: {e:?}")))?;

    let fields = vec![
        (PAYMENT_HASH, hex::encode(invoice.payment_hash().0)),
        (AMOUNT_MSAT, invoice.amount_msats().to_string()),
        (CREATED_AT, invoice.created_at().as_secs().to_string()),
        (
            RELATIVE_EXPIRY,
            invoice.relative_expiry().as_secs().to_string(),
        ),
        (SIGNING_PUBKEY, invoice.signing_pubkey().to_string()),
    ];

    Ok(DecodedInvoice::new(InvoiceVariant::Bolt12, fields))
}
