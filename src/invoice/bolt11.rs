//! BOLT11 decoding on top of `lightning-invoice`.
//!
//! Only the syntactic layer is parsed (`SignedRawBolt11Invoice`), so an
//! invoice without a `p` tag still decodes and is reported as missing its
//! payment hash. Signatures and expiry are not checked.

use super::{
    DecodeError, DecodedInvoice, InvoiceVariant, VariantDecoder, AMOUNT_MSAT, DESCRIPTION,
    PAYMENT_HASH,
};
use lightning_invoice::SignedRawBolt11Invoice;
use std::str::FromStr;

/// Field name for the currency (network) code.
pub const CURRENCY: &str = "currency";
/// Field name for the creation timestamp (unix seconds).
pub const TIMESTAMP: &str = "timestamp";
/// Field name for the description hash.
pub const DESCRIPTION_HASH: &str = "description_hash";
/// Field name for the payment secret.
pub const PAYMENT_SECRET: &str = "payment_secret";
/// Field name for the expiry in seconds.
pub const EXPIRY: &str = "expiry";
/// Field name for the final CLTV delta.
pub const MIN_FINAL_CLTV_EXPIRY_DELTA: &str = "min_final_cltv_expiry_delta";
/// Field name for the explicit payee key.
pub const PAYEE_PUB_KEY: &str = "payee_pub_key";

/// Decoder for `lnbc`/`lntb` payment requests.
#[derive(Debug, Clone, Copy, Default)]
pub struct Bolt11Decoder;

impl VariantDecoder for Bolt11Decoder {
    fn decode(&self, raw: &str) -> Result<DecodedInvoice, DecodeError> {
        let signed = SignedRawBolt11Invoice::from_str(raw)
            .map_err(|e| DecodeError::DecodeFailure(format!("invalid bolt11 invoice: {e}")))?;
        let invoice = signed.raw_invoice();

        let mut fields = vec![
            (CURRENCY, invoice.currency().to_string()),
            (
                TIMESTAMP,
                invoice.data.timestamp.as_unix_timestamp().to_string(),
            ),
        ];

        if let Some(hash) = invoice.payment_hash() {
            fields.push((PAYMENT_HASH, hash.0.to_string()));
        }
        // 1 msat == 10 pico-BTC
        if let Some(pico_btc) = invoice.amount_pico_btc() {
            fields.push((AMOUNT_MSAT, (pico_btc / 10).to_string()));
        }
        if let Some(description) = invoice.description() {
            fields.push((DESCRIPTION, description.to_string()));
        }
        if let Some(hash) = invoice.description_hash() {
            fields.push((DESCRIPTION_HASH, hash.0.to_string()));
        }
        if let Some(secret) = invoice.payment_secret() {
            fields.push((PAYMENT_SECRET, hex::encode(secret.0)));
        }
        if let Some(expiry) = invoice.expiry_time() {
            fields.push((EXPIRY, expiry.as_seconds().to_string()));
        }
        if let Some(delta) = invoice.min_final_cltv_expiry_delta() {
            fields.push((MIN_FINAL_CLTV_EXPIRY_DELTA, delta.0.to_string()));
        }
        if let Some(payee) = invoice.payee_pub_key() {
            fields.push((PAYEE_PUB_KEY, payee.0.to_string()));
        }

        Ok(DecodedInvoice::new(InvoiceVariant::Bolt11, fields))
    }
}
