//! Verification outcomes for real signed invoices.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::harness::Bolt11Options;
use super::TestHarness;
use lightning_invoice::Currency;
use lnproof::invoice::{AMOUNT_MSAT, DESCRIPTION, PAYMENT_HASH};
use lnproof::validation::{
    MSG_EMPTY_INPUT, MSG_INVALID_PREIMAGE, MSG_MISSING_PAYMENT_HASH, MSG_UNSUPPORTED_FORMAT,
    MSG_VERIFIED,
};
use lnproof::verifier::payment_hash_for_preimage_hex;
use lnproof::{
    Bolt12Scheme, InvoiceVariant, PreimageMode, VerificationOutcome, VerifierConfig,
};

/// SHA-256 of 32 zero bytes.
const ZEROS_HASH: &str = "66687aadf862bd776c8fc18b8e9f8e20089714856ee233b3902a591d0d5f2925";

fn zeros_preimage() -> String {
    "00".repeat(32)
}

#[test]
fn test_valid_preimage_verifies() {
    let harness = TestHarness::setup().unwrap();
    let invoice = harness.bolt11_for_preimage(&[0u8; 32]).unwrap();

    let result = harness.validator().validate_payment(&invoice, &zeros_preimage());

    assert!(result.success);
    assert_eq!(result.message, MSG_VERIFIED);
    assert_eq!(result.outcome, VerificationOutcome::Verified);
}

#[test]
fn test_decoder_exposes_minted_payment_hash() {
    let harness = TestHarness::setup().unwrap();
    let invoice = harness.bolt11_for_preimage(&[0u8; 32]).unwrap();

    let decoded = harness.validator().decoder().decode(&invoice).unwrap();
    assert_eq!(decoded.variant(), InvoiceVariant::Bolt11);
    assert_eq!(decoded.get(PAYMENT_HASH), Some(ZEROS_HASH));
    assert_eq!(decoded.get(DESCRIPTION), Some("lnproof e2e"));
    assert_eq!(decoded.payment_hash().unwrap().to_hex(), ZEROS_HASH);
    assert_eq!(payment_hash_for_preimage_hex(&zeros_preimage()), ZEROS_HASH);
}

#[test]
fn test_wrong_preimage_is_rejected() {
    let harness = TestHarness::setup().unwrap();
    let invoice = harness.bolt11_for_preimage(&[0u8; 32]).unwrap();

    let result = harness
        .validator()
        .validate_payment(&invoice, &"01".repeat(32));

    assert!(!result.success);
    assert_eq!(result.message, MSG_INVALID_PREIMAGE);
    assert_eq!(result.outcome, VerificationOutcome::Mismatch);
}

#[test]
fn test_whitespace_and_case_in_inputs_are_ignored() {
    let harness = TestHarness::setup().unwrap();
    let preimage: Vec<u8> = (0u8..32).collect();
    let invoice = harness.bolt11_for_preimage(&preimage).unwrap();

    let (head, tail) = invoice.split_at(invoice.len() / 2);
    let wrapped_invoice = format!("  {head}\n{tail}\n");
    let spaced_preimage = hex::encode_upper(&preimage)
        .as_bytes()
        .chunks(8)
        .map(|c| std::str::from_utf8(c).unwrap())
        .collect::<Vec<_>>()
        .join(" \n");

    let result = harness
        .validator()
        .validate_payment(&wrapped_invoice, &spaced_preimage);
    assert_eq!(result.outcome, VerificationOutcome::Verified);
}

#[test]
fn test_testnet_invoice_with_amount_verifies() {
    let harness = TestHarness::setup().unwrap();
    let preimage = [7u8; 32];
    let options = Bolt11Options {
        currency: Currency::BitcoinTestnet,
        amount_msat: Some(250_000),
        ..Bolt11Options::default()
    };
    let invoice = harness.bolt11_with(&preimage, &options).unwrap().to_string();
    assert!(invoice.starts_with("lntb"));

    let validator = harness.validator();
    let decoded = validator.decoder().decode(&invoice).unwrap();
    assert_eq!(decoded.get(AMOUNT_MSAT), Some("250000"));

    let result = validator.validate_payment(&invoice, &hex::encode(preimage));
    assert!(result.success);
}

#[test]
fn test_unsupported_format() {
    let harness = TestHarness::setup().unwrap();
    let result = harness
        .validator()
        .validate_payment("garbage", &zeros_preimage());

    assert!(!result.success);
    assert_eq!(result.message, MSG_UNSUPPORTED_FORMAT);
    assert_eq!(result.outcome, VerificationOutcome::UnsupportedFormat);
}

#[test]
fn test_empty_inputs() {
    let harness = TestHarness::setup().unwrap();
    let invoice = harness.bolt11_for_preimage(&[0u8; 32]).unwrap();
    let validator = harness.validator();

    for (inv, pre) in [
        (invoice.as_str(), ""),
        ("", "00"),
        (" \n ", " \t"),
    ] {
        let result = validator.validate_payment(inv, pre);
        assert_eq!(result.message, MSG_EMPTY_INPUT);
        assert_eq!(result.outcome, VerificationOutcome::EmptyInput);
    }
}

#[test]
fn test_corrupted_invoice_is_a_decode_failure() {
    let harness = TestHarness::setup().unwrap();
    let mut invoice = harness.bolt11_for_preimage(&[0u8; 32]).unwrap();
    // Flip the last checksum character.
    let last = invoice.pop().unwrap();
    invoice.push(if last == 'q' { 'p' } else { 'q' });

    let result = harness
        .validator()
        .validate_payment(&invoice, &zeros_preimage());
    assert_eq!(result.outcome, VerificationOutcome::DecodeFailure);
    assert!(result.message.starts_with("Error: "));
}

#[test]
fn test_bolt12_offer_has_no_payment_hash() {
    let harness = TestHarness::setup().unwrap();
    let offer = harness.bolt12_offer("coffee", 21_000).unwrap();

    let result = harness.validator().validate_payment(&offer, &zeros_preimage());
    assert!(!result.success);
    assert_eq!(result.message, MSG_MISSING_PAYMENT_HASH);
    assert_eq!(result.outcome, VerificationOutcome::MissingPaymentHash);
}

#[test]
fn test_bolt12_invoice_verifies() {
    let harness = TestHarness::setup().unwrap();
    let invoice = harness
        .bolt12_invoice_for_preimage(&[0u8; 32], 50_000)
        .unwrap();
    assert!(invoice.starts_with("lni1"));

    let validator = harness.validator();
    let decoded = validator.decoder().decode(&invoice).unwrap();
    assert_eq!(decoded.variant(), InvoiceVariant::Bolt12);
    assert_eq!(decoded.get(PAYMENT_HASH), Some(ZEROS_HASH));
    assert_eq!(decoded.get(AMOUNT_MSAT), Some("50000"));

    let result = validator.validate_payment(&invoice, &zeros_preimage());
    assert!(result.success);
    assert_eq!(result.message, MSG_VERIFIED);
}

#[test]
fn test_bolt12_invoice_wrong_preimage_is_rejected() {
    let harness = TestHarness::setup().unwrap();
    let invoice = harness
        .bolt12_invoice_for_preimage(&[0u8; 32], 50_000)
        .unwrap();

    let result = harness
        .validator()
        .validate_payment(&invoice, &"01".repeat(32));
    assert!(!result.success);
    assert_eq!(result.message, MSG_INVALID_PREIMAGE);
    assert_eq!(result.outcome, VerificationOutcome::Mismatch);
}

#[test]
fn test_uppercase_bolt12_invoice_verifies() {
    let harness = TestHarness::setup().unwrap();
    let preimage = [5u8; 32];
    let invoice = harness
        .bolt12_invoice_for_preimage(&preimage, 1_000)
        .unwrap()
        .to_ascii_uppercase();

    let result = harness
        .validator()
        .validate_payment(&invoice, &hex::encode(preimage));
    assert_eq!(result.outcome, VerificationOutcome::Verified);
}

#[test]
fn test_bolt12_invoice_rejected_when_only_offers_accepted() {
    let config = VerifierConfig {
        bolt12_scheme: Bolt12Scheme::Offer,
        ..VerifierConfig::default()
    };
    let harness = TestHarness::setup_with_config(config).unwrap();
    let invoice = harness
        .bolt12_invoice_for_preimage(&[0u8; 32], 50_000)
        .unwrap();

    let result = harness
        .validator()
        .validate_payment(&invoice, &zeros_preimage());
    assert_eq!(result.outcome, VerificationOutcome::UnsupportedFormat);
}

#[test]
fn test_bolt12_invoice_scheme_rejects_offers() {
    let config = VerifierConfig {
        bolt12_scheme: Bolt12Scheme::Invoice,
        ..VerifierConfig::default()
    };
    let harness = TestHarness::setup_with_config(config).unwrap();
    let offer = harness.bolt12_offer("coffee", 21_000).unwrap();

    let result = harness.validator().validate_payment(&offer, &zeros_preimage());
    assert_eq!(result.outcome, VerificationOutcome::UnsupportedFormat);
}

#[test]
fn test_odd_length_preimage_never_verifies() {
    let harness = TestHarness::setup().unwrap();
    let invoice = harness.bolt11_for_preimage(&[0u8; 32]).unwrap();

    // The trailing nibble is dropped, leaving 32 zero bytes, but a lossy
    // parse is never allowed to satisfy the hash.
    let result = harness
        .validator()
        .validate_payment(&invoice, &format!("{}0", zeros_preimage()));
    assert_eq!(result.outcome, VerificationOutcome::Mismatch);
}

#[test]
fn test_strict_mode_rejects_non_hex() {
    let config = VerifierConfig {
        preimage_mode: PreimageMode::Strict,
        ..VerifierConfig::default()
    };
    let harness = TestHarness::setup_with_config(config).unwrap();
    let invoice = harness.bolt11_for_preimage(&[0u8; 32]).unwrap();
    let validator = harness.validator();

    assert!(validator
        .validate_payment(&invoice, &zeros_preimage())
        .success);
    let result = validator.validate_payment(&invoice, &format!("zz{}", zeros_preimage()));
    assert_eq!(result.outcome, VerificationOutcome::Mismatch);
}

#[test]
fn test_result_serializes_for_json_output() {
    let harness = TestHarness::setup().unwrap();
    let invoice = harness.bolt11_for_preimage(&[0u8; 32]).unwrap();
    let result = harness.validator().validate_payment(&invoice, &zeros_preimage());

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["outcome"], "verified");
    assert_eq!(json["message"], MSG_VERIFIED);
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_minted_invoice_verifies_only_its_preimage(
            preimage in proptest::array::uniform32(any::<u8>()),
            other in proptest::array::uniform32(any::<u8>()),
        ) {
            prop_assume!(preimage != other);
            let harness = TestHarness::setup().unwrap();
            let invoice = harness.bolt11_for_preimage(&preimage).unwrap();
            let validator = harness.validator();

            prop_assert!(validator.validate_payment(&invoice, &hex::encode(preimage)).success);
            prop_assert!(!validator.validate_payment(&invoice, &hex::encode(other)).success);
        }
    }
}
