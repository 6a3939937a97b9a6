//! End-to-end tests for lnproof.
//!
//! Invoices are built and signed locally with the LDK builders, then fed
//! through the public validator, session and input surfaces. No Lightning
//! node is involved.


mod verification_tests;

pub use harness::{HarnessError, TestHarness};
