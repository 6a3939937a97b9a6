//! Validation session: runs independent verifications and keeps the result
//! of the most recent submission.
//!
//! Each submission takes a ticket from a monotonic counter. A result is only
//! published if no newer submission has published already, so a slow stale
//! run can never overwrite a fresher one. In-flight work is not cancelled.

use crate::validation::{PaymentValidator, VerificationResult};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

/// Ticket identifying one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// What happened to a completed submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// The result is now the session's current result.
    Published(VerificationResult),
    /// A newer submission already published; the result was discarded.
    Stale(VerificationResult),
}

impl Submission {
    /// The verification result, published or not.
    #[must_use]
    pub fn result(&self) -> &VerificationResult {
        match self {
            Self::Published(result) | Self::Stale(result) => result,
        }
    }

    /// True if the result became the current one.
    #[must_use]
    pub const fn is_published(&self) -> bool {
        matches!(self, Self::Published(_))
    }
}

/// Observable state of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing submitted yet.
    Idle,
    /// At least one submission is running.
    Validating {
        /// Last published result, if any.
        last: Option<VerificationResult>,
    },
    /// All submissions done.
    Done(VerificationResult),
}

#[derive(Debug, Default)]
struct Inner {
    latest_published: u64,
    in_flight: usize,
    current: Option<VerificationResult>,
}

/// Runs verifications for one input surface (a form, a CLI prompt, ...).
#[derive(Clone)]
pub struct ValidationSession {
    validator: Arc<PaymentValidator>,
    next_ticket: Arc<AtomicU64>,
    inner: Arc<Mutex<Inner>>,
}

impl ValidationSession {
    /// Create a session around a validator.
    #[must_use]
    pub fn new(validator: PaymentValidator) -> Self {
        Self {
            validator: Arc::new(validator),
            next_ticket: Arc::new(AtomicU64::new(0)),
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    /// Start a submission and return its ticket.
    pub fn begin(&self) -> Ticket {
        let ticket = Ticket(self.next_ticket.fetch_add(1, Ordering::SeqCst) + 1);
        self.inner.lock().in_flight += 1;
        ticket
    }

    /// Finish a submission, publishing its result unless a newer one has.
    pub fn complete(&self, ticket: Ticket, result: VerificationResult) -> Submission {
        let mut inner = self.inner.lock();
        inner.in_flight = inner.in_flight.saturating_sub(1);

        if ticket.0 > inner.latest_published {
            inner.latest_published = ticket.0;
            inner.current = Some(result.clone());
            Submission::Published(result)
        } else {
            debug!(
                "Discarding stale result for ticket {} (latest {})",
                ticket.0, inner.latest_published
            );
            Submission::Stale(result)
        }
    }

    /// Validate a payment proof off the async executor and publish the result.
    pub async fn submit(&self, invoice: String, preimage: String) -> Submission {
        let ticket = self.begin();
        let validator = Arc::clone(&self.validator);

        let result = match tokio::task::spawn_blocking(move || {
            validator.validate_payment(&invoice, &preimage)
        })
        .await
        {
            Ok(result) => result,
            Err(e) => VerificationResult::decode_failure(format!("validation task failed: {e}")),
        };

        self.complete(ticket, result)
    }

    /// The most recently published result.
    #[must_use]
    pub fn current(&self) -> Option<VerificationResult> {
        self.inner.lock().current.clone()
    }

    /// Current session state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        let inner = self.inner.lock();
        match (inner.in_flight, &inner.current) {
            (0, None) => SessionState::Idle,
            (0, Some(result)) => SessionState::Done(result.clone()),
            (_, last) => SessionState::Validating { last: last.clone() },
        }
    }
}
