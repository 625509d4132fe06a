//! Per-form prediction session: sequences submissions and owns the outcome.
//!
//! Every submission takes a [`Ticket`] carrying the next [`RequestId`]. A result
//! is applied only while its ticket is the latest one issued, so a slow
//! response can never overwrite the state of a newer submission.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use vetta_core::{PredictionRequest, PredictionResult, RequestId, SessionId};

use crate::config::ClientConfig;
use crate::error::PredictionError;
use crate::outcome::PredictionOutcome;
use crate::timer;
use crate::transport::{HttpTransport, PredictionTransport};

/// Handle for one in-flight submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    id: RequestId,
    started_at: DateTime<Utc>,
}

impl Ticket {
    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

#[derive(Debug, Default)]
struct SessionState {
    outcome: PredictionOutcome,
    latest: Option<RequestId>,
}

/// State container for one form session.
///
/// The lock is never held across an `.await`.
#[derive(Debug)]
pub struct PredictionSession<T> {
    id: SessionId,
    transport: T,
    timeout: Duration,
    state: Mutex<SessionState>,
}

impl PredictionSession<HttpTransport> {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(HttpTransport::new(config.endpoint.clone()), config.timeout)
    }
}

impl<T: PredictionTransport> PredictionSession<T> {
    pub fn new(transport: T, timeout: Duration) -> Self {
        Self {
            id: SessionId::new(),
            transport,
            timeout,
            state: Mutex::new(SessionState::default()),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Current authoritative outcome.
    pub fn outcome(&self) -> PredictionOutcome {
        self.lock().outcome.clone()
    }

    /// Id of the most recent submission, if any.
    pub fn latest(&self) -> Option<RequestId> {
        self.lock().latest
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a submission: clears any previous result and enters `Loading`.
    ///
    /// Supersedes whatever submission was in flight.
    pub fn begin(&self) -> Ticket {
        let mut state = self.lock();
        let id = state.latest.map_or_else(RequestId::first, RequestId::next);
        state.latest = Some(id);
        state.outcome = PredictionOutcome::Loading;

        tracing::info!(session_id = %self.id, request_id = %id, "prediction submitted");

        Ticket {
            id,
            started_at: Utc::now(),
        }
    }

    /// Apply a result for `ticket`. Returns `false` (and changes nothing) when a
    /// newer submission has started since.
    pub fn settle(
        &self,
        ticket: &Ticket,
        result: Result<PredictionResult, PredictionError>,
    ) -> bool {
        self.apply(ticket, PredictionOutcome::settled(result))
    }

    fn apply(&self, ticket: &Ticket, outcome: PredictionOutcome) -> bool {
        let elapsed_ms = (Utc::now() - ticket.started_at).num_milliseconds();
        let mut state = self.lock();

        if state.latest != Some(ticket.id) {
            tracing::debug!(
                session_id = %self.id,
                request_id = %ticket.id,
                elapsed_ms,
                "discarding result of superseded submission"
            );
            return false;
        }

        match &outcome {
            PredictionOutcome::Succeeded(r) => tracing::info!(
                session_id = %self.id,
                request_id = %ticket.id,
                elapsed_ms,
                failure = r.failure,
                failure_probability = r.failure_probability,
                "prediction succeeded"
            ),
            PredictionOutcome::Failed(e) => tracing::warn!(
                session_id = %self.id,
                request_id = %ticket.id,
                elapsed_ms,
                kind = e.kind(),
                error = %e,
                "prediction failed"
            ),
            PredictionOutcome::Idle | PredictionOutcome::Loading => {}
        }

        state.outcome = outcome;
        true
    }

    /// Run the transport for an already started submission and settle it.
    ///
    /// Returns what this submission resolved to, whether or not it was still
    /// the latest; [`outcome`](Self::outcome) is the authoritative value.
    pub async fn complete(&self, ticket: &Ticket, request: &PredictionRequest) -> PredictionOutcome {
        let result = timer::with_timeout(self.timeout, self.transport.send(request))
            .await
            .unwrap_or(Err(PredictionError::Timeout(self.timeout)));

        let outcome = PredictionOutcome::settled(result);
        self.apply(ticket, outcome.clone());
        outcome
    }

    pub async fn submit(&self, request: &PredictionRequest) -> PredictionOutcome {
        let ticket = self.begin();
        self.complete(&ticket, request).await
    }
}
