//! Request controller — drives one resume through the analysis lifecycle.
//!
//! Lifecycle is an explicit state machine:
//!
//! ```text
//!   Idle ──submit──▶ Validating ──accepted──▶ InFlight ──completed──▶ Succeeded
//!    ▲                   │                       │
//!    │               rejected                 errored ──▶ Failed
//!    │            (back to where it was)
//!    └──────────── clear (from any phase) ───────────────────────
//! ```
//!
//! Succeeded and Failed accept a new submission just like Idle.
//! A submission while InFlight is rejected, never queued.
//!
//! The collaborator call runs on a spawned task holding only a `Weak` handle to
//! the controller state, so a response that lands after the controller is
//! dropped is discarded. A per-controller request id discards responses for
//! requests that were cleared or superseded.
//!
//! Clearing or dropping the controller also cancels the pending call, so at
//! most one collaborator call is live per controller.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::analysis::analyzer::{analyze_within, AnalysisError, ResumeAnalyzer};
use crate::config::Config;
use crate::models::analysis::AnalysisResult;

// ────────────────────────────────────────────────────────────────────────────
// State machine
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Validating,
    InFlight,
    Succeeded,
    Failed,
}

impl Phase {
    /// Phases in which the controller is at rest and accepts a submission.
    pub fn is_settled(self) -> bool {
        matches!(self, Phase::Idle | Phase::Succeeded | Phase::Failed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Submit,
    Accepted,
    /// Input failed validation; return to the settled phase held before `Submit`.
    Rejected(Phase),
    Completed,
    Errored,
    Clear,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("illegal transition: {event:?} while {from:?}")]
pub struct TransitionError {
    pub from: Phase,
    pub event: Event,
}

/// Pure transition function of the lifecycle.
pub fn transition(from: Phase, event: Event) -> Result<Phase, TransitionError> {
    let to = match (from, event) {
        (_, Event::Clear) => Phase::Idle,
        (p, Event::Submit) if p.is_settled() => Phase::Validating,
        (Phase::Validating, Event::Accepted) => Phase::InFlight,
        (Phase::Validating, Event::Rejected(back)) if back.is_settled() => back,
        (Phase::InFlight, Event::Completed) => Phase::Succeeded,
        (Phase::InFlight, Event::Errored) => Phase::Failed,
        _ => return Err(TransitionError { from, event }),
    };
    Ok(to)
}

// ────────────────────────────────────────────────────────────────────────────
// Errors and outcomes
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("{0}")]
    Validation(String),

    #[error("request {request_id} is still in flight")]
    InFlight { request_id: u64 },

    #[error(transparent)]
    Transition(#[from] TransitionError),
}

/// How a dispatched request ended, as seen by its spawned task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// Result stored; controller is Succeeded.
    Succeeded,
    /// Failure stored; controller is Failed and the input is kept for retry.
    Failed,
    /// The controller was cleared or moved on to a newer request; the call
    /// was cancelled or its response ignored.
    Superseded,
    /// The controller was dropped before the response arrived.
    Discarded,
}

const EMPTY_INPUT_MESSAGE: &str = "Please paste your resume text to analyze it.";

/// Checks resume text before anything is dispatched.
pub fn validate_input(text: &str, max_chars: usize) -> Result<(), String> {
    if text.trim().is_empty() {
        return Err(EMPTY_INPUT_MESSAGE.to_string());
    }
    let chars = text.chars().count();
    if chars > max_chars {
        return Err(format!(
            "Resume text is {chars} characters; the limit is {max_chars}"
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy)]
pub struct RequestLimits {
    pub timeout: Duration,
    pub max_chars: usize,
}

impl From<&Config> for RequestLimits {
    fn from(config: &Config) -> Self {
        Self {
            timeout: config.analysis_timeout,
            max_chars: config.max_resume_chars,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Snapshot (read model)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureView {
    pub kind: &'static str,
    pub message: String,
}

impl From<&AnalysisError> for FailureView {
    fn from(err: &AnalysisError) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ControllerSnapshot {
    pub phase: Phase,
    pub request_id: u64,
    pub input_chars: usize,
    pub result: Option<Arc<AnalysisResult>>,
    pub failure: Option<FailureView>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

// ────────────────────────────────────────────────────────────────────────────
// Controller
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
struct Slot {
    phase: Phase,
    input: String,
    request_id: u64,
    result: Option<Arc<AnalysisResult>>,
    failure: Option<AnalysisError>,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
    /// Fires (or is dropped) to cancel the call in flight.
    cancel: Option<oneshot::Sender<()>>,
}

impl Slot {
    fn new() -> Self {
        Self {
            phase: Phase::Idle,
            input: String::new(),
            request_id: 0,
            result: None,
            failure: None,
            started_at: None,
            finished_at: None,
            cancel: None,
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            // The receiver is gone once the call has settled.
            let _ = cancel.send(());
        }
    }

    fn apply(&mut self, event: Event) -> Result<(), TransitionError> {
        let next = transition(self.phase, event)?;
        debug!(
            "request {}: {:?} --{:?}--> {:?}",
            self.request_id, self.phase, event, next
        );
        self.phase = next;
        Ok(())
    }
}

pub struct RequestController {
    analyzer: Arc<dyn ResumeAnalyzer>,
    limits: RequestLimits,
    slot: Arc<Mutex<Slot>>,
}

impl RequestController {
    pub fn new(analyzer: Arc<dyn ResumeAnalyzer>, limits: RequestLimits) -> Self {
        Self {
            analyzer,
            limits,
            slot: Arc::new(Mutex::new(Slot::new())),
        }
    }

    /// Validates `text` and, if acceptable, dispatches exactly one analysis.
    ///
    /// Returns the handle of the spawned request; callers may await it or drop it.
    /// Any prior result or failure is released as soon as the request starts.
    pub fn submit(&self, text: impl Into<String>) -> Result<JoinHandle<Settlement>, SubmitError> {
        let text = text.into();

        let (cancel_tx, cancel_rx) = oneshot::channel();
        let request_id = {
            let mut slot = lock(&self.slot);
            let restore = slot.phase;
            if slot.apply(Event::Submit).is_err() {
                return Err(SubmitError::InFlight {
                    request_id: slot.request_id,
                });
            }

            if let Err(message) = validate_input(&text, self.limits.max_chars) {
                slot.apply(Event::Rejected(restore))?;
                debug!("Rejected submission: {message}");
                return Err(SubmitError::Validation(message));
            }

            slot.apply(Event::Accepted)?;
            slot.cancel_pending();
            slot.cancel = Some(cancel_tx);
            slot.request_id += 1;
            slot.input.clone_from(&text);
            slot.result = None;
            slot.failure = None;
            slot.started_at = Some(Utc::now());
            slot.finished_at = None;
            slot.request_id
        };

        info!(
            "Dispatching analysis request {} ({} chars, backend {})",
            request_id,
            text.chars().count(),
            self.analyzer.backend()
        );

        let analyzer = Arc::clone(&self.analyzer);
        let slot = Arc::downgrade(&self.slot);
        let timeout = self.limits.timeout;

        Ok(tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = cancel_rx => abandon(&slot, request_id),
                outcome = analyze_within(analyzer.as_ref(), &text, timeout) => {
                    settle(&slot, request_id, outcome)
                }
            }
        }))
    }

    /// Resubmits the input kept from the last request.
    pub fn retry(&self) -> Result<JoinHandle<Settlement>, SubmitError> {
        self.submit(self.input())
    }

    /// Drops input, result and failure and returns to Idle.
    /// A request still in flight is cancelled.
    pub fn clear(&self) -> ControllerSnapshot {
        let mut slot = lock(&self.slot);
        if slot.phase == Phase::InFlight {
            info!("Clearing controller with request {} in flight", slot.request_id);
        }
        // Clear is legal from every phase.
        if let Err(e) = slot.apply(Event::Clear) {
            error!("{e}");
        }
        slot.cancel_pending();
        slot.request_id += 1;
        slot.input.clear();
        slot.result = None;
        slot.failure = None;
        slot.started_at = None;
        slot.finished_at = None;
        snapshot_of(&slot)
    }

    pub fn snapshot(&self) -> ControllerSnapshot {
        snapshot_of(&lock(&self.slot))
    }

    /// The text of the most recent accepted submission.
    pub fn input(&self) -> String {
        lock(&self.slot).input.clone()
    }
}

#[cfg(test)]
impl RequestController {
    pub fn phase(&self) -> Phase {
        lock(&self.slot).phase
    }

    pub fn result(&self) -> Option<Arc<AnalysisResult>> {
        lock(&self.slot).result.clone()
    }

    pub fn failure(&self) -> Option<AnalysisError> {
        lock(&self.slot).failure.clone()
    }
}

impl Drop for RequestController {
    fn drop(&mut self) {
        let mut slot = lock(&self.slot);
        if slot.phase == Phase::InFlight {
            info!(
                "Controller dropped with request {} in flight; cancelling it",
                slot.request_id
            );
        }
        slot.cancel_pending();
    }
}

fn lock(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

fn snapshot_of(slot: &Slot) -> ControllerSnapshot {
    ControllerSnapshot {
        phase: slot.phase,
        request_id: slot.request_id,
        input_chars: slot.input.chars().count(),
        result: slot.result.clone(),
        failure: slot.failure.as_ref().map(FailureView::from),
        started_at: slot.started_at,
        finished_at: slot.finished_at,
    }
}

/// Outcome of a call cancelled by `clear` or by dropping the controller.
fn abandon(slot: &Weak<Mutex<Slot>>, request_id: u64) -> Settlement {
    if slot.upgrade().is_none() {
        info!("Cancelled request {request_id}: controller was dropped");
        Settlement::Discarded
    } else {
        info!("Cancelled request {request_id}: controller was cleared");
        Settlement::Superseded
    }
}

/// Applies a finished request to the controller, if it still exists and still
/// cares about this request.
fn settle(
    slot: &Weak<Mutex<Slot>>,
    request_id: u64,
    outcome: Result<AnalysisResult, AnalysisError>,
) -> Settlement {
    let Some(slot) = slot.upgrade() else {
        warn!("Discarding response for request {request_id}: controller was dropped");
        return Settlement::Discarded;
    };
    let mut slot = lock(&slot);

    if slot.request_id != request_id || slot.phase != Phase::InFlight {
        info!(
            "Discarding response for request {} (controller now at request {}, {:?})",
            request_id, slot.request_id, slot.phase
        );
        return Settlement::Superseded;
    }

    slot.cancel = None;
    slot.finished_at = Some(Utc::now());
    match outcome {
        Ok(result) => {
            slot.result = Some(Arc::new(result));
            if let Err(e) = slot.apply(Event::Completed) {
                error!("{e}");
            }
            info!("Analysis request {request_id} succeeded");
            Settlement::Succeeded
        }
        Err(e) => {
            warn!("Analysis request {request_id} failed: {e}");
            slot.failure = Some(e);
            if let Err(e) = slot.apply(Event::Errored) {
                error!("{e}");
            }
            Settlement::Failed
        }
    }
}
