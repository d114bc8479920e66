// Bulk Dialer - fans a validated number list out over a bounded worker pool

mod cancel;
pub mod constants;
pub mod export;
pub mod progress;
mod worker;

pub use cancel::{cancel_channel, CancelHandle, CancelToken};
pub use export::failures_csv;
pub use progress::{progress_percent, ProgressSnapshot, ProgressTracker};

use constants::*;
use worker::{CallWorker, ClaimQueue, RunShared};

use crate::domain::{
    agent_from_selection, AgentId, CallResult, CallTask, DispatchState, PhoneNumber, RunOutcome,
};
use crate::error::{AppError, Result};
use crate::port::{CallGateway, IdProvider, TimeProvider};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinSet;
use tracing::{error, info, warn, Instrument};

/// Message returned when a run is started without any valid number
pub const NO_VALID_NUMBERS_MESSAGE: &str =
    "No valid numbers to call. Please add at least one valid E.164 number.";

/// Parameters of one bulk run
#[derive(Debug, Clone)]
pub struct BulkRequest {
    pub numbers: Vec<PhoneNumber>,
    pub concurrency: usize,
    pub agent_id: Option<AgentId>,
}

impl BulkRequest {
    pub fn new(numbers: Vec<PhoneNumber>) -> Self {
        Self {
            numbers,
            concurrency: DEFAULT_CONCURRENCY,
            agent_id: None,
        }
    }

    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Use the given agent selection (`"default"` means server default)
    pub fn with_agent(mut self, selection: Option<&str>) -> Self {
        self.agent_id = agent_from_selection(selection);
        self
    }
}

/// Clamp a requested worker count into the supported range
pub fn clamp_concurrency(requested: usize) -> usize {
    let clamped = requested.clamp(MIN_CONCURRENCY, MAX_CONCURRENCY);
    if clamped != requested {
        warn!(
            requested,
            clamped,
            min = MIN_CONCURRENCY,
            max = MAX_CONCURRENCY,
            "Concurrency out of range, clamping"
        );
    }
    clamped
}

/// Final state of a finished (or cancelled) run
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: String,
    pub outcome: RunOutcome,
    pub results: Vec<CallResult>,
    pub progress: ProgressSnapshot,
    pub started_at: i64,
    pub finished_at: i64,
}

impl RunReport {
    pub fn duration_ms(&self) -> i64 {
        self.finished_at - self.started_at
    }

    /// CSV of failed calls, `None` if every call went through
    pub fn failures_csv(&self) -> Option<String> {
        failures_csv(&self.results)
    }
}

/// Bulk outbound dialer
///
/// One run at a time: `Idle -> Running -> {Completed, Cancelled} -> Idle`.
/// Each run starts from an empty result list.
pub struct BulkDialer {
    gateway: Arc<dyn CallGateway>,
    id_provider: Arc<dyn IdProvider>,
    time_provider: Arc<dyn TimeProvider>,
    state: watch::Sender<DispatchState>,
    progress: Arc<watch::Sender<ProgressSnapshot>>,
}

impl BulkDialer {
    pub fn new(
        gateway: Arc<dyn CallGateway>,
        id_provider: Arc<dyn IdProvider>,
        time_provider: Arc<dyn TimeProvider>,
    ) -> Self {
        let (state, _) = watch::channel(DispatchState::Idle);
        let (progress, _) = watch::channel(ProgressSnapshot::default());
        Self {
            gateway,
            id_provider,
            time_provider,
            state,
            progress: Arc::new(progress),
        }
    }

    pub fn state(&self) -> DispatchState {
        *self.state.borrow()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<DispatchState> {
        self.state.subscribe()
    }

    /// Live progress of the current (or last) run
    pub fn subscribe_progress(&self) -> watch::Receiver<ProgressSnapshot> {
        self.progress.subscribe()
    }

    /// Dispatch one call per number and wait for every worker to exit
    ///
    /// # Errors
    /// - AppError::Validation if `request.numbers` is empty (nothing is sent)
    /// - AppError::InvalidState if another run is in progress
    ///
    /// Per-call failures never surface here; they are part of the report.
    pub async fn run(&self, request: BulkRequest, cancel: CancelToken) -> Result<RunReport> {
        if request.numbers.is_empty() {
            return Err(AppError::Validation(NO_VALID_NUMBERS_MESSAGE.to_string()));
        }
        let concurrency = clamp_concurrency(request.concurrency);

        let guard = self.begin()?;

        let run_id = self.id_provider.generate_id();
        let started_at = self.time_provider.now_millis();
        let total = request.numbers.len();
        let span = tracing::info_span!("bulk_run", run_id = %run_id);

        info!(
            parent: &span,
            total,
            concurrency,
            agent_id = ?request.agent_id,
            "Bulk run started"
        );

        self.progress.send_replace(ProgressSnapshot::start(total));

        let tasks = request
            .numbers
            .into_iter()
            .map(|to| CallTask::new(to, request.agent_id.clone()))
            .collect();

        let shared = RunShared {
            queue: Arc::new(ClaimQueue::new(tasks)),
            gateway: Arc::clone(&self.gateway),
            tracker: Arc::new(Mutex::new(ProgressTracker::new(total))),
            progress: Arc::clone(&self.progress),
            cancel,
            cancel_observed: Arc::new(AtomicBool::new(false)),
        };

        let mut workers = JoinSet::new();
        for id in 0..concurrency.min(shared.queue.len()) {
            let worker = CallWorker::new(id, shared.clone());
            workers.spawn(worker.run().instrument(span.clone()));
        }

        // Join every worker; a panicking worker loses its claimed call but
        // does not stop the others.
        while let Some(joined) = workers.join_next().await {
            if let Err(join_err) = joined {
                if join_err.is_panic() {
                    error!(parent: &span, error = ?join_err, "Call worker panicked");
                } else {
                    error!(parent: &span, error = ?join_err, "Call worker aborted");
                }
            }
        }

        let RunShared {
            tracker,
            cancel_observed,
            ..
        } = shared;
        let outcome = if cancel_observed.load(Ordering::SeqCst) {
            RunOutcome::Cancelled
        } else {
            RunOutcome::Completed
        };

        // Every worker has exited, so this is normally the last reference
        let tracker = match Arc::try_unwrap(tracker) {
            Ok(tracker) => tracker.into_inner(),
            Err(tracker) => tracker.lock().await.clone(),
        };
        let progress = tracker.snapshot();
        let results = tracker.into_results();
        let finished_at = self.time_provider.now_millis();

        info!(
            parent: &span,
            outcome = %outcome,
            completed = progress.completed,
            succeeded = progress.succeeded,
            failed = progress.failed,
            duration_ms = finished_at - started_at,
            "Bulk run finished"
        );

        guard.disarm();
        self.finish(outcome)?;

        Ok(RunReport {
            run_id,
            outcome,
            results,
            progress,
            started_at,
            finished_at,
        })
    }

    /// Idle -> Running, refusing to start while a run is active
    fn begin(&self) -> Result<RunningGuard<'_>> {
        let mut rejected = None;
        self.state.send_if_modified(|state| match state.transition(DispatchState::Running) {
            Ok(next) => {
                *state = next;
                true
            }
            Err(e) => {
                rejected = Some(e);
                false
            }
        });

        match rejected {
            Some(e) => Err(AppError::InvalidState(format!(
                "bulk run already in progress ({})",
                e
            ))),
            None => Ok(RunningGuard {
                state: &self.state,
                armed: true,
            }),
        }
    }

    /// Running -> outcome -> Idle
    fn finish(&self, outcome: RunOutcome) -> Result<()> {
        let terminal = self.state().transition(outcome.into())?;
        self.state.send_replace(terminal);
        let idle = terminal.transition(DispatchState::Idle)?;
        self.state.send_replace(idle);
        Ok(())
    }
}

/// Puts the dialer back to Idle if a run future is dropped mid-flight
struct RunningGuard<'a> {
    state: &'a watch::Sender<DispatchState>,
    armed: bool,
}

impl RunningGuard<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            warn!("Bulk run dropped before completion, resetting to idle");
            self.state.send_replace(DispatchState::Idle);
        }
    }
}
