// Bulk call worker - claims tasks from the shared queue until it runs dry

use super::cancel::CancelToken;
use super::progress::{ProgressSnapshot, ProgressTracker};
use crate::domain::{CallResult, CallTask};
use crate::port::CallGateway;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};

/// Fixed task list with an atomic claim cursor
///
/// Every index is handed out at most once, whichever worker asks first.
pub(crate) struct ClaimQueue {
    tasks: Vec<CallTask>,
    next: AtomicUsize,
}

impl ClaimQueue {
    pub(crate) fn new(tasks: Vec<CallTask>) -> Self {
        Self {
            tasks,
            next: AtomicUsize::new(0),
        }
    }

    /// Claim the next unclaimed task, or `None` once the queue is exhausted
    pub(crate) fn claim(&self) -> Option<&CallTask> {
        let index = self.next.fetch_add(1, Ordering::SeqCst);
        self.tasks.get(index)
    }

    pub(crate) fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether an unclaimed task is left
    pub(crate) fn has_remaining(&self) -> bool {
        self.next.load(Ordering::SeqCst) < self.tasks.len()
    }
}

/// State shared by all workers of one run
#[derive(Clone)]
pub(crate) struct RunShared {
    pub queue: Arc<ClaimQueue>,
    pub gateway: Arc<dyn CallGateway>,
    pub tracker: Arc<Mutex<ProgressTracker>>,
    pub progress: Arc<watch::Sender<ProgressSnapshot>>,
    pub cancel: CancelToken,
    pub cancel_observed: Arc<AtomicBool>,
}

pub(crate) struct CallWorker {
    id: usize,
    shared: RunShared,
}

impl CallWorker {
    pub(crate) fn new(id: usize, shared: RunShared) -> Self {
        Self { id, shared }
    }

    /// Run until the queue is empty or cancellation is observed
    ///
    /// Returns the number of results this worker recorded.
    pub(crate) async fn run(self) -> usize {
        let shared = &self.shared;
        let mut recorded = 0;
        debug!(worker = self.id, "Call worker started");

        loop {
            if shared.cancel.is_cancelled() {
                // A cancel after the last claim leaves nothing undone
                if shared.queue.has_remaining() {
                    shared.cancel_observed.store(true, Ordering::SeqCst);
                    info!(worker = self.id, "Cancellation observed, worker stopping");
                }
                break;
            }

            let Some(task) = shared.queue.claim() else {
                break;
            };
            let request = task.to_request();

            // An in-flight call that loses the race against cancellation is
            // dropped and never recorded.
            let outcome = tokio::select! {
                biased;
                _ = shared.cancel.cancelled() => {
                    shared.cancel_observed.store(true, Ordering::SeqCst);
                    info!(worker = self.id, to = %task.to, "Call abandoned after cancellation");
                    break;
                }
                outcome = shared.gateway.place_call(&request) => outcome,
            };

            let result = match outcome {
                Ok(response) => {
                    info!(worker = self.id, to = %task.to, call_id = ?response.id, "Call queued");
                    CallResult::success(task.to.clone(), response.id)
                }
                Err(e) => {
                    warn!(worker = self.id, to = %task.to, status = ?e.status(), error = %e, "Call failed");
                    CallResult::failure(task.to.clone(), e.to_string())
                }
            };

            // Publish under the lock so observers never see progress go backwards
            let mut tracker = shared.tracker.lock().await;
            let snapshot = tracker.record(result);
            shared.progress.send_replace(snapshot);
            drop(tracker);

            recorded += 1;
        }

        debug!(worker = self.id, recorded, "Call worker stopped");
        recorded
    }
}
