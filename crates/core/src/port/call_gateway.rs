// Call Gateway Port
// Abstraction over the backend's call-initiation endpoint (POST /outbound-call)

use crate::domain::{OutboundCallRequest, OutboundCallResponse};
use async_trait::async_trait;
use thiserror::Error;

/// Message used when a rejected call carries no message of its own
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed";

/// Why a single outbound call could not be placed
///
/// Display is the bare message so it can be shown to users (and exported)
/// verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    /// Backend answered with a non-2xx status
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// Request never produced a response (connect error, timeout, abort)
    #[error("{0}")]
    Transport(String),
}

impl CallError {
    /// Build a rejection, substituting the generic message when none was given
    pub fn rejected(status: u16, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
        CallError::Rejected { status, message }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            CallError::Rejected { status, .. } => Some(*status),
            CallError::Transport(_) => None,
        }
    }
}

/// Call Gateway trait
///
/// Implementations:
/// - HttpApiClient (infra-http): real REST backend
/// - MockCallGateway: scripted outcomes for tests
#[async_trait]
pub trait CallGateway: Send + Sync {
    /// Place one outbound call
    ///
    /// # Errors
    /// - CallError::Rejected on a non-2xx response
    /// - CallError::Transport when no response was received
    async fn place_call(
        &self,
        request: &OutboundCallRequest,
    ) -> Result<OutboundCallResponse, CallError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Scripted outcome for one number
    #[derive(Debug, Clone)]
    pub enum MockOutcome {
        /// 2xx with the given id
        Success(Option<String>),
        /// Non-2xx with optional body message
        Reject { status: u16, message: Option<String> },
        /// Transport-level failure
        Transport(String),
        /// Never answers (only cancellation ends the call)
        Hang,
    }

    /// Decrements the in-flight counter even when the call future is dropped
    struct InFlightGuard<'a>(&'a AtomicUsize);

    impl Drop for InFlightGuard<'_> {
        fn drop(&mut self) {
            self.0.fetch_sub(1, Ordering::SeqCst);
        }
    }

    /// Mock Call Gateway for testing
    ///
    /// Numbers without a scripted outcome succeed with id `call-{to}`.
    pub struct MockCallGateway {
        outcomes: HashMap<String, MockOutcome>,
        latency: Duration,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        call_count: AtomicUsize,
        calls: Mutex<Vec<OutboundCallRequest>>,
    }

    impl MockCallGateway {
        pub fn new() -> Self {
            Self {
                outcomes: HashMap::new(),
                latency: Duration::ZERO,
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
                call_count: AtomicUsize::new(0),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn with_latency(mut self, latency: Duration) -> Self {
            self.latency = latency;
            self
        }

        pub fn with_outcome(mut self, to: impl Into<String>, outcome: MockOutcome) -> Self {
            self.outcomes.insert(to.into(), outcome);
            self
        }

        pub fn reject(self, to: impl Into<String>, message: impl Into<String>) -> Self {
            self.with_outcome(
                to,
                MockOutcome::Reject {
                    status: 400,
                    message: Some(message.into()),
                },
            )
        }

        /// Number of calls started (including ones later cancelled)
        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }

        /// Highest number of simultaneously open calls observed
        pub fn max_in_flight(&self) -> usize {
            self.max_in_flight.load(Ordering::SeqCst)
        }

        pub fn in_flight(&self) -> usize {
            self.in_flight.load(Ordering::SeqCst)
        }

        pub fn calls(&self) -> Vec<OutboundCallRequest> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Default for MockCallGateway {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl CallGateway for MockCallGateway {
        async fn place_call(
            &self,
            request: &OutboundCallRequest,
        ) -> Result<OutboundCallResponse, CallError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            self.calls.lock().unwrap().push(request.clone());

            let now_open = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now_open, Ordering::SeqCst);
            let _guard = InFlightGuard(&self.in_flight);

            let outcome = self
                .outcomes
                .get(&request.to)
                .cloned()
                .unwrap_or_else(|| MockOutcome::Success(Some(format!("call-{}", request.to))));

            if !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }

            match outcome {
                MockOutcome::Success(id) => Ok(OutboundCallResponse { id }),
                MockOutcome::Reject { status, message } => {
                    Err(CallError::rejected(status, message))
                }
                MockOutcome::Transport(msg) => Err(CallError::Transport(msg)),
                MockOutcome::Hang => std::future::pending().await,
            }
        }
    }
}
