// Dispatch State Machine
//
// Idle -> Running -> {Completed, Cancelled} -> Idle

use crate::domain::error::{DomainError, Result};
use serde::{Deserialize, Serialize};

/// Lifecycle of a bulk dispatch run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DispatchState {
    Idle,
    Running,
    Completed,
    Cancelled,
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunOutcome {
    Completed,
    Cancelled,
}

impl std::fmt::Display for DispatchState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DispatchState::Idle => write!(f, "IDLE"),
            DispatchState::Running => write!(f, "RUNNING"),
            DispatchState::Completed => write!(f, "COMPLETED"),
            DispatchState::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

impl std::fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", DispatchState::from(*self))
    }
}

impl From<RunOutcome> for DispatchState {
    fn from(outcome: RunOutcome) -> Self {
        match outcome {
            RunOutcome::Completed => DispatchState::Completed,
            RunOutcome::Cancelled => DispatchState::Cancelled,
        }
    }
}

impl DispatchState {
    pub fn is_running(&self) -> bool {
        matches!(self, DispatchState::Running)
    }

    /// Validate and return the next state
    pub fn transition(self, next: DispatchState) -> Result<DispatchState> {
        use DispatchState::*;
        match (self, next) {
            (Idle, Running)
            | (Running, Completed)
            | (Running, Cancelled)
            | (Completed, Idle)
            | (Cancelled, Idle) => Ok(next),
            (from, to) => Err(DomainError::InvalidStateTransition {
                from: from.to_string(),
                to: to.to_string(),
            }),
        }
    }
}
