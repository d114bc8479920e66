// Single outbound call use case

use crate::domain::{agent_from_selection, CallTask, OutboundCallResponse, PhoneNumber};
use crate::error::{AppError, Result};
use crate::port::CallGateway;
use std::sync::Arc;
use tracing::info;

/// Places one-off test calls through the same gateway as bulk runs
pub struct CallService {
    gateway: Arc<dyn CallGateway>,
}

impl CallService {
    pub fn new(gateway: Arc<dyn CallGateway>) -> Self {
        Self { gateway }
    }

    /// Validate `raw_number` (whitespace is stripped first) and place the call
    ///
    /// # Errors
    /// - AppError::Validation if the number is not E.164
    /// - AppError::Call if the backend rejects the call or is unreachable
    pub async fn place(
        &self,
        raw_number: &str,
        agent_selection: Option<&str>,
    ) -> Result<OutboundCallResponse> {
        let to = PhoneNumber::parse(raw_number).map_err(|e| AppError::Validation(e.to_string()))?;
        let task = CallTask::new(to, agent_from_selection(agent_selection));

        info!(to = %task.to, agent_id = ?task.agent_id, "Placing outbound call");
        let response = self.gateway.place_call(&task.to_request()).await?;
        info!(to = %task.to, call_id = ?response.id, "Outbound call queued");

        Ok(response)
    }
}
