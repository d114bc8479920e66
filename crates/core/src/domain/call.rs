// Call Domain Model

use crate::domain::phone::PhoneNumber;
use serde::{Deserialize, Serialize};

/// Agent identifier as issued by the backend
pub type AgentId = String;

/// Selection value meaning "let the server pick its default agent"
pub const DEFAULT_AGENT_SENTINEL: &str = "default";

/// Map a user agent selection to the id sent on the wire
///
/// `None`, blank and the `"default"` sentinel all mean the server default.
pub fn agent_from_selection(selection: Option<&str>) -> Option<AgentId> {
    match selection.map(str::trim) {
        None | Some("") | Some(DEFAULT_AGENT_SENTINEL) => None,
        Some(id) => Some(id.to_string()),
    }
}

/// One unit of work for the dispatcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallTask {
    pub to: PhoneNumber,
    pub agent_id: Option<AgentId>,
}

impl CallTask {
    pub fn new(to: PhoneNumber, agent_id: Option<AgentId>) -> Self {
        Self { to, agent_id }
    }

    pub fn to_request(&self) -> OutboundCallRequest {
        OutboundCallRequest {
            to: self.to.to_string(),
            agent_id: self.agent_id.clone(),
        }
    }
}

/// Body of `POST /outbound-call`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundCallRequest {
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<AgentId>,
}

/// Successful response of `POST /outbound-call`
///
/// The id is an opaque call-tracking identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundCallResponse {
    #[serde(default)]
    pub id: Option<String>,
}

/// Outcome of one dispatched call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallResult {
    pub to: PhoneNumber,
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CallResult {
    pub fn success(to: PhoneNumber, id: Option<String>) -> Self {
        Self {
            to,
            ok: true,
            id,
            error: None,
        }
    }

    pub fn failure(to: PhoneNumber, error: impl Into<String>) -> Self {
        Self {
            to,
            ok: false,
            id: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_agent_selection_sentinel() {
        assert_eq!(agent_from_selection(None), None);
        assert_eq!(agent_from_selection(Some("default")), None);
        assert_eq!(agent_from_selection(Some("  ")), None);
        assert_eq!(
            agent_from_selection(Some("agent-42")),
            Some("agent-42".to_string())
        );
    }

    #[test]
    fn test_request_omits_default_agent() {
        let to = PhoneNumber::parse("+918267818161").unwrap();
        let body = serde_json::to_value(CallTask::new(to.clone(), None).to_request()).unwrap();
        assert_eq!(body, json!({ "to": "+918267818161" }));

        let body =
            serde_json::to_value(CallTask::new(to, Some("a1".into())).to_request()).unwrap();
        assert_eq!(body, json!({ "to": "+918267818161", "agentId": "a1" }));
    }

    #[test]
    fn test_result_constructors() {
        let to = PhoneNumber::parse("+918267818161").unwrap();
        let ok = CallResult::success(to.clone(), Some("call-1".into()));
        assert!(ok.ok);
        assert_eq!(ok.error, None);

        let failed = CallResult::failure(to, "busy");
        assert!(!failed.ok);
        assert_eq!(failed.id, None);
        assert_eq!(failed.error.as_deref(), Some("busy"));
    }
}
