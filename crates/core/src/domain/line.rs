// Phone lines (imported numbers / SIP endpoints) and their agent assignment

use crate::domain::display::MISSING_VALUE;
use crate::domain::record::AgentSummary;
use serde::{Deserialize, Serialize};

/// Selection value that detaches a line from its agent
pub const UNASSIGNED_SENTINEL: &str = "unassigned";

/// A number (or SIP address) the console can place calls from
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneLine {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    /// Vendor assistant id of the agent answering this line
    #[serde(default)]
    pub assistant_id: Option<String>,
    #[serde(default)]
    pub sip_uri: Option<String>,
    #[serde(default)]
    pub credential_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl PhoneLine {
    pub fn is_assigned(&self) -> bool {
        self.assistant_id.as_deref().is_some_and(|id| !id.is_empty())
    }

    /// Number for PSTN lines, SIP URI otherwise
    pub fn address(&self) -> &str {
        self.number
            .as_deref()
            .or(self.sip_uri.as_deref())
            .filter(|a| !a.is_empty())
            .unwrap_or(MISSING_VALUE)
    }

    /// Name of the assigned agent, matched on the vendor assistant id
    pub fn agent_name<'a>(&self, agents: &'a [AgentSummary]) -> &'a str {
        let Some(assistant_id) = self.assistant_id.as_deref().filter(|id| !id.is_empty()) else {
            return "Not assigned";
        };
        agents
            .iter()
            .find(|a| a.vapi_assistant_id.as_deref() == Some(assistant_id))
            .map(|a| a.name.as_str())
            .unwrap_or("Unknown Agent")
    }
}

/// Envelope of `GET /vapi/phone-numbers`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneLineListResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub phone_numbers: Vec<PhoneLine>,
    #[serde(default)]
    pub count: usize,
}

/// Body of `PATCH /vapi/phone-numbers/{id}/assign`; `null` detaches
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignAgentRequest {
    pub assistant_id: Option<String>,
}

impl AssignAgentRequest {
    /// `None`, blank and `"unassigned"` all detach the line
    pub fn from_selection(selection: Option<&str>) -> Self {
        let assistant_id = match selection.map(str::trim) {
            None | Some("") | Some(UNASSIGNED_SENTINEL) => None,
            Some(id) => Some(id.to_string()),
        };
        Self { assistant_id }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SipGateway {
    pub ip: String,
    #[serde(default)]
    pub inbound_enabled: bool,
}

/// SIP trunk credential that trunk lines authenticate with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SipTrunkCredential {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub gateways: Vec<SipGateway>,
}

/// Envelope of `GET /vapi/credentials`
#[derive(Debug, Clone, Deserialize)]
pub struct CredentialsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub credentials: Vec<SipTrunkCredential>,
}
