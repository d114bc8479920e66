// Call log and agent records returned by the backend
//
// Most fields are optional: calls still in progress come back without
// `endedAt`, `transcript`, `cost` and friends.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default)]
    pub number: Option<String>,
}

/// A call as listed by `/calls/list` or `/outbound-call-info/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallRecord {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub assistant_id: Option<String>,
    #[serde(default)]
    pub phone_number_id: Option<String>,
    #[serde(default, rename = "type")]
    pub call_type: Option<String>,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub ended_at: Option<String>,
    #[serde(default)]
    pub transcript: Option<String>,
    #[serde(default)]
    pub recording_url: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub cost: Option<f64>,
    #[serde(default)]
    pub customer: Option<Customer>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub ended_reason: Option<String>,
    #[serde(default)]
    pub agent_id: Option<String>,
    #[serde(default)]
    pub agent_name: Option<String>,
}

impl CallRecord {
    pub fn customer_number(&self) -> Option<&str> {
        self.customer.as_ref().and_then(|c| c.number.as_deref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Active,
    Inactive,
    Draft,
}

impl std::fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentStatus::Active => write!(f, "active"),
            AgentStatus::Inactive => write!(f, "inactive"),
            AgentStatus::Draft => write!(f, "draft"),
        }
    }
}

/// The subset of an agent needed to pick one for calls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSummary {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    /// Vendor-side id; phone lines reference agents by this
    #[serde(default, rename = "vapiAssistantId")]
    pub vapi_assistant_id: Option<String>,
    pub status: AgentStatus,
}

impl AgentSummary {
    pub fn is_active(&self) -> bool {
        self.status == AgentStatus::Active
    }
}

/// Envelope of `GET /vapi/agents`
#[derive(Debug, Clone, Deserialize)]
pub struct AgentListResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Vec<AgentSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentStatistics {
    pub total_calls: u64,
    pub successful_calls: u64,
    pub failed_calls: u64,
    pub last_used: Option<String>,
}

impl AgentStatistics {
    /// Share of successful calls, `None` before the first call
    pub fn success_rate(&self) -> Option<f64> {
        (self.total_calls > 0)
            .then(|| 100.0 * self.successful_calls as f64 / self.total_calls as f64)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentMetadata {
    pub description: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub version: Option<u32>,
    pub created_by: Option<String>,
}

/// Full agent as returned by `GET /vapi/agents/{id}`
///
/// The vendor configuration blob is not modelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub vapi_assistant_id: Option<String>,
    pub status: AgentStatus,
    #[serde(default)]
    pub statistics: AgentStatistics,
    #[serde(default)]
    pub metadata: AgentMetadata,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AgentResponse {
    #[serde(default)]
    pub success: bool,
    pub agent: Agent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentUsage {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub calls: u64,
}

/// Fleet-wide numbers from `GET /vapi/agents/stats/overview`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentStats {
    pub total_agents: u64,
    pub active_agents: u64,
    pub total_calls: u64,
    pub successful_calls: u64,
    pub failed_calls: u64,
    pub most_used: Vec<AgentUsage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AgentStatsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub stats: AgentStats,
}
