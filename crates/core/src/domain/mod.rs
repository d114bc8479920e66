// Domain Layer - Pure business logic and entities

pub mod call;
pub mod dispatch;
pub mod display;
pub mod error;
pub mod line;
pub mod phone;
pub mod record;
pub mod transcript;

// Re-exports
pub use call::{
    agent_from_selection, AgentId, CallResult, CallTask, OutboundCallRequest,
    OutboundCallResponse, DEFAULT_AGENT_SENTINEL,
};
pub use dispatch::{DispatchState, RunOutcome};
pub use error::DomainError;
pub use phone::{analyze_numbers, is_valid_e164, normalize, split_numbers, NumberAnalysis, PhoneNumber};
pub use line::{
    AssignAgentRequest, CredentialsResponse, PhoneLine, PhoneLineListResponse, SipGateway,
    SipTrunkCredential, UNASSIGNED_SENTINEL,
};
pub use record::{
    Agent, AgentListResponse, AgentMetadata, AgentResponse, AgentStatistics, AgentStats,
    AgentStatsResponse, AgentStatus, AgentSummary, AgentUsage, CallRecord, Customer,
};
pub use transcript::{parse_transcript, Speaker, TranscriptLine};
