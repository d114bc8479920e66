// Port Layer - Interfaces for external dependencies

pub mod call_gateway;
pub mod id_provider; // For deterministic testing
pub mod time_provider;

// Re-exports
pub use call_gateway::{CallError, CallGateway, GENERIC_FAILURE_MESSAGE};
pub use id_provider::IdProvider;
pub use time_provider::TimeProvider;
