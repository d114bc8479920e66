// Application Layer - Use Cases and Business Logic

pub mod bulk;
pub mod call_service;

// Re-exports
pub use bulk::{
    cancel_channel, BulkDialer, BulkRequest, CancelHandle, CancelToken, ProgressSnapshot,
    RunReport,
};
pub use call_service::CallService;
