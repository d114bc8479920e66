// Vani REST adapter
// Implements core ports over the console backend's HTTP JSON API

pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::HttpApiClient;
pub use config::HttpClientConfig;
pub use error::{ApiError, Result};
pub use types::CallListQuery;
