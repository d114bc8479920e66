// Vani Core - Domain Logic & Ports for the outbound dialer
// NO infrastructure dependencies

pub mod application;
pub mod domain;
pub mod error;
pub mod port;

pub use error::{AppError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
