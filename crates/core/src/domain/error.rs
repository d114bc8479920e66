// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid dispatch state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Invalid phone number '{0}': expected E.164 (+ followed by 8-15 digits)")]
    InvalidPhoneNumber(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, DomainError>;
