//! Error types for sw-email

use thiserror::Error;

/// sw-email error type
#[derive(Error, Debug)]
pub enum EmailError {
    #[error("SMTP configuration error: {0}")]
    Config(String),

    #[error("Invalid email address: {0}")]
    Address(String),

    #[error("SMTP transport error: {0}")]
    Transport(String),

    #[error("SMTP send error: {0}")]
    Send(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, EmailError>;
