//! Error types for sw-browser

use thiserror::Error;

/// sw-browser error type
#[derive(Error, Debug)]
pub enum BrowserError {
    #[error("Browser startup failed: {0}")]
    Startup(String),

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Browser driver fault: {0}")]
    Driver(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, BrowserError>;
