//! Error types for sw-checker

use thiserror::Error;

/// sw-checker error type
///
/// Only session startup can escape [`crate::run_check`]; every other
/// failure is absorbed into the fail-closed unavailable result.
#[derive(Error, Debug)]
pub enum CheckError {
    #[error("Browser session startup failed: {0}")]
    Startup(#[from] sw_browser::BrowserError),
}
