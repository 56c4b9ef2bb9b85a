//! sw-core: slotwatch core library
//!
//! Shared result types, workspace configuration, and the core error type
//! used across the slotwatch crates.

pub mod config;
pub mod error;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use types::{AppointmentSlot, CheckResult};
