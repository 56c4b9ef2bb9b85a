//! sw-email: email notification for slotwatch
//!
//! Delivers the result of an availability check by SMTP. Delivery only
//! happens when slots were found; transport failures are logged and
//! swallowed so they never read as a failed check.

pub mod error;
pub mod send;

pub use error::{EmailError, Result};
pub use send::{EmailConfig, Notifier, render_slots};
