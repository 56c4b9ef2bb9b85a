//! Shared result types
//!
//! `CheckResult` is the sole output of one availability check. Invariant:
//! `available` is true exactly when `slots` is non-empty, so a consumer can
//! trust either field alone.

use serde::{Deserialize, Serialize};

/// One bookable time discovered on the results grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentSlot {
    /// Human-readable date label, e.g. "10 March 2026".
    pub date: String,
    /// Start time in HH:MM form.
    pub time: String,
}

impl AppointmentSlot {
    pub fn new(date: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
        }
    }
}

/// Outcome of one availability check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Whether at least one slot was confirmed bookable.
    pub available: bool,
    /// Discovered slots, in the order they appeared on the grid.
    pub slots: Vec<AppointmentSlot>,
}

impl CheckResult {
    /// No confirmed availability. Also the fail-closed outcome for any
    /// aborted or ambiguous check.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            slots: Vec::new(),
        }
    }

    /// Availability confirmed with the discovered slots. An empty list
    /// collapses to [`CheckResult::unavailable`] so the invariant holds.
    pub fn found(slots: Vec<AppointmentSlot>) -> Self {
        if slots.is_empty() {
            Self::unavailable()
        } else {
            Self {
                available: true,
                slots,
            }
        }
    }
}
