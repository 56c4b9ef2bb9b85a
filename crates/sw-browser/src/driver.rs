//! The seam between the booking flow and a live browser
//!
//! The navigator and extractor are written against [`PageDriver`] rather
//! than a concrete browser, so the flow can be exercised with scripted
//! drivers in tests. Queries return owned [`ElementSnapshot`]s (text plus
//! attribute pairs), which keeps interpretation as plain data processing
//! with no live handles.

use std::time::Duration;

use crate::error::Result;
use crate::locator::Locator;

/// An owned snapshot of one page element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSnapshot {
    /// Inner text of the element.
    pub text: String,
    /// Attribute name/value pairs, in document order.
    pub attributes: Vec<(String, String)>,
}

impl ElementSnapshot {
    pub fn new(text: impl Into<String>, attributes: Vec<(String, String)>) -> Self {
        Self {
            text: text.into(),
            attributes,
        }
    }

    /// Value of the named attribute, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(attr_name, _)| attr_name == name)
            .map(|(_, value)| value.as_str())
    }
}

/// A page the booking flow can drive.
pub trait PageDriver {
    /// Navigate to the given URL and wait for the page to load.
    fn open(&self, url: &str) -> Result<()>;

    /// Poll up to `timeout` for the element to exist and accept a click.
    ///
    /// Returns `Ok(true)` once clicked, `Ok(false)` when the bound elapses
    /// with the element never interactable, and `Err` only for unexpected
    /// driver faults.
    fn wait_clickable(&self, locator: &Locator, timeout: Duration) -> Result<bool>;

    /// Poll up to `timeout` for the element to be present (not necessarily
    /// clickable).
    fn wait_present(&self, locator: &Locator, timeout: Duration) -> bool;

    /// Immediate, non-waiting query for every element matching the locator.
    fn find_all(&self, locator: &Locator) -> Vec<ElementSnapshot>;

    /// Best-effort diagnostic capture tagged with a short context string.
    /// Must never fail the caller.
    fn capture(&self, tag: &str);
}
