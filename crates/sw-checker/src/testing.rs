//! Scripted page driver for tests

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use sw_browser::{BrowserError, ElementSnapshot, Locator, PageDriver, Result};

/// Increments its counter when dropped; stands in for session teardown so
/// tests can assert release happens exactly once.
#[derive(Default)]
pub(crate) struct DropTally(pub Option<Arc<AtomicUsize>>);

impl DropTally {
    pub fn counting(counter: &Arc<AtomicUsize>) -> Self {
        Self(Some(Arc::clone(counter)))
    }
}

impl Drop for DropTally {
    fn drop(&mut self) {
        if let Some(counter) = &self.0 {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// A page whose behavior is fixed up front.
#[derive(Default)]
pub(crate) struct FakePage {
    /// `open` fails with a navigation error.
    pub fail_open: bool,
    /// Locators whose clickable wait never resolves.
    pub unclickable: Vec<Locator>,
    /// Locators whose clickable wait hits a driver fault.
    pub faulty: Vec<Locator>,
    /// Locators `wait_present` finds.
    pub present: Vec<Locator>,
    /// Scripted `find_all` responses.
    pub elements: Vec<(Locator, Vec<ElementSnapshot>)>,
    /// `find_all` panics, to exercise teardown on unwind.
    pub panic_on_find: bool,
    /// Every `wait_clickable` call, in order.
    pub attempts: Rc<RefCell<Vec<String>>>,
    /// Every capture tag, in order.
    pub captures: Rc<RefCell<Vec<String>>>,
    /// Counts this page's teardown.
    pub drops: DropTally,
}

impl PageDriver for FakePage {
    fn open(&self, _url: &str) -> Result<()> {
        if self.fail_open {
            Err(BrowserError::Navigation("scripted open failure".to_string()))
        } else {
            Ok(())
        }
    }

    fn wait_clickable(&self, locator: &Locator, _timeout: Duration) -> Result<bool> {
        self.attempts.borrow_mut().push(locator.to_string());
        if self.faulty.contains(locator) {
            Err(BrowserError::Driver("scripted driver fault".to_string()))
        } else {
            Ok(!self.unclickable.contains(locator))
        }
    }

    fn wait_present(&self, locator: &Locator, _timeout: Duration) -> bool {
        self.present.contains(locator)
    }

    fn find_all(&self, locator: &Locator) -> Vec<ElementSnapshot> {
        if self.panic_on_find {
            panic!("scripted find_all panic");
        }
        self.elements
            .iter()
            .find(|(scripted, _)| scripted == locator)
            .map(|(_, snapshots)| snapshots.clone())
            .unwrap_or_default()
    }

    fn capture(&self, tag: &str) {
        self.captures.borrow_mut().push(tag.to_string());
    }
}

/// A date-column header cell.
pub(crate) fn header(id: &str, label: &str) -> ElementSnapshot {
    ElementSnapshot::new(label, vec![("id".to_string(), id.to_string())])
}

/// A bookable time cell carrying its start timestamp.
pub(crate) fn cell(stamp: &str) -> ElementSnapshot {
    ElementSnapshot::new(
        "",
        vec![("data-fromdatetime".to_string(), stamp.to_string())],
    )
}

/// A plain text element, e.g. the sentinel label.
pub(crate) fn label(text: &str) -> ElementSnapshot {
    ElementSnapshot::new(text, Vec::new())
}
