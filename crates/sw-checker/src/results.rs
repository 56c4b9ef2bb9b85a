//! Results-screen interpretation
//!
//! Two-phase reading of the page the time search lands on: an immediate
//! sentinel check for the "no times" label, then a bounded wait for the
//! results grid. The distinctions between the empty outcomes are kept in
//! [`ResultsScreen`] for logging and only collapse to the boolean
//! [`CheckResult`] at the `run_check` boundary.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use tracing::{debug, info, warn};

use sw_browser::{Locator, PageDriver};
use sw_core::{AppointmentSlot, CheckResult};

/// Exact label text the booking site shows when the search found nothing.
pub const NO_TIMES_SENTINEL: &str = "Inga lediga tider kunde hittas.";

pub(crate) const SENTINEL: Locator = Locator::Text(NO_TIMES_SENTINEL);
pub(crate) const GRID: Locator = Locator::Css("table.timetable");
pub(crate) const DATE_HEADERS: Locator = Locator::Css("table.timetable th[id]");
pub(crate) const SLOT_CELLS: Locator = Locator::Css("td[data-fromdatetime]");

const GRID_TIMEOUT: Duration = Duration::from_secs(15);

/// Header ids encode calendar dates. Any year is accepted; the deployed
/// year changes over time.
static DATE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));

/// What the results screen turned out to hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsScreen {
    /// The "no times" sentinel label is on the page.
    NoSlotsConfirmed,
    /// Neither sentinel nor grid appeared within the bound.
    GridTimedOut,
    /// The grid rendered but holds no bookable cell.
    GridEmpty,
    /// Bookable cells found, in encounter order.
    SlotsFound(Vec<AppointmentSlot>),
}

impl ResultsScreen {
    /// Collapse to the external contract: only found slots count as
    /// available.
    pub fn into_result(self) -> CheckResult {
        match self {
            ResultsScreen::SlotsFound(slots) => CheckResult::found(slots),
            _ => CheckResult::unavailable(),
        }
    }
}

/// Interpret the page state after the navigator completed the search step.
pub fn interpret_results(driver: &dyn PageDriver) -> ResultsScreen {
    // The sentinel is unambiguous, so it wins over whatever else is on the
    // page. No wait: it renders with the response when present at all.
    if !driver.find_all(&SENTINEL).is_empty() {
        info!("Sentinel present: no times available");
        return ResultsScreen::NoSlotsConfirmed;
    }

    if !driver.wait_present(&GRID, GRID_TIMEOUT) {
        warn!("Results grid never appeared");
        driver.capture("grid-timeout");
        return ResultsScreen::GridTimedOut;
    }

    extract_slots(driver)
}

/// Pull every bookable cell out of the grid.
fn extract_slots(driver: &dyn PageDriver) -> ResultsScreen {
    let mut labels: Vec<(String, String)> = Vec::new();
    for header in driver.find_all(&DATE_HEADERS) {
        if let Some(id) = header.attr("id") {
            if DATE_TOKEN.is_match(id) {
                labels.push((id.to_string(), header.text.trim().to_string()));
            }
        }
    }
    debug!("Found {} date column headers", labels.len());

    let cells = driver.find_all(&SLOT_CELLS);
    let mut slots = Vec::new();
    for cell in &cells {
        let Some(stamp) = cell.attr("data-fromdatetime") else {
            continue;
        };
        match slot_from_timestamp(stamp, &labels) {
            Some(slot) => slots.push(slot),
            None => warn!("Skipping cell with malformed timestamp: {:?}", stamp),
        }
    }

    if slots.is_empty() {
        info!("Grid present but no bookable cells");
        return ResultsScreen::GridEmpty;
    }

    info!("Found {} bookable slots", slots.len());
    ResultsScreen::SlotsFound(slots)
}

/// Turn one `YYYY-MM-DD HH:MM:SS` cell timestamp into a slot, resolving the
/// date token through the header labels. A token without a matching header
/// still yields a slot, labeled with the raw token.
fn slot_from_timestamp(stamp: &str, labels: &[(String, String)]) -> Option<AppointmentSlot> {
    let (date_token, time_part) = stamp.trim().split_once(' ')?;
    let time = time_part.get(..5)?;

    let label = labels
        .iter()
        .find(|(token, _)| token == date_token)
        .map(|(_, label)| label.clone())
        .unwrap_or_else(|| date_token.to_string());

    Some(AppointmentSlot::new(label, time))
}
