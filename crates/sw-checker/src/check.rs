//! One full availability check
//!
//! Acquires a browser session, drives the booking form, interprets the
//! results screen, and releases the session on every exit path. Only
//! session startup failure escapes as an error; everything else collapses
//! into the fail-closed unavailable result.

use tracing::{error, info};

use sw_browser::{BrowserConfig, BrowserSession, PageDriver};
use sw_core::{CheckResult, Config};

use crate::error::CheckError;
use crate::navigator::drive_to_results;
use crate::results::interpret_results;
use crate::steps::booking_steps;

/// Run one availability check against the configured booking site.
pub fn run_check(config: &Config) -> Result<CheckResult, CheckError> {
    let mut builder = BrowserConfig::builder().headless(config.headless);
    if !config.debug_dir.is_empty() {
        builder = builder.debug_dir(&config.debug_dir);
    }

    let session = BrowserSession::with_config(builder.build())?;
    Ok(run_with_session(session, &config.booking_url))
}

/// Owns the session for exactly one check. Teardown happens when `driver`
/// leaves this scope, on normal return and on unwind alike.
fn run_with_session<D: PageDriver>(driver: D, url: &str) -> CheckResult {
    check_availability(&driver, url)
}

fn check_availability(driver: &dyn PageDriver, url: &str) -> CheckResult {
    if let Err(e) = driver.open(url) {
        error!("Failed to open booking page: {}", e);
        driver.capture("open-failed");
        return CheckResult::unavailable();
    }
    info!("Loaded booking page");

    if !drive_to_results(driver, &booking_steps()) {
        return CheckResult::unavailable();
    }

    interpret_results(driver).into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::{DATE_HEADERS, GRID, NO_TIMES_SENTINEL, SENTINEL, SLOT_CELLS};
    use crate::testing::{DropTally, FakePage, cell, header, label};
    use std::panic::{AssertUnwindSafe, catch_unwind};
    use std::rc::Rc;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use sw_browser::Locator;
    use sw_core::AppointmentSlot;

    const URL: &str = "https://ventus.example/Booking";

    fn drop_counter() -> Arc<AtomicUsize> {
        Arc::new(AtomicUsize::new(0))
    }

    #[test]
    fn test_scenario_sentinel_present() {
        let drops = drop_counter();
        let page = FakePage {
            elements: vec![(SENTINEL, vec![label(NO_TIMES_SENTINEL)])],
            drops: DropTally::counting(&drops),
            ..FakePage::default()
        };

        let result = run_with_session(page, URL);
        assert_eq!(result, CheckResult::unavailable());
        assert_eq!(drops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_scenario_two_slots_found() {
        let drops = drop_counter();
        let page = FakePage {
            present: vec![GRID],
            elements: vec![
                (DATE_HEADERS, vec![header("2026-03-10", "10 March 2026")]),
                (
                    SLOT_CELLS,
                    vec![cell("2026-03-10 09:00:00"), cell("2026-03-10 09:30:00")],
                ),
            ],
            drops: DropTally::counting(&drops),
            ..FakePage::default()
        };

        let result = run_with_session(page, URL);
        assert!(result.available);
        assert_eq!(
            result.slots,
            vec![
                AppointmentSlot::new("10 March 2026", "09:00"),
                AppointmentSlot::new("10 March 2026", "09:30"),
            ]
        );
        assert_eq!(drops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_scenario_first_step_never_clickable() {
        let drops = drop_counter();
        let captures = Rc::new(std::cell::RefCell::new(Vec::new()));
        let page = FakePage {
            unclickable: vec![Locator::Css("input[title='Boka ny tid']")],
            captures: Rc::clone(&captures),
            drops: DropTally::counting(&drops),
            ..FakePage::default()
        };

        let result = run_with_session(page, URL);
        assert_eq!(result, CheckResult::unavailable());
        assert_eq!(captures.borrow().as_slice(), ["step-1-timeout"]);
        assert_eq!(drops.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_open_failure_degrades_with_capture() {
        let captures = Rc::new(std::cell::RefCell::new(Vec::new()));
        let page = FakePage {
            fail_open: true,
            captures: Rc::clone(&captures),
            ..FakePage::default()
        };

        let result = run_with_session(page, URL);
        assert_eq!(result, CheckResult::unavailable());
        assert_eq!(captures.borrow().as_slice(), ["open-failed"]);
    }

    #[test]
    fn test_session_dropped_once_even_on_unwind() {
        let drops = drop_counter();
        let page = FakePage {
            present: vec![GRID],
            panic_on_find: true,
            drops: DropTally::counting(&drops),
            ..FakePage::default()
        };

        let outcome = catch_unwind(AssertUnwindSafe(|| run_with_session(page, URL)));
        assert!(outcome.is_err());
        assert_eq!(drops.load(Ordering::SeqCst), 1);
    }
}
