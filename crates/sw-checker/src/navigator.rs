//! Booking navigator
//!
//! Replays the step table against a [`PageDriver`]. Each step's bounded
//! wait also serves as the settle wait for the previous click: the next
//! element becoming clickable is the signal that the page transition
//! finished. The first step that never resolves aborts the rest.

use tracing::{debug, error, info, warn};

use sw_browser::PageDriver;

use crate::steps::Step;

/// Drive the form through every step. Returns `true` when the final step
/// was clicked and the results screen should be loading.
pub fn drive_to_results(driver: &dyn PageDriver, steps: &[Step]) -> bool {
    for (index, step) in steps.iter().enumerate() {
        debug!(
            "Step {}/{}: waiting for {}",
            index + 1,
            steps.len(),
            step.description
        );

        match driver.wait_clickable(&step.locator, step.timeout) {
            Ok(true) => info!("Clicked {}", step.description),
            Ok(false) => {
                warn!("Timed out waiting for {}", step.description);
                driver.capture(&format!("step-{}-timeout", index + 1));
                return false;
            }
            Err(e) => {
                error!("Driver fault on {}: {}", step.description, e);
                driver.capture(&format!("step-{}-fault", index + 1));
                return false;
            }
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steps::booking_steps;
    use crate::testing::FakePage;
    use sw_browser::Locator;

    #[test]
    fn test_full_sequence_clicks_every_step() {
        let page = FakePage::default();
        let steps = booking_steps();

        assert!(drive_to_results(&page, &steps));
        assert_eq!(page.attempts.borrow().len(), steps.len());
        assert!(page.captures.borrow().is_empty());
    }

    #[test]
    fn test_timeout_aborts_remaining_steps() {
        let page = FakePage {
            unclickable: vec![Locator::Id("ServiceCategoryCustomers_0__ServiceCategoryId")],
            ..FakePage::default()
        };
        let steps = booking_steps();

        assert!(!drive_to_results(&page, &steps));
        // Steps 1-4 attempted, 5-8 never reached
        assert_eq!(page.attempts.borrow().len(), 4);
        assert_eq!(page.captures.borrow().as_slice(), ["step-4-timeout"]);
    }

    #[test]
    fn test_driver_fault_aborts_with_capture() {
        let page = FakePage {
            faulty: vec![Locator::Css("input[title='Boka ny tid']")],
            ..FakePage::default()
        };

        assert!(!drive_to_results(&page, &booking_steps()));
        assert_eq!(page.attempts.borrow().len(), 1);
        assert_eq!(page.captures.borrow().as_slice(), ["step-1-fault"]);
    }
}
