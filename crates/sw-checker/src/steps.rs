//! The fixed click sequence for the Ventus booking form
//!
//! The sequence is data, interpreted by one generic loop in
//! [`crate::navigator`]. Adding or removing a form step is an edit here,
//! never a change to the traversal logic.

use std::time::Duration;

use sw_browser::Locator;

/// One interaction in the booking flow.
#[derive(Debug, Clone)]
pub struct Step {
    pub locator: Locator,
    pub description: &'static str,
    pub timeout: Duration,
}

const STEP_TIMEOUT: Duration = Duration::from_secs(10);

/// The time search round-trips to the booking backend and can take a while.
const SEARCH_TIMEOUT: Duration = Duration::from_secs(30);

/// The ordered steps from the booking landing page to the results screen.
pub fn booking_steps() -> Vec<Step> {
    vec![
        Step {
            locator: Locator::Css("input[title='Boka ny tid']"),
            description: "new booking button",
            timeout: STEP_TIMEOUT,
        },
        Step {
            locator: Locator::Id("AcceptInformationStorage"),
            description: "information storage consent checkbox",
            timeout: STEP_TIMEOUT,
        },
        Step {
            locator: Locator::Css("input[value='Nästa']"),
            description: "next button (consent page)",
            timeout: STEP_TIMEOUT,
        },
        Step {
            locator: Locator::Id("ServiceCategoryCustomers_0__ServiceCategoryId"),
            description: "service category radio button",
            timeout: STEP_TIMEOUT,
        },
        Step {
            locator: Locator::Css("input[value='Nästa']"),
            description: "next button (category page)",
            timeout: STEP_TIMEOUT,
        },
        Step {
            locator: Locator::Id("RequiresConditionalAgreement"),
            description: "conditional agreement checkbox",
            timeout: STEP_TIMEOUT,
        },
        Step {
            locator: Locator::Css("input[value='Nästa']"),
            description: "next button (agreement page)",
            timeout: STEP_TIMEOUT,
        },
        Step {
            locator: Locator::Name("TimeSearchFirstAvailableButton"),
            description: "first available time search",
            timeout: SEARCH_TIMEOUT,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_shape() {
        let steps = booking_steps();
        assert_eq!(steps.len(), 8);
        assert_eq!(steps[0].description, "new booking button");
        assert_eq!(
            steps.last().unwrap().locator,
            Locator::Name("TimeSearchFirstAvailableButton")
        );
    }

    #[test]
    fn test_search_step_gets_longer_bound() {
        let steps = booking_steps();
        let search = steps.last().unwrap();
        for step in &steps[..steps.len() - 1] {
            assert!(search.timeout > step.timeout);
        }
    }

    #[test]
    fn test_no_consecutive_identical_locators() {
        // The next step's bounded wait doubles as the post-click settle, so
        // back-to-back steps must target distinct elements.
        let steps = booking_steps();
        for pair in steps.windows(2) {
            assert_ne!(pair[0].locator, pair[1].locator);
        }
    }
}
