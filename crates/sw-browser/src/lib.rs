//! sw-browser: browser automation layer for slotwatch
//!
//! This crate owns the single headless Chrome session used to drive the
//! booking form. It exposes:
//!
//! - Typed element locators resolving to CSS or XPath queries
//! - A managed [`BrowserSession`] with bounded-wait interaction primitives
//! - The [`PageDriver`] seam trait the booking flow is written against
//! - Best-effort diagnostic capture (screenshot + page text excerpt)

pub mod capture;
pub mod driver;
pub mod error;
pub mod locator;
pub mod session;

pub use driver::{ElementSnapshot, PageDriver};
pub use error::{BrowserError, Result};
pub use locator::{Locator, Query};
pub use session::{BrowserConfig, BrowserConfigBuilder, BrowserSession};
