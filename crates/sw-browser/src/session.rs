//! Browser session management
//!
//! Provides a managed headless Chrome instance with automatic lifecycle
//! handling. One session is acquired per availability check and torn down
//! when it goes out of scope, success or failure.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use headless_chrome::{Browser, Element, LaunchOptionsBuilder, Tab, protocol::cdp::Page};
use tracing::{debug, info, warn};

use crate::capture::write_capture;
use crate::driver::{ElementSnapshot, PageDriver};
use crate::error::{BrowserError, Result};
use crate::locator::{Locator, Query};

/// How often bounded waits re-query the page.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Upper bound on the page-text excerpt stored by diagnostic capture.
const EXCERPT_LIMIT: usize = 2000;

/// Browser session configuration
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Whether to run in headless mode
    pub headless: bool,
    /// Window width in pixels
    pub width: u32,
    /// Window height in pixels
    pub height: u32,
    /// Directory for diagnostic captures; `None` disables capture
    pub debug_dir: Option<PathBuf>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            width: 1920,
            height: 1080,
            debug_dir: None,
        }
    }
}

impl BrowserConfig {
    /// Create a new configuration builder
    pub fn builder() -> BrowserConfigBuilder {
        BrowserConfigBuilder::default()
    }
}

/// Builder for BrowserConfig
#[derive(Default)]
pub struct BrowserConfigBuilder {
    config: BrowserConfig,
}

impl BrowserConfigBuilder {
    pub fn headless(mut self, headless: bool) -> Self {
        self.config.headless = headless;
        self
    }

    pub fn window_size(mut self, width: u32, height: u32) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    pub fn debug_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.debug_dir = Some(dir.into());
        self
    }

    pub fn build(self) -> BrowserConfig {
        self.config
    }
}

/// Managed browser session
pub struct BrowserSession {
    browser: Browser,
    config: BrowserConfig,
}

impl BrowserSession {
    /// Create a new browser session with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(BrowserConfig::default())
    }

    /// Create a new browser session with custom configuration
    ///
    /// Sandboxing is disabled so the browser can launch inside containers.
    pub fn with_config(config: BrowserConfig) -> Result<Self> {
        use std::ffi::OsStr;

        info!("Creating browser session (headless: {})", config.headless);

        let args: Vec<String> = vec![
            format!("--window-size={},{}", config.width, config.height),
            "--no-sandbox".to_string(),
            "--disable-setuid-sandbox".to_string(),
            "--disable-dev-shm-usage".to_string(),
            "--disable-gpu".to_string(),
            "--disable-software-rasterizer".to_string(),
        ];

        let os_args: Vec<&OsStr> = args.iter().map(OsStr::new).collect();

        let launch_options = LaunchOptionsBuilder::default()
            .headless(config.headless)
            .args(os_args)
            .build()
            .map_err(|e| BrowserError::Startup(format!("Failed to build launch options: {}", e)))?;

        let browser = Browser::new(launch_options)
            .map_err(|e| BrowserError::Startup(format!("Failed to launch browser: {}", e)))?;

        info!("Browser session created successfully");

        Ok(Self { browser, config })
    }

    /// Get the active tab
    fn active_tab(&self) -> Result<Arc<Tab>> {
        let tabs = self.browser.get_tabs();
        let tabs_guard = tabs
            .lock()
            .map_err(|e| BrowserError::Driver(format!("Failed to lock tabs: {}", e)))?;

        tabs_guard
            .first()
            .cloned()
            .ok_or_else(|| BrowserError::Driver("No active tab available".to_string()))
    }

    /// Find one matching element, `None` when absent right now.
    fn try_find<'a>(&self, tab: &'a Arc<Tab>, locator: &Locator) -> Option<Element<'a>> {
        match locator.to_query() {
            Query::Css(selector) => tab.find_element(&selector).ok(),
            Query::XPath(query) => tab.find_element_by_xpath(&query).ok(),
        }
    }

    /// Snapshot text and attributes out of a live element handle.
    fn snapshot(element: &Element<'_>) -> ElementSnapshot {
        let text = element.get_inner_text().unwrap_or_default();

        // DOM.getAttributes returns a flat [name, value, ...] list
        let attributes = element
            .get_attributes()
            .ok()
            .flatten()
            .unwrap_or_default()
            .chunks_exact(2)
            .map(|pair| (pair[0].clone(), pair[1].clone()))
            .collect();

        ElementSnapshot::new(text, attributes)
    }

    /// Get the browser configuration
    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }
}

impl PageDriver for BrowserSession {
    fn open(&self, url: &str) -> Result<()> {
        let tab = self.active_tab()?;

        info!("Navigating to: {}", url);

        tab.navigate_to(url)
            .map_err(|e| BrowserError::Navigation(format!("Failed to navigate to {}: {}", url, e)))?;

        tab.wait_until_navigated()
            .map_err(|e| BrowserError::Navigation(format!("Navigation timeout: {}", e)))?;

        Ok(())
    }

    fn wait_clickable(&self, locator: &Locator, timeout: Duration) -> Result<bool> {
        let tab = self.active_tab()?;
        let deadline = Instant::now() + timeout;

        loop {
            if let Some(element) = self.try_find(&tab, locator) {
                match element.click() {
                    Ok(_) => {
                        debug!("Clicked {}", locator);
                        return Ok(true);
                    }
                    // Present but not interactable yet; keep polling
                    Err(e) => debug!("Element {} not clickable yet: {}", locator, e),
                }
            }

            if Instant::now() >= deadline {
                return Ok(false);
            }
            std::thread::sleep(POLL_INTERVAL);
        }
    }

    fn wait_present(&self, locator: &Locator, timeout: Duration) -> bool {
        let Ok(tab) = self.active_tab() else {
            return false;
        };
        let deadline = Instant::now() + timeout;

        loop {
            if self.try_find(&tab, locator).is_some() {
                return true;
            }

            if Instant::now() >= deadline {
                return false;
            }
            std::thread::sleep(POLL_INTERVAL);
        }
    }

    fn find_all(&self, locator: &Locator) -> Vec<ElementSnapshot> {
        let Ok(tab) = self.active_tab() else {
            return Vec::new();
        };

        let elements = match locator.to_query() {
            Query::Css(selector) => tab.find_elements(&selector),
            Query::XPath(query) => tab.find_elements_by_xpath(&query),
        };

        match elements {
            Ok(elements) => elements.iter().map(Self::snapshot).collect(),
            Err(_) => Vec::new(),
        }
    }

    fn capture(&self, tag: &str) {
        let Some(dir) = &self.config.debug_dir else {
            return;
        };

        let tab = match self.active_tab() {
            Ok(tab) => tab,
            Err(e) => {
                warn!("Diagnostic capture '{}' skipped: {}", tag, e);
                return;
            }
        };

        let screenshot = tab
            .capture_screenshot(Page::CaptureScreenshotFormatOption::Png, None, None, true)
            .ok();

        let excerpt: String = tab
            .find_element("body")
            .and_then(|body| body.get_inner_text())
            .unwrap_or_default()
            .chars()
            .take(EXCERPT_LIMIT)
            .collect();

        if let Err(e) = write_capture(dir, tag, screenshot.as_deref(), &excerpt) {
            warn!("Diagnostic capture '{}' failed: {}", tag, e);
        } else {
            debug!("Diagnostic capture '{}' written to {}", tag, dir.display());
        }
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        info!("Closing browser session");
        // The Chrome process is torn down when the Browser handle drops
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_config_default() {
        let config = BrowserConfig::default();
        assert!(config.headless);
        assert_eq!(config.width, 1920);
        assert_eq!(config.height, 1080);
        assert!(config.debug_dir.is_none());
    }

    #[test]
    fn test_browser_config_builder() {
        let config = BrowserConfig::builder()
            .headless(false)
            .window_size(1280, 720)
            .debug_dir("/tmp/captures")
            .build();

        assert!(!config.headless);
        assert_eq!(config.width, 1280);
        assert_eq!(config.height, 720);
        assert_eq!(config.debug_dir, Some(PathBuf::from("/tmp/captures")));
    }
}
