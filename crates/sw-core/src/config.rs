//! Configuration management
//!
//! Settings are resolved in this order:
//! 1. Environment variables
//! 2. slotwatch.toml configuration file
//! 3. Default values
//!
//! Inside the configuration file, `${VAR_NAME}` expands to the value of the
//! named environment variable.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::Error;

/// Main configuration for slotwatch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Entry URL of the booking form
    #[serde(default = "default_booking_url")]
    pub booking_url: String,

    /// Whether the browser runs headless
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Directory for diagnostic captures (screenshots and page excerpts)
    #[serde(default = "default_debug_dir")]
    pub debug_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            booking_url: default_booking_url(),
            headless: default_headless(),
            debug_dir: default_debug_dir(),
        }
    }
}

fn default_booking_url() -> String {
    "https://ventus.enalog.se/Booking/Booking/Index/UDDLondon".to_string()
}

fn default_headless() -> bool {
    true
}

fn default_debug_dir() -> String {
    "debug".to_string()
}

impl Config {
    /// Expand `${VAR_NAME}` references to environment variable values.
    ///
    /// Unset variables expand to the empty string.
    fn expand_env_vars(value: &str) -> String {
        let mut result = String::new();
        let mut chars = value.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '$' && chars.peek() == Some(&'{') {
                chars.next(); // consume '{'

                let mut var_name = String::new();
                while let Some(&c) = chars.peek() {
                    if c == '}' {
                        chars.next(); // consume '}'
                        break;
                    }
                    var_name.push(c);
                    chars.next();
                }

                if let Ok(env_value) = std::env::var(&var_name) {
                    result.push_str(&env_value);
                }
            } else {
                result.push(c);
            }
        }

        result
    }

    /// Load configuration from a TOML file.
    ///
    /// `${VAR_NAME}` references in the file are expanded first; environment
    /// variables still override the file's values afterwards.
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();

        let toml_content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file: {}", e)))?;

        let expanded_content = Self::expand_env_vars(&toml_content);

        let mut config: Config = toml::from_str(&expanded_content)
            .map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))?;

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Tries `./slotwatch.toml`, and falls back to environment variables
    /// (over defaults) when no file exists.
    pub fn load() -> crate::Result<Self> {
        if Path::new("slotwatch.toml").exists() {
            tracing::debug!("Loading configuration from slotwatch.toml");
            return Self::from_toml_file("slotwatch.toml");
        }

        Self::from_env()
    }

    /// Load configuration from environment variables alone.
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Config::default();
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("SLOTWATCH_URL") {
            if !url.is_empty() {
                self.booking_url = url;
            }
        }

        if let Ok(headless) = std::env::var("SLOTWATCH_HEADLESS") {
            self.headless = headless.to_lowercase() != "false";
        }

        if let Ok(dir) = std::env::var("SLOTWATCH_DEBUG_DIR") {
            if !dir.is_empty() {
                self.debug_dir = dir;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.booking_url.contains("ventus.enalog.se"));
        assert!(config.headless);
        assert_eq!(config.debug_dir, "debug");
    }

    #[test]
    fn test_expand_env_vars() {
        unsafe {
            std::env::set_var("SLOTWATCH_TEST_VAR", "test_value");
        }

        let result = Config::expand_env_vars("prefix_${SLOTWATCH_TEST_VAR}_suffix");
        assert_eq!(result, "prefix_test_value_suffix");

        // Unset variables expand to nothing
        let result = Config::expand_env_vars("prefix_${NONEXISTENT_VAR}_suffix");
        assert_eq!(result, "prefix__suffix");

        unsafe {
            std::env::remove_var("SLOTWATCH_TEST_VAR");
        }
    }

    #[test]
    fn test_expand_env_vars_no_braces() {
        let result = Config::expand_env_vars("no_vars_here");
        assert_eq!(result, "no_vars_here");
    }

    #[test]
    fn test_expand_env_vars_empty_name() {
        let result = Config::expand_env_vars("${}_content");
        assert_eq!(result, "_content");
    }

    #[test]
    fn test_toml_config_parsing() {
        let toml_content = r#"
booking_url = "https://example.com/booking"
headless = false
debug_dir = "/tmp/captures"
"#;
        let config: Config = toml::from_str(toml_content).unwrap();
        assert_eq!(config.booking_url, "https://example.com/booking");
        assert!(!config.headless);
        assert_eq!(config.debug_dir, "/tmp/captures");
    }

    #[test]
    fn test_toml_config_partial() {
        let config: Config = toml::from_str("headless = false").unwrap();
        assert!(!config.headless);
        assert!(config.booking_url.contains("ventus.enalog.se"));
    }
}
