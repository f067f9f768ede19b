//! # Storefront Configuration
//!
//! Runtime settings loaded from the environment (and a `.env` file when
//! present). Every key has a default, so an empty environment yields a
//! working configuration pointing at a local backend.
//!
//! | Key | Default |
//! |-----|---------|
//! | `STOREFRONT_API_URL` | `http://127.0.0.1:5000` |
//! | `STOREFRONT_MESSAGE_HIDE_MS` | `5000` |
//! | `STOREFRONT_OVERLAY_HOLD_MS` | `1500` |
//! | `STOREFRONT_REDIRECT_DELAY_MS` | `500` |
//! | `STOREFRONT_REQUEST_TIMEOUT_SECS` | unset (transport default) |

use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{key} must be an integer, got {value:?}")]
    NotANumber { key: &'static str, value: String },
    #[error("STOREFRONT_API_URL must start with http:// or https://, got {0:?}")]
    InvalidApiUrl(String),
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),
}

/// Timer durations used by the notification surface, overlay and redirects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiTimings {
    /// How long a message stays fully visible before fading.
    pub message_hide: Duration,
    /// Length of the fade before the message slot is cleared.
    pub message_fade: Duration,
    /// How long the overlay holds a final outcome before dismissing.
    pub overlay_hold: Duration,
    /// Delay between a successful submission and its redirect.
    pub redirect_delay: Duration,
}

impl Default for UiTimings {
    fn default() -> Self {
        Self {
            message_hide: Duration::from_millis(5000),
            message_fade: Duration::from_millis(300),
            overlay_hold: Duration::from_millis(1500),
            redirect_delay: Duration::from_millis(500),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorefrontConfig {
    pub api_url: String,
    pub timings: UiTimings,
    pub request_timeout: Option<Duration>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timings: UiTimings::default(),
            request_timeout: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads `.env` first if one exists; variables already set in the
    /// process environment take precedence.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = UiTimings::default();
        let millis = |key: &'static str, default: Duration| -> Result<Duration, ConfigError> {
            match lookup(key) {
                Some(value) => parse_u64(key, &value).map(Duration::from_millis),
                None => Ok(default),
            }
        };

        let config = Self {
            api_url: lookup("STOREFRONT_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            timings: UiTimings {
                message_hide: millis("STOREFRONT_MESSAGE_HIDE_MS", defaults.message_hide)?,
                message_fade: defaults.message_fade,
                overlay_hold: millis("STOREFRONT_OVERLAY_HOLD_MS", defaults.overlay_hold)?,
                redirect_delay: millis("STOREFRONT_REDIRECT_DELAY_MS", defaults.redirect_delay)?,
            },
            request_timeout: lookup("STOREFRONT_REQUEST_TIMEOUT_SECS")
                .map(|value| parse_u64("STOREFRONT_REQUEST_TIMEOUT_SECS", &value))
                .transpose()?
                .map(Duration::from_secs),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(ConfigError::InvalidApiUrl(self.api_url.clone()));
        }
        if self.timings.message_hide.is_zero() {
            return Err(ConfigError::ZeroDuration("STOREFRONT_MESSAGE_HIDE_MS"));
        }
        if self.request_timeout.is_some_and(|t| t.is_zero()) {
            return Err(ConfigError::ZeroDuration("STOREFRONT_REQUEST_TIMEOUT_SECS"));
        }
        Ok(())
    }
}

fn parse_u64(key: &'static str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::NotANumber {
        key,
        value: value.to_string(),
    })
}
