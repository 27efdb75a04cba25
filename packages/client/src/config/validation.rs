//! Core Configuration Utilities
//!
//! Common configuration validation for adapter settings.

use std::time::Duration;

use url::Url;

/// Configuration validation result type
pub type ConfigResult<T> = Result<T, ConfigurationError>;

/// Configuration error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Invalid timeout value: {0}")]
    InvalidTimeout(String),

    #[error("Invalid user agent: {0}")]
    InvalidUserAgent(String),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Invalid configuration parameter: {0}")]
    InvalidParameter(String),
}

/// Configuration validation trait
pub trait Validator {
    /// Validates the configuration settings
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` variant if any validation fails:
    /// - `InvalidTimeout` - if timeout values are zero or exceed limits
    /// - `InvalidUserAgent` - if the user agent is empty or too long
    /// - `InvalidBaseUrl` - if the base URL is not an http(s) URL
    /// - `InvalidParameter` - if parameters are outside valid ranges
    fn validate(&self) -> ConfigResult<()>;
}

/// Common configuration validation utilities
pub struct ConfigValidator;

impl ConfigValidator {
    /// Maximum accepted request timeout.
    pub const MAX_TIMEOUT: Duration = Duration::from_secs(3600);

    /// Maximum accepted `User-Agent` length.
    pub const MAX_USER_AGENT_LEN: usize = 1000;

    /// Validate timeout duration
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidTimeout` if:
    /// - The timeout duration is zero
    /// - The timeout duration exceeds 1 hour (3600 seconds)
    pub fn validate_timeout(timeout: Duration, name: &str) -> ConfigResult<()> {
        if timeout.is_zero() {
            return Err(ConfigurationError::InvalidTimeout(format!(
                "{name} cannot be zero"
            )));
        }

        if timeout > Self::MAX_TIMEOUT {
            return Err(ConfigurationError::InvalidTimeout(format!(
                "{name} must not exceed 1 hour"
            )));
        }

        Ok(())
    }

    /// Validate user agent
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidUserAgent` if the user agent is
    /// empty, too long, or not a valid header value.
    pub fn validate_user_agent(user_agent: &str) -> ConfigResult<()> {
        if user_agent.is_empty() {
            return Err(ConfigurationError::InvalidUserAgent(
                "user agent cannot be empty".to_string(),
            ));
        }

        if user_agent.len() > Self::MAX_USER_AGENT_LEN {
            return Err(ConfigurationError::InvalidUserAgent(format!(
                "user agent must not exceed {} characters",
                Self::MAX_USER_AGENT_LEN
            )));
        }

        if http::HeaderValue::from_str(user_agent).is_err() {
            return Err(ConfigurationError::InvalidUserAgent(
                "user agent is not a valid header value".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate base URL scheme
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidBaseUrl` if the scheme is not
    /// `http` or `https`.
    pub fn validate_base_url(url: &Url) -> ConfigResult<()> {
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(ConfigurationError::InvalidBaseUrl(format!(
                "unsupported scheme \"{other}\" in {url}"
            ))),
        }
    }
}
