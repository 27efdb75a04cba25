//! Adapter configuration
//!
//! Settings shared by the message factory (protocol version, user agent,
//! base URL) and handed to backends on every send (timeout, keep-alive).

pub mod validation;

use std::time::Duration;

use http::Version;
use url::Url;

pub use validation::{ConfigResult, ConfigValidator, ConfigurationError, Validator};

/// Default `User-Agent` sent when the caller supplies none.
pub const DEFAULT_USER_AGENT: &str = concat!("http-adapter/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq)]
pub struct AdapterConfig {
    /// Protocol version stamped on requests built by the adapter.
    pub protocol_version: Version,
    /// Whether backends should keep connections alive between sends.
    pub keep_alive: bool,
    /// Per-request timeout; enforcing it is the backend's job.
    pub timeout: Duration,
    pub user_agent: String,
    /// Relative request URLs are resolved against this URL.
    pub base_url: Option<Url>,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            protocol_version: Version::HTTP_11,
            keep_alive: false,
            timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            base_url: None,
        }
    }
}

impl AdapterConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_protocol_version(mut self, version: Version) -> Self {
        self.protocol_version = version;
        self
    }

    #[must_use]
    pub fn with_keep_alive(mut self, keep_alive: bool) -> Self {
        self.keep_alive = keep_alive;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }
}

impl Validator for AdapterConfig {
    fn validate(&self) -> ConfigResult<()> {
        ConfigValidator::validate_timeout(self.timeout, "timeout")?;
        ConfigValidator::validate_user_agent(&self.user_agent)?;
        if let Some(ref base_url) = self.base_url {
            ConfigValidator::validate_base_url(base_url)?;
        }
        match self.protocol_version {
            Version::HTTP_10 | Version::HTTP_11 | Version::HTTP_2 | Version::HTTP_3 => Ok(()),
            other => Err(ConfigurationError::InvalidParameter(format!(
                "unsupported protocol version {other:?}"
            ))),
        }
    }
}
