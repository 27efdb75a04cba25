//! Configuration setters

use std::time::Duration;

use http::Version;
use http_adapter_client::AdapterConfig;
use http_adapter_client::error;
use url::Url;

use super::core::AdapterBuilder;

impl AdapterBuilder {
    /// Replaces the whole configuration.
    #[must_use]
    pub fn config(mut self, config: AdapterConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn keep_alive(mut self, keep_alive: bool) -> Self {
        self.config.keep_alive = keep_alive;
        self
    }

    #[must_use]
    pub fn protocol_version(mut self, version: Version) -> Self {
        self.config.protocol_version = version;
        self
    }

    /// Relative request URLs are resolved against `base_url`.
    ///
    /// An unparsable URL is reported by `build`.
    #[must_use]
    pub fn base_url(mut self, base_url: &str) -> Self {
        match Url::parse(base_url) {
            Ok(url) => {
                self.config.base_url = Some(url);
                self
            }
            Err(e) => self.fail(error::invalid_url(e, base_url)),
        }
    }
}
