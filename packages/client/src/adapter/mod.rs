//! Adapter façade
//!
//! [`HttpAdapter`] hides the concrete HTTP client behind the [`Backend`]
//! trait and runs every send through the event pipeline, so cross-cutting
//! concerns (cookies, retries, redirects, timing) live in subscribers instead
//! of the call sites.

mod multi;
mod single;

use std::fmt;
use std::sync::Arc;

pub use multi::BatchResponse;

use crate::backend::Backend;
use crate::config::{AdapterConfig, Validator};
use crate::error::{self, Result};
use crate::event::{EventDispatcher, Subscriber};
use crate::http::MessageFactory;

/// HTTP adapter: one backend, one configuration, one event pipeline.
///
/// The adapter is `Send + Sync`; sends take `&self` and may run from several
/// threads at once. Subscribers are registered through `&mut self` before the
/// adapter is shared.
pub struct HttpAdapter {
    backend: Box<dyn Backend>,
    config: AdapterConfig,
    factory: MessageFactory,
    dispatcher: EventDispatcher,
}

impl HttpAdapter {
    /// Creates an adapter with the default configuration and no subscribers.
    pub fn new(backend: impl Backend + 'static) -> Self {
        let config = AdapterConfig::default();
        Self {
            backend: Box::new(backend),
            factory: MessageFactory::from_config(&config),
            config,
            dispatcher: EventDispatcher::new(),
        }
    }

    /// Creates an adapter with `config`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `config` does not validate.
    pub fn with_config(backend: impl Backend + 'static, config: AdapterConfig) -> Result<Self> {
        config.validate().map_err(error::configuration)?;
        Ok(Self {
            backend: Box::new(backend),
            factory: MessageFactory::from_config(&config),
            config,
            dispatcher: EventDispatcher::new(),
        })
    }

    /// The backend's name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.backend.name()
    }

    #[must_use]
    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    #[must_use]
    pub fn factory(&self) -> &MessageFactory {
        &self.factory
    }

    #[must_use]
    pub fn dispatcher(&self) -> &EventDispatcher {
        &self.dispatcher
    }

    pub fn dispatcher_mut(&mut self) -> &mut EventDispatcher {
        &mut self.dispatcher
    }

    /// Registers `subscriber` on the adapter's event bus.
    pub fn subscribe(&mut self, subscriber: Arc<dyn Subscriber>) {
        self.dispatcher.subscribe(subscriber);
    }
}

impl fmt::Debug for HttpAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpAdapter")
            .field("backend", &self.name())
            .field("config", &self.config)
            .field("dispatcher", &self.dispatcher)
            .finish()
    }
}
