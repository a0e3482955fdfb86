//! `SessionwardBuilder`: configuration in, ready-to-use manager out.
//!
//! The builder resolves the configured store backend into a concrete
//! credentials cache. Applications with their own [`CredentialsStore`]
//! skip the builder and call [`SessionManager::new`] directly.
//!
//! [`CredentialsStore`]: sessionward_store::CredentialsStore

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use sessionward_record::JsonCodec;
use sessionward_session::{RenewalPolicy, SessionConfig, SessionManager};
use sessionward_store::{BackendKind, CredentialsCache, MemoryBackend};

use crate::SessionwardError;

/// The store the builder produces for principals of type `P`.
pub type DefaultStore<P> = CredentialsCache<P, MemoryBackend, JsonCodec>;

/// Builder for configuring a [`SessionManager`] over the default store.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use sessionward::SessionwardBuilder;
///
/// let sessions = SessionwardBuilder::new()
///     .namespace("billing")
///     .renew_after(Duration::from_secs(600))
///     .build::<u64>()
///     .unwrap();
///
/// assert_eq!(sessions.session_key(), "billing_auth");
/// ```
#[derive(Debug, Clone, Default)]
pub struct SessionwardBuilder {
    config: SessionConfig,
}

impl SessionwardBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from a complete configuration.
    pub fn from_config(config: SessionConfig) -> Self {
        Self { config }
    }

    /// Starts from a JSON configuration document. Missing fields take
    /// their defaults.
    ///
    /// # Errors
    /// Returns [`SessionwardError::ConfigParse`] if the document is not
    /// valid JSON or has fields of the wrong type.
    pub fn from_json(json: &str) -> Result<Self, SessionwardError> {
        let config = serde_json::from_str(json)?;
        Ok(Self { config })
    }

    /// Sets the application namespace.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.config.namespace = Some(namespace.into());
        self
    }

    /// Sets the transport field name, used verbatim.
    pub fn session_key(mut self, key: impl Into<String>) -> Self {
        self.config.session_key = Some(key.into());
        self
    }

    /// Rotates tokens older than `ttl`.
    pub fn renew_after(mut self, ttl: Duration) -> Self {
        self.config.session_ttl_renewal = RenewalPolicy::After(ttl);
        self
    }

    /// Never rotates tokens on fetch.
    pub fn disable_renewal(mut self) -> Self {
        self.config.session_ttl_renewal = RenewalPolicy::Disabled;
        self
    }

    /// Sets how long records live in the store.
    pub fn store_ttl(mut self, ttl: Duration) -> Self {
        self.config.session_store.ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// The configuration built so far.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Builds a manager for principals of type `P`.
    ///
    /// # Errors
    /// Returns [`SessionwardError::Session`] if the configuration is
    /// invalid.
    pub fn build<P>(self) -> Result<SessionManager<P, DefaultStore<P>>, SessionwardError>
    where
        P: Serialize + DeserializeOwned + Send + Sync + 'static,
    {
        let store = match self.config.session_store.backend {
            BackendKind::Memory => CredentialsCache::new(MemoryBackend::new(), JsonCodec),
        };
        tracing::debug!(
            backend = ?self.config.session_store.backend,
            namespace = self.config.namespace.as_deref().unwrap_or(""),
            "building session manager"
        );
        Ok(SessionManager::new(self.config, store)?)
    }
}
