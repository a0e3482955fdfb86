//! Store configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default lifetime of a stored session record: 30 minutes.
pub const DEFAULT_STORE_TTL_MS: u64 = 30 * 60 * 1000;

/// Which [`StoreBackend`](crate::StoreBackend) the default credentials
/// cache is built on.
///
/// Custom backends don't need a variant here: build a
/// [`CredentialsCache`](crate::CredentialsCache) around them yourself and
/// hand it to the session manager.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// [`MemoryBackend`](crate::MemoryBackend).
    #[default]
    Memory,
}

/// Configuration for the credentials store.
///
/// `#[serde(default)]` lets a config file set only the fields it cares
/// about; the rest come from [`StoreConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// The backend behind the default credentials cache.
    pub backend: BackendKind,

    /// How long (in milliseconds) a session record lives in the store
    /// before the backend drops it.
    ///
    /// Default: 30 minutes. This is independent of (and normally longer
    /// than) the session renewal interval.
    pub ttl_ms: u64,
}

impl StoreConfig {
    /// The record TTL as a `Duration`.
    pub fn ttl(&self) -> Duration {
        Duration::from_millis(self.ttl_ms)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Memory,
            ttl_ms: DEFAULT_STORE_TTL_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_config_default() {
        let config = StoreConfig::default();
        assert_eq!(config.backend, BackendKind::Memory);
        assert_eq!(config.ttl(), Duration::from_secs(30 * 60));
    }

    #[test]
    fn test_store_config_partial_json_fills_defaults() {
        let config: StoreConfig = serde_json::from_str(r#"{"ttl_ms": 5000}"#).unwrap();
        assert_eq!(config.backend, BackendKind::Memory);
        assert_eq!(config.ttl_ms, 5000);
    }

    #[test]
    fn test_backend_kind_snake_case() {
        let kind: BackendKind = serde_json::from_str(r#""memory""#).unwrap();
        assert_eq!(kind, BackendKind::Memory);
        assert!(serde_json::from_str::<BackendKind>(r#""redis""#).is_err());
    }
}
