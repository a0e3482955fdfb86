//! Session configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use sessionward_store::StoreConfig;

use crate::{Namespace, SessionError};

/// Transport field name used when `session_key` is not configured.
pub const DEFAULT_SESSION_KEY: &str = "auth";

/// Default age after which a session token is rotated: 15 minutes.
pub const DEFAULT_RENEWAL_TTL_MS: u64 = 15 * 60 * 1000;

// ---------------------------------------------------------------------------
// RenewalPolicy
// ---------------------------------------------------------------------------

/// When a fetched session counts as stale and gets a new token.
///
/// In config files this is either a number of milliseconds or the string
/// `"none"`:
///
/// ```json
/// { "session_ttl_renewal": 600000 }
/// { "session_ttl_renewal": "none" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RenewalRepr", into = "RenewalRepr")]
pub enum RenewalPolicy {
    /// Rotate once `inserted_at + ttl < now`.
    After(Duration),

    /// Never rotate on fetch.
    Disabled,
}

impl RenewalPolicy {
    /// The renewal TTL, or `None` when renewal is disabled.
    pub fn ttl(&self) -> Option<Duration> {
        match self {
            Self::After(ttl) => Some(*ttl),
            Self::Disabled => None,
        }
    }
}

impl Default for RenewalPolicy {
    fn default() -> Self {
        Self::After(Duration::from_millis(DEFAULT_RENEWAL_TTL_MS))
    }
}

/// Wire shape of [`RenewalPolicy`].
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RenewalRepr {
    Millis(u64),
    Keyword(RenewalKeyword),
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum RenewalKeyword {
    None,
}

impl From<RenewalRepr> for RenewalPolicy {
    fn from(repr: RenewalRepr) -> Self {
        match repr {
            RenewalRepr::Millis(ms) => Self::After(Duration::from_millis(ms)),
            RenewalRepr::Keyword(RenewalKeyword::None) => Self::Disabled,
        }
    }
}

impl From<RenewalPolicy> for RenewalRepr {
    fn from(policy: RenewalPolicy) -> Self {
        match policy {
            RenewalPolicy::After(ttl) => {
                Self::Millis(u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX))
            }
            RenewalPolicy::Disabled => Self::Keyword(RenewalKeyword::None),
        }
    }
}

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Configuration for session behavior.
///
/// Every field has a default, so `SessionConfig::default()` is a working
/// setup and config files only need to mention what they change:
///
/// ```rust
/// use sessionward_session::{RenewalPolicy, SessionConfig};
///
/// let config: SessionConfig = serde_json::from_str(r#"{
///     "namespace": "shop",
///     "session_ttl_renewal": "none"
/// }"#).unwrap();
///
/// assert_eq!(config.session_ttl_renewal, RenewalPolicy::Disabled);
/// assert_eq!(config.session_key(), "shop_auth");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Application identity used to prefix generated tokens and the
    /// default session key. `None` disables prefixing.
    pub namespace: Option<String>,

    /// Transport field name holding the session token.
    ///
    /// Default: `"auth"`, prefixed with the namespace. An explicitly
    /// configured key is used verbatim.
    pub session_key: Option<String>,

    /// Credentials store selection and record TTL.
    pub session_store: StoreConfig,

    /// Token rotation policy. Default: rotate after 15 minutes.
    pub session_ttl_renewal: RenewalPolicy,
}

impl SessionConfig {
    /// The namespace as a [`Namespace`].
    pub fn namespace(&self) -> Namespace {
        Namespace::new(self.namespace.clone())
    }

    /// The transport field name the token lives under.
    pub fn session_key(&self) -> String {
        match &self.session_key {
            Some(key) => key.clone(),
            None => self.namespace().prefix(DEFAULT_SESSION_KEY),
        }
    }

    /// Checks that the configuration can be used.
    ///
    /// # Errors
    /// Returns [`SessionError::Config`] for an empty namespace, an empty
    /// session key, or a zero store TTL.
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.namespace.as_deref().is_some_and(str::is_empty) {
            return Err(SessionError::Config("namespace must not be empty".into()));
        }
        if self.session_key.as_deref().is_some_and(str::is_empty) {
            return Err(SessionError::Config("session_key must not be empty".into()));
        }
        if self.session_store.ttl_ms == 0 {
            return Err(SessionError::Config(
                "session_store.ttl_ms must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_config_default() {
        let config = SessionConfig::default();
        assert_eq!(config.session_key(), "auth");
        assert_eq!(
            config.session_ttl_renewal.ttl(),
            Some(Duration::from_secs(15 * 60))
        );
        assert_eq!(config.session_store, StoreConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_session_key_default_is_namespaced() {
        let config = SessionConfig {
            namespace: Some("forum".into()),
            ..SessionConfig::default()
        };
        assert_eq!(config.session_key(), "forum_auth");
    }

    #[test]
    fn test_session_key_explicit_is_verbatim() {
        let config = SessionConfig {
            namespace: Some("forum".into()),
            session_key: Some("sid".into()),
            ..SessionConfig::default()
        };
        assert_eq!(config.session_key(), "sid");
    }

    #[test]
    fn test_renewal_policy_from_number() {
        let config: SessionConfig =
            serde_json::from_str(r#"{"session_ttl_renewal": 1000}"#).unwrap();
        assert_eq!(
            config.session_ttl_renewal,
            RenewalPolicy::After(Duration::from_secs(1))
        );
    }

    #[test]
    fn test_renewal_policy_from_none_keyword() {
        let config: SessionConfig =
            serde_json::from_str(r#"{"session_ttl_renewal": "none"}"#).unwrap();
        assert_eq!(config.session_ttl_renewal, RenewalPolicy::Disabled);
        assert_eq!(config.session_ttl_renewal.ttl(), None);
    }

    #[test]
    fn test_renewal_policy_rejects_unknown_keyword() {
        let result: Result<SessionConfig, _> =
            serde_json::from_str(r#"{"session_ttl_renewal": "sometimes"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_renewal_policy_serializes_back() {
        let disabled = serde_json::to_string(&RenewalPolicy::Disabled).unwrap();
        let after = serde_json::to_string(&RenewalPolicy::default()).unwrap();
        assert_eq!(disabled, r#""none""#);
        assert_eq!(after, "900000");
    }

    #[test]
    fn test_validate_rejects_empty_values() {
        let empty_ns = SessionConfig {
            namespace: Some(String::new()),
            ..SessionConfig::default()
        };
        let empty_key = SessionConfig {
            session_key: Some(String::new()),
            ..SessionConfig::default()
        };
        let zero_ttl = SessionConfig {
            session_store: StoreConfig {
                ttl_ms: 0,
                ..StoreConfig::default()
            },
            ..SessionConfig::default()
        };

        assert!(matches!(empty_ns.validate(), Err(SessionError::Config(_))));
        assert!(matches!(empty_key.validate(), Err(SessionError::Config(_))));
        assert!(matches!(zero_ttl.validate(), Err(SessionError::Config(_))));
    }
}
