//! Error types for the session layer.

use sessionward_store::StoreError;

/// Errors that can occur during session management.
///
/// Note what is *not* here: a missing token or an unknown token is not an
/// error. [`SessionManager::fetch`](crate::SessionManager::fetch) returns
/// `Ok(None)` for those. An `Err` always means the session could not be
/// established and must not be treated as "not signed in".
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The credentials store failed. Nothing is retried at this layer.
    #[error("session store failed: {0}")]
    Store(#[from] StoreError),

    /// The configuration is unusable (empty namespace, zero TTL, ...).
    #[error("invalid session configuration: {0}")]
    Config(String),
}
