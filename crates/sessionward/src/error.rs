//! Unified error type for Sessionward.

use sessionward_record::RecordError;
use sessionward_session::SessionError;
use sessionward_store::StoreError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `sessionward` facade you deal with this single error
/// type instead of importing errors from each sub-crate. The `#[from]`
/// attribute on each variant auto-generates `From` impls, so the `?`
/// operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum SessionwardError {
    /// A record encode/decode error.
    ///
    /// Facade operations never return this directly; codec failures during
    /// a session operation arrive as [`SessionwardError::Session`]. It lets
    /// callers that drive a [`Codec`](sessionward_record::Codec) themselves
    /// use `?` into this type.
    #[error(transparent)]
    Record(#[from] RecordError),

    /// A store-level error (backend unavailable, corrupt entry).
    ///
    /// Only produced when calling a store directly, e.g. seeding or
    /// inspecting records through `SessionManager::store`. Store failures
    /// inside `fetch`, `create` and `delete` arrive wrapped as
    /// [`SessionwardError::Session`].
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A session-level error (store failure during a session operation,
    /// invalid configuration).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The configuration document could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_store_error() {
        let err = StoreError::Backend("timeout".into());
        let top: SessionwardError = err.into();
        assert!(matches!(top, SessionwardError::Store(_)));
        assert!(top.to_string().contains("timeout"));
    }

    #[test]
    fn test_from_session_error() {
        let err = SessionError::Config("bad".into());
        let top: SessionwardError = err.into();
        assert!(matches!(top, SessionwardError::Session(_)));
        assert_eq!(top.to_string(), "invalid session configuration: bad");
    }

    #[test]
    fn test_from_record_error() {
        let json_err = serde_json::from_str::<u8>("x").unwrap_err();
        let top: SessionwardError = RecordError::Decode(json_err).into();
        assert!(matches!(top, SessionwardError::Record(_)));
    }

    #[test]
    fn test_from_session_store_error_stays_session_variant() {
        let err = SessionError::Store(StoreError::Backend("down".into()));
        let top: SessionwardError = err.into();
        assert!(matches!(
            top,
            SessionwardError::Session(SessionError::Store(StoreError::Backend(_)))
        ));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<u8>("x").unwrap_err();
        let top: SessionwardError = json_err.into();
        assert!(matches!(top, SessionwardError::ConfigParse(_)));
    }
}
