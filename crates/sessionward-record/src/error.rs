//! Error types for the record layer.
//!
//! Each crate in Sessionward defines its own error enum. A `RecordError`
//! always means the problem is in turning a session record into bytes
//! (or back), never in the store or the session logic itself.

/// Errors that can occur while encoding or decoding session records.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    /// Serialization failed (turning a record into bytes).
    ///
    /// Usually means the caller's principal type refused to serialize,
    /// e.g. a map with non-string keys.
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a record).
    ///
    /// Common causes: a corrupted entry, a principal type that changed
    /// shape since the record was written, or metadata that is neither a
    /// pair sequence nor a legacy timestamp.
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),
}
