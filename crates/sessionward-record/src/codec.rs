//! Codec trait and implementations for serializing session records.
//!
//! A "codec" (coder/decoder) converts between Rust types and raw bytes.
//! Store backends deal in bytes; the credentials cache uses a [`Codec`] to
//! bridge the two. Swapping the codec changes the on-disk format without
//! touching the session logic.

use serde::{Serialize, de::DeserializeOwned};

use crate::RecordError;

/// A codec that can encode Rust types to bytes and decode bytes back.
///
/// ## Trait bounds explained
///
/// - `Send + Sync` → the codec lives inside a store that is shared
///   across request tasks.
/// - `'static` → it owns everything it needs.
///
/// `DeserializeOwned` (vs plain `Deserialize`) means the result doesn't
/// borrow from the input bytes, so the backend's buffer can be dropped
/// right after decoding.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns [`RecordError::Encode`] if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, RecordError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns [`RecordError::Decode`] if the bytes are malformed or don't
    /// match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, RecordError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// JSON keeps stored sessions inspectable, which helps when debugging a
/// shared cache. It is also the format legacy records were written in.
///
/// ## Example
///
/// ```rust
/// use sessionward_record::{Codec, JsonCodec, Metadata, SessionRecord};
///
/// let codec = JsonCodec;
/// let meta: Metadata = [("inserted_at", 0)].into_iter().collect();
/// let record = SessionRecord::new("alice".to_string(), meta);
///
/// let bytes = codec.encode(&record).unwrap();
/// let decoded: SessionRecord<String> = codec.decode(&bytes).unwrap();
/// assert_eq!(record, decoded);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, RecordError> {
        serde_json::to_vec(value).map_err(RecordError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, RecordError> {
        serde_json::from_slice(data).map_err(RecordError::Decode)
    }
}
