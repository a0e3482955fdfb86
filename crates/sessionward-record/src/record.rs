//! The persisted `(principal, metadata)` pair.

use std::fmt;

use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::Metadata;
use crate::metadata::INSERTED_AT_KEY;

/// Metadata as it may appear in a stored record.
///
/// Older deployments stored only the creation timestamp where the metadata
/// now lives. Both shapes decode into this enum; the session manager
/// normalizes the legacy one before using it.
///
/// `#[serde(untagged)]` tries each variant in order, so a JSON object
/// decodes as [`StoredMetadata::Current`] and a bare integer as
/// [`StoredMetadata::Legacy`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StoredMetadata {
    /// Ordered key/value pairs.
    Current(Metadata),

    /// A bare `inserted_at` timestamp in epoch milliseconds.
    ///
    /// Floats are truncated and integers past `i64::MAX` saturate.
    Legacy(#[serde(deserialize_with = "legacy_timestamp")] i64),
}

fn legacy_timestamp<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    struct TimestampVisitor;

    impl Visitor<'_> for TimestampVisitor {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a timestamp in epoch milliseconds")
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<i64, E> {
            Ok(value)
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<i64, E> {
            Ok(i64::try_from(value).unwrap_or(i64::MAX))
        }

        fn visit_f64<E: de::Error>(self, value: f64) -> Result<i64, E> {
            if value.is_finite() {
                // `as` saturates at the i64 bounds.
                Ok(value.trunc() as i64)
            } else {
                Err(E::invalid_value(Unexpected::Float(value), &self))
            }
        }
    }

    deserializer.deserialize_any(TimestampVisitor)
}

impl StoredMetadata {
    /// Returns `true` for the bare-timestamp shape.
    pub fn is_legacy(&self) -> bool {
        matches!(self, Self::Legacy(_))
    }

    /// Converts to ordered pairs. A legacy timestamp `n` becomes
    /// `{inserted_at: n}`.
    pub fn normalize(self) -> Metadata {
        match self {
            Self::Current(meta) => meta,
            Self::Legacy(inserted_at) => {
                let mut meta = Metadata::new();
                meta.insert(INSERTED_AT_KEY, inserted_at);
                meta
            }
        }
    }
}

impl From<Metadata> for StoredMetadata {
    fn from(meta: Metadata) -> Self {
        Self::Current(meta)
    }
}

/// One session as the credentials store sees it.
///
/// The principal is whatever the caller authenticated (a user struct, an
/// account id, ...). Sessionward never looks inside it; it only needs to
/// be serializable so byte-oriented backends can persist it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord<P> {
    /// The authenticated identity, returned to the caller unchanged.
    pub principal: P,

    /// Session metadata, possibly in the legacy shape.
    pub metadata: StoredMetadata,
}

impl<P> SessionRecord<P> {
    /// Creates a record in the current format.
    pub fn new(principal: P, metadata: Metadata) -> Self {
        Self {
            principal,
            metadata: StoredMetadata::Current(metadata),
        }
    }

    /// Creates a record in the legacy bare-timestamp format.
    pub fn legacy(principal: P, inserted_at: i64) -> Self {
        Self {
            principal,
            metadata: StoredMetadata::Legacy(inserted_at),
        }
    }
}
