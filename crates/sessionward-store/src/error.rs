use sessionward_record::RecordError;

/// Errors that can occur in the store layer.
///
/// A missing key is never an error here: lookups return `Ok(None)` and
/// deletes of absent keys succeed. Everything in this enum means the
/// store could not do its job.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend failed (I/O error, connection refused, timeout, ...).
    #[error("store backend failed: {0}")]
    Backend(String),

    /// A record could not be encoded for, or decoded from, the backend.
    #[error(transparent)]
    Codec(#[from] RecordError),
}
