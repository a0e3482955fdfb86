//! The byte-oriented backend contract.

use std::future::Future;
use std::time::Duration;

use crate::StoreError;

/// A key-value cache storing opaque bytes with an optional time-to-live.
///
/// This is the seam for plugging in real infrastructure. Implementations
/// must give read-after-write consistency per key: a `put` has to be
/// visible to the next `get` or `delete` of the same key on this instance.
///
/// # Trait bounds
///
/// - `Send + Sync + 'static` → one backend is shared by every request
///   task for the lifetime of the application.
/// - Each method returns `impl Future + Send` so callers can `.await` it
///   from inside `tokio::spawn`ed tasks.
pub trait StoreBackend: Send + Sync + 'static {
    /// Returns the bytes stored under `key`, or `None` if the key is
    /// absent or expired.
    fn get(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<Vec<u8>>, StoreError>> + Send;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// `ttl = None` means the entry never expires.
    fn put(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl: Option<Duration>,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Removes `key`. Removing an absent key is not an error.
    fn delete(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}
