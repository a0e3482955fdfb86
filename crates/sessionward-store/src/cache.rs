//! The typed credentials store contract and its byte-backend adapter.

use std::future::Future;
use std::marker::PhantomData;
use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use sessionward_record::{Codec, JsonCodec, SessionRecord};

use crate::{MemoryBackend, StoreBackend, StoreError};

/// Prefix applied to every session key inside the backend, so session
/// records can share a backend with other cached data.
pub const CREDENTIALS_PREFIX: &str = "credentials";

/// Stores session records keyed by session token.
///
/// This is the only store interface the session manager uses. Keys are
/// opaque strings; the principal and metadata are opaque to the store,
/// which is responsible for serializing them however it likes.
///
/// # Contract
///
/// - `get` returns `Ok(None)` for absent or expired keys.
/// - `put` replaces any existing record under the key.
/// - `delete` is idempotent: deleting an absent key succeeds.
/// - A `put` is visible to the next `get`/`delete` of the same key.
pub trait CredentialsStore<P>: Send + Sync + 'static {
    /// Looks up the record stored under `key`.
    fn get(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<Option<SessionRecord<P>>, StoreError>> + Send;

    /// Stores `record` under `key` for `ttl` (`None` = no expiry).
    fn put(
        &self,
        key: &str,
        record: &SessionRecord<P>,
        ttl: Option<Duration>,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Removes the record stored under `key`, if any.
    fn delete(
        &self,
        key: &str,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// A [`CredentialsStore`] on top of any [`StoreBackend`].
///
/// Records are encoded with the codec `C` (JSON by default) and stored
/// under `credentials:<key>` in the backend.
///
/// `PhantomData<fn() -> P>` records which principal type this cache
/// stores without actually owning a `P`; the `fn() -> P` form keeps the
/// cache `Send + Sync` regardless of `P`.
///
/// ```rust
/// use sessionward_store::{CredentialsCache, CredentialsStore};
/// use sessionward_record::{Metadata, SessionRecord};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let cache: CredentialsCache<String> = CredentialsCache::default();
/// let record = SessionRecord::new("alice".to_string(), Metadata::new());
///
/// cache.put("token-1", &record, None).await.unwrap();
/// assert_eq!(cache.get("token-1").await.unwrap(), Some(record));
/// # }
/// ```
pub struct CredentialsCache<P, B = MemoryBackend, C = JsonCodec> {
    backend: B,
    codec: C,
    _principal: PhantomData<fn() -> P>,
}

impl<P, B, C> CredentialsCache<P, B, C> {
    /// Creates a cache over `backend`, serializing with `codec`.
    pub fn new(backend: B, codec: C) -> Self {
        Self {
            backend,
            codec,
            _principal: PhantomData,
        }
    }

    /// The underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<P> Default for CredentialsCache<P, MemoryBackend, JsonCodec> {
    fn default() -> Self {
        Self::new(MemoryBackend::new(), JsonCodec)
    }
}

fn backend_key(key: &str) -> String {
    format!("{CREDENTIALS_PREFIX}:{key}")
}

impl<P, B, C> CredentialsStore<P> for CredentialsCache<P, B, C>
where
    P: Serialize + DeserializeOwned + Send + Sync + 'static,
    B: StoreBackend,
    C: Codec,
{
    async fn get(&self, key: &str) -> Result<Option<SessionRecord<P>>, StoreError> {
        let Some(bytes) = self.backend.get(&backend_key(key)).await? else {
            return Ok(None);
        };
        let record: SessionRecord<P> = self.codec.decode(&bytes)?;
        Ok(Some(record))
    }

    async fn put(
        &self,
        key: &str,
        record: &SessionRecord<P>,
        ttl: Option<Duration>,
    ) -> Result<(), StoreError> {
        let bytes = self.codec.encode(record)?;
        self.backend.put(&backend_key(key), bytes, ttl).await
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.backend.delete(&backend_key(key)).await
    }
}
