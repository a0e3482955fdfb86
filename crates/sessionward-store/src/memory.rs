//! In-process store backend.
//!
//! [`MemoryBackend`] is the default backend: a `HashMap` behind an async
//! `RwLock`, with a deadline per entry. Expired entries read as absent and
//! are removed by the `get` that finds them. Entries nobody reads again are
//! removed by [`MemoryBackend::sweep_expired`].
//!
//! Deadlines use `tokio::time::Instant` rather than `std::time::Instant`
//! so tests can pause and advance the Tokio clock instead of sleeping.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::{StoreBackend, StoreError};

/// One stored value and when it stops being visible.
#[derive(Debug)]
struct Entry {
    value: Vec<u8>,
    /// `None` means the entry never expires.
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|deadline| deadline <= now)
    }
}

/// A [`StoreBackend`] that keeps everything in memory.
///
/// Data does not survive a restart and is not shared between processes,
/// so this is meant for development, tests, and single-node deployments.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, Entry>>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes every expired entry and returns how many were removed.
    ///
    /// Call this periodically if the process stores many short-lived
    /// sessions that are never looked up again.
    pub async fn sweep_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(now));
        let removed = before - entries.len();
        if removed > 0 {
            tracing::debug!(removed, "swept expired entries");
        }
        removed
    }

    /// Returns the number of live (unexpired) entries.
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|entry| !entry.is_expired(now))
            .count()
    }

    /// Returns `true` if there are no live entries.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl StoreBackend for MemoryBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if !entry.is_expired(now) => return Ok(Some(entry.value.clone())),
                Some(_) => {}
                None => return Ok(None),
            }
        }

        // A put may have replaced the entry between the two locks.
        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(|entry| entry.is_expired(now)) {
            entries.remove(key);
            tracing::trace!(key, "expired entry dropped");
        }
        Ok(None)
    }

    async fn put(
        &self,
        key: &str,
        value: Vec<u8>,
        ttl: Option<Duration>,
    ) -> Result<(), StoreError> {
        let expires_at = ttl.map(|ttl| Instant::now() + ttl);
        self.entries
            .write()
            .await
            .insert(key.to_string(), Entry { value, expires_at });
        tracing::trace!(key, ?ttl, "entry stored");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.entries.write().await.remove(key);
        tracing::trace!(key, "entry deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_missing_key_returns_none() {
        let backend = MemoryBackend::new();

        assert_eq!(backend.get("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_put_then_get_returns_value() {
        let backend = MemoryBackend::new();

        backend.put("k", b"v".to_vec(), None).await.unwrap();

        assert_eq!(backend.get("k").await.unwrap(), Some(b"v".to_vec()));
    }

    #[tokio::test]
    async fn test_put_existing_key_replaces_value() {
        let backend = MemoryBackend::new();
        backend.put("k", b"one".to_vec(), None).await.unwrap();

        backend.put("k", b"two".to_vec(), None).await.unwrap();

        assert_eq!(backend.get("k").await.unwrap(), Some(b"two".to_vec()));
        assert_eq!(backend.len().await, 1);
    }

    #[tokio::test]
    async fn test_delete_missing_key_is_ok() {
        let backend = MemoryBackend::new();

        backend.delete("never-there").await.unwrap();
        backend.delete("never-there").await.unwrap();

        assert!(backend.is_empty().await);
    }

    #[tokio::test]
    async fn test_delete_removes_value() {
        let backend = MemoryBackend::new();
        backend.put("k", b"v".to_vec(), None).await.unwrap();

        backend.delete("k").await.unwrap();

        assert_eq!(backend.get("k").await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_expired_entry_drops_it() {
        let backend = MemoryBackend::new();
        for i in 0..100 {
            let key = format!("k{i}");
            backend
                .put(&key, b"v".to_vec(), Some(Duration::from_secs(1)))
                .await
                .unwrap();
        }
        tokio::time::advance(Duration::from_secs(5)).await;

        for i in 0..100 {
            assert_eq!(backend.get(&format!("k{i}")).await.unwrap(), None);
        }

        assert_eq!(backend.entries.read().await.len(), 0);
        assert_eq!(backend.sweep_expired().await, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_expired_entry_keeps_unexpired_neighbours() {
        let backend = MemoryBackend::new();
        backend
            .put("short", b"a".to_vec(), Some(Duration::from_secs(1)))
            .await
            .unwrap();
        backend.put("forever", b"b".to_vec(), None).await.unwrap();
        tokio::time::advance(Duration::from_secs(2)).await;

        assert_eq!(backend.get("short").await.unwrap(), None);

        let entries = backend.entries.read().await;
        assert!(!entries.contains_key("short"));
        assert!(entries.contains_key("forever"));
    }
}
