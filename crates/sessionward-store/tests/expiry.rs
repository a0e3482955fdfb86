//! Integration tests for TTL expiry in the memory backend.
//!
//! `tokio::time::pause()` freezes the Tokio clock and `advance()` moves it
//! forward instantly, so these tests check 30-minute TTLs without
//! sleeping.

use std::time::Duration;

use sessionward_record::{Metadata, SessionRecord};
use sessionward_store::{
    CredentialsCache, CredentialsStore, MemoryBackend, StoreBackend, StoreConfig,
};

#[tokio::test]
async fn test_entry_visible_until_ttl_elapses() {
    tokio::time::pause();
    let backend = MemoryBackend::new();
    backend
        .put("k", b"v".to_vec(), Some(Duration::from_secs(60)))
        .await
        .unwrap();

    tokio::time::advance(Duration::from_secs(59)).await;
    assert!(backend.get("k").await.unwrap().is_some());

    tokio::time::advance(Duration::from_secs(1)).await;
    assert!(backend.get("k").await.unwrap().is_none());
}

#[tokio::test]
async fn test_entry_without_ttl_never_expires() {
    tokio::time::pause();
    let backend = MemoryBackend::new();
    backend.put("k", b"v".to_vec(), None).await.unwrap();

    tokio::time::advance(Duration::from_secs(365 * 24 * 3600)).await;

    assert!(backend.get("k").await.unwrap().is_some());
}

#[tokio::test]
async fn test_sweep_expired_removes_only_dead_entries() {
    tokio::time::pause();
    let backend = MemoryBackend::new();
    backend
        .put("short", b"1".to_vec(), Some(Duration::from_secs(10)))
        .await
        .unwrap();
    backend
        .put("long", b"2".to_vec(), Some(Duration::from_secs(1000)))
        .await
        .unwrap();
    backend.put("forever", b"3".to_vec(), None).await.unwrap();

    tokio::time::advance(Duration::from_secs(11)).await;
    assert_eq!(backend.len().await, 2, "expired entries are not counted");

    let removed = backend.sweep_expired().await;

    assert_eq!(removed, 1);
    assert!(backend.get("long").await.unwrap().is_some());
    assert!(backend.get("forever").await.unwrap().is_some());
}

#[tokio::test]
async fn test_put_refreshes_ttl() {
    tokio::time::pause();
    let backend = MemoryBackend::new();
    let ttl = Some(Duration::from_secs(10));
    backend.put("k", b"v1".to_vec(), ttl).await.unwrap();

    tokio::time::advance(Duration::from_secs(8)).await;
    backend.put("k", b"v2".to_vec(), ttl).await.unwrap();
    tokio::time::advance(Duration::from_secs(8)).await;

    assert_eq!(backend.get("k").await.unwrap(), Some(b"v2".to_vec()));
}

#[tokio::test]
async fn test_credentials_cache_record_expires_with_store_ttl() {
    tokio::time::pause();
    let config = StoreConfig::default();
    let cache: CredentialsCache<String> = CredentialsCache::default();
    let record = SessionRecord::new("dave".to_string(), Metadata::new());
    cache.put("tok", &record, Some(config.ttl())).await.unwrap();

    tokio::time::advance(config.ttl() - Duration::from_millis(1)).await;
    assert_eq!(cache.get("tok").await.unwrap(), Some(record));

    tokio::time::advance(Duration::from_millis(1)).await;
    assert_eq!(cache.get("tok").await.unwrap(), None);
}
