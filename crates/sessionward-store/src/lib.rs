//! Credentials store layer for Sessionward.
//!
//! The session manager never talks to a database or cache directly. It
//! talks to a [`CredentialsStore`]: a typed key-value contract with
//! per-entry TTL. This crate provides:
//!
//! - [`CredentialsStore`]: the contract the session manager depends on
//! - [`StoreBackend`]: a lower-level, byte-oriented contract that real
//!   caches (Redis, memcached, a SQL table) map onto naturally
//! - [`CredentialsCache`]: the adapter from the first to the second,
//!   serializing records with a [`Codec`](sessionward_record::Codec)
//! - [`MemoryBackend`]: the default in-process backend
//! - [`StoreConfig`]: backend selection and TTL
//!
//! # How it fits in the stack
//!
//! ```text
//! Session Layer (above)  ← decides when records are created/rotated/deleted
//!     ↕
//! Store Layer (this crate)  ← owns storage and expiry
//!     ↕
//! Record Layer (below)  ← record types and codecs
//! ```

mod backend;
mod cache;
mod config;
mod error;
mod memory;

pub use backend::StoreBackend;
pub use cache::{CREDENTIALS_PREFIX, CredentialsCache, CredentialsStore};
pub use config::{BackendKind, DEFAULT_STORE_TTL_MS, StoreConfig};
pub use error::StoreError;
pub use memory::MemoryBackend;
