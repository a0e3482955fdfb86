//! Session record format for Sessionward.
//!
//! This crate defines what a session looks like once it leaves the
//! session manager and lands in a credentials store:
//!
//! - **Metadata** ([`Metadata`]): the ordered key/value pairs attached to
//!   every session (`fingerprint`, `inserted_at`, plus anything the caller
//!   adds).
//! - **Records** ([`SessionRecord`], [`StoredMetadata`]): the persisted
//!   `(principal, metadata)` pair, including the legacy shape where the
//!   metadata was a bare timestamp.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how records become bytes
//!   for byte-oriented store backends.
//! - **Errors** ([`RecordError`]): what can go wrong while doing that.
//!
//! # Architecture
//!
//! ```text
//! Session Layer (principal + metadata) → Record (this crate) → Store (bytes)
//! ```

mod codec;
mod error;
mod metadata;
mod record;

pub use codec::{Codec, JsonCodec};
pub use error::RecordError;
pub use metadata::{FINGERPRINT_KEY, INSERTED_AT_KEY, Metadata};
pub use record::{SessionRecord, StoredMetadata};

/// Re-exported so callers can build metadata values without adding
/// `serde_json` to their own manifest.
pub use serde_json::Value;
