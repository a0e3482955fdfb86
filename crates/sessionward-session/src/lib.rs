//! Session lifecycle management for Sessionward.
//!
//! This crate answers one question per request: *who is this?* It does so
//! by looking up the opaque session token the client sent, and it keeps
//! those tokens short-lived by rotating them transparently:
//!
//! 1. **Fetch**: resolve the token to a principal ([`SessionManager::fetch`])
//! 2. **Create**: issue a fresh token on login ([`SessionManager::create`])
//! 3. **Rotate**: replace stale tokens during fetch, keeping the login's
//!    fingerprint stable
//! 4. **Delete**: drop the session on logout ([`SessionManager::delete`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Host application (above)  ← authenticates users, owns the cookie/transport
//!     ↕
//! Session Layer (this crate)  ← decides when records are created/rotated/deleted
//!     ↕
//! Store Layer (below)  ← owns storage and expiry of records
//! ```

mod clock;
mod config;
mod context;
mod error;
mod id;
mod manager;
mod namespace;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{
    DEFAULT_RENEWAL_TTL_MS, DEFAULT_SESSION_KEY, RenewalPolicy, SessionConfig,
};
pub use context::{MemoryTransport, RequestContext, SessionTransport};
pub use error::SessionError;
pub use id::{IdGenerator, RandomIdGenerator};
pub use manager::{SessionManager, Staleness};
pub use namespace::{NAMESPACE_DELIMITER, Namespace};
