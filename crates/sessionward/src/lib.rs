//! # Sessionward
//!
//! Session-based authentication lifecycle for Rust services.
//!
//! Your application authenticates users however it likes; Sessionward
//! takes the authenticated principal from there. It issues an opaque
//! session token on login, resolves it back to the principal on every
//! request, rotates tokens that have grown stale (keeping a stable
//! per-login fingerprint), and revokes the session on logout.
//!
//! ## Quick Start
//!
//! ```rust
//! use sessionward::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), SessionwardError> {
//! let sessions = SessionwardBuilder::new()
//!     .namespace("shop")
//!     .build::<String>()?;
//!
//! // Login: the user was authenticated elsewhere.
//! let mut ctx = RequestContext::new(MemoryTransport::new());
//! sessions.create(&mut ctx, "alice".to_string()).await?;
//!
//! // Next request: the client sends the token back.
//! let mut next = RequestContext::new(ctx.transport().clone());
//! assert_eq!(sessions.fetch(&mut next).await?, Some("alice".to_string()));
//!
//! // Logout.
//! sessions.delete(&mut next).await?;
//! # Ok(())
//! # }
//! ```

mod builder;
mod error;
pub mod telemetry;

pub use builder::{DefaultStore, SessionwardBuilder};
pub use error::SessionwardError;

pub use sessionward_record as record;
pub use sessionward_session as session;
pub use sessionward_store as store;

/// Everything needed to wire sessions into an application.
pub mod prelude {
    pub use crate::{DefaultStore, SessionwardBuilder, SessionwardError};
    pub use sessionward_record::{Metadata, SessionRecord, StoredMetadata};
    pub use sessionward_session::{
        Clock, IdGenerator, ManualClock, MemoryTransport, RenewalPolicy, RequestContext,
        SessionConfig, SessionError, SessionManager, SessionTransport, Staleness,
        SystemClock,
    };
    pub use sessionward_store::{
        BackendKind, CredentialsCache, CredentialsStore, MemoryBackend, StoreBackend,
        StoreConfig, StoreError,
    };
}
