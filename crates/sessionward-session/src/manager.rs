//! The session manager: resolves, issues, rotates, and revokes sessions.
//!
//! This is the central piece of the session layer. It's responsible for:
//! - Resolving a request's session token to a principal
//! - Issuing a fresh token (and record) on login
//! - Rotating tokens that have grown stale, transparently, during fetch
//! - Revoking the session on logout
//!
//! # Statelessness
//!
//! `SessionManager` holds configuration and collaborators, nothing else.
//! Every piece of session state lives either in the credentials store or
//! in the caller's [`RequestContext`]. One manager can be shared by all
//! request tasks behind an `Arc`.
//!
//! # Concurrent renewal
//!
//! There is no mutual exclusion across requests. Two requests carrying the
//! same stale token can both decide to rotate: each writes its own new
//! record and both delete the old token (harmless, deletes are
//! idempotent). The client keeps whichever token its transport persisted
//! last; the other record lingers until its store TTL expires.

use std::marker::PhantomData;
use std::sync::Arc;

use sessionward_record::{FINGERPRINT_KEY, INSERTED_AT_KEY, Metadata, SessionRecord};
use sessionward_store::CredentialsStore;

use crate::{
    Clock, IdGenerator, Namespace, RandomIdGenerator, RequestContext, SessionConfig,
    SessionError, SessionTransport, SystemClock,
};

/// Whether a session found in the store may keep its token.
///
/// ```text
///   fetch ──(no token / unknown token)──→ None
///     │
///     ├──(Fresh)──→ principal, token unchanged
///     │
///     └──(Stale)──→ create() ──→ principal, new token, same fingerprint
/// ```
///
/// A just-created record is always `Fresh`, so a fetch rotates at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Staleness {
    /// Younger than the renewal TTL (or renewal is disabled).
    Fresh,

    /// Older than the renewal TTL, or missing a usable `inserted_at`.
    Stale,
}

/// Manages session records for principals of type `P` in store `S`.
///
/// ## Lifecycle
///
/// ```text
/// login ──→ create() ──→ fetch() ... fetch() ──→ delete() ← logout
///              │            │            │
///              ▼            ▼            ▼
///           token T1     T1 (fresh)   T2 (stale → rotated)
/// ```
pub struct SessionManager<P, S> {
    store: S,
    config: SessionConfig,

    /// Resolved once from `config` so every call agrees on them.
    namespace: Namespace,
    session_key: String,

    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,

    _principal: PhantomData<fn() -> P>,
}

impl<P, S> SessionManager<P, S>
where
    P: Send + Sync + 'static,
    S: CredentialsStore<P>,
{
    /// Creates a manager over `store` using the system clock and random
    /// identifiers.
    ///
    /// # Errors
    /// Returns [`SessionError::Config`] if `config` fails validation.
    pub fn new(config: SessionConfig, store: S) -> Result<Self, SessionError> {
        config.validate()?;
        Ok(Self {
            namespace: config.namespace(),
            session_key: config.session_key(),
            store,
            config,
            clock: Arc::new(SystemClock),
            ids: Arc::new(RandomIdGenerator),
            _principal: PhantomData,
        })
    }

    /// Replaces the time source.
    pub fn with_clock(mut self, clock: impl Clock) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Replaces the token and fingerprint generator.
    pub fn with_id_generator(mut self, ids: impl IdGenerator) -> Self {
        self.ids = Arc::new(ids);
        self
    }

    /// The configuration this manager was built with.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The transport field name the token lives under.
    pub fn session_key(&self) -> &str {
        &self.session_key
    }

    /// The credentials store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolves the request's session to a principal.
    ///
    /// Returns `Ok(None)` when the request carries no token or the token
    /// is unknown to the store. In the second case the token is left in
    /// the transport as is.
    ///
    /// **This is not a pure read.** On success the stored metadata is
    /// written into the context's side-channel, and a stale session is
    /// rotated through [`create`](Self::create): a new record is written,
    /// the old one deleted, and the transport token replaced.
    ///
    /// # Errors
    /// Returns [`SessionError::Store`] if the store fails. Callers must
    /// treat that as "cannot establish session", not as "signed out".
    pub async fn fetch<T: SessionTransport>(
        &self,
        ctx: &mut RequestContext<T>,
    ) -> Result<Option<P>, SessionError> {
        let Some(token) = self.current_token(ctx) else {
            tracing::debug!("no session token in transport");
            return Ok(None);
        };

        let Some(SessionRecord { principal, metadata }) = self.store.get(&token).await?
        else {
            tracing::debug!("session token not found in store");
            return Ok(None);
        };

        if metadata.is_legacy() {
            tracing::debug!("normalizing legacy session metadata");
        }
        let metadata = metadata.normalize();
        let staleness = self.staleness(&metadata);
        ctx.set_metadata(metadata);

        match staleness {
            Staleness::Fresh => Ok(Some(principal)),
            Staleness::Stale => {
                tracing::debug!("session is stale, rotating token");
                self.create(ctx, principal).await.map(Some)
            }
        }
    }

    /// Issues a new session for `principal` and returns the principal.
    ///
    /// Caller metadata is read from the context's side-channel. Its
    /// `fingerprint` is kept if present (so a rotation stays the same
    /// login) and generated otherwise; `inserted_at` is always set to now.
    ///
    /// The new record is written *before* the request's previous token
    /// (if any) is deleted, so there is never a moment where neither
    /// token resolves.
    ///
    /// # Errors
    /// Returns [`SessionError::Store`] if the store fails. If the write
    /// itself fails the context is untouched.
    pub async fn create<T: SessionTransport>(
        &self,
        ctx: &mut RequestContext<T>,
        principal: P,
    ) -> Result<P, SessionError> {
        let mut metadata = ctx.metadata().cloned().unwrap_or_default();
        self.stamp_metadata(&mut metadata);

        let token = self.namespace.prefix(&self.ids.generate());
        let record = SessionRecord::new(principal, metadata.clone());
        let ttl = self.config.session_store.ttl();
        self.store.put(&token, &record, Some(ttl)).await?;

        let rotated = self.remove_current(ctx).await?;

        tracing::info!(
            fingerprint = metadata.fingerprint().unwrap_or_default(),
            rotated,
            "session created"
        );

        ctx.transport_mut().put(&self.session_key, token);
        ctx.set_metadata(metadata);

        Ok(record.principal)
    }

    /// Ends the request's session: deletes its record and clears the token
    /// from the transport. Does nothing if there is no token.
    ///
    /// # Errors
    /// Returns [`SessionError::Store`] if the store fails; the token stays
    /// in the transport in that case.
    pub async fn delete<T: SessionTransport>(
        &self,
        ctx: &mut RequestContext<T>,
    ) -> Result<(), SessionError> {
        if self.remove_current(ctx).await? {
            tracing::info!("session deleted");
        }
        Ok(())
    }

    /// Decides whether a session with `metadata` needs a new token.
    pub fn staleness(&self, metadata: &Metadata) -> Staleness {
        let Some(ttl) = self.config.session_ttl_renewal.ttl() else {
            return Staleness::Fresh;
        };
        // Without a creation time we can't vouch for the token's age.
        let Some(inserted_at) = metadata.inserted_at() else {
            return Staleness::Stale;
        };

        let ttl = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
        if inserted_at.saturating_add(ttl) < self.clock.now_millis() {
            Staleness::Stale
        } else {
            Staleness::Fresh
        }
    }

    /// Adds the mandatory `fingerprint` and `inserted_at` pairs.
    fn stamp_metadata(&self, metadata: &mut Metadata) {
        if metadata.fingerprint().is_none() {
            metadata.insert(FINGERPRINT_KEY, self.ids.generate());
        }
        metadata.insert(INSERTED_AT_KEY, self.clock.now_millis());
    }

    fn current_token<T: SessionTransport>(&self, ctx: &RequestContext<T>) -> Option<String> {
        ctx.transport().get(&self.session_key).map(str::to_owned)
    }

    /// Deletes the record behind the current token and clears the token.
    /// Returns whether there was a token.
    async fn remove_current<T: SessionTransport>(
        &self,
        ctx: &mut RequestContext<T>,
    ) -> Result<bool, SessionError> {
        let Some(token) = self.current_token(ctx) else {
            return Ok(false);
        };
        self.store.delete(&token).await?;
        ctx.transport_mut().delete(&self.session_key);
        Ok(true)
    }
}

// =========================================================================
// Tests
// =========================================================================
