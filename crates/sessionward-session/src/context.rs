//! Request-scoped state passed through fetch/create/delete.
//!
//! A [`RequestContext`] bundles the two things the session manager reads
//! and writes on behalf of a single request:
//!
//! - the **transport**: wherever the client's token lives between
//!   requests (normally a signed or encrypted cookie, decoded by the host
//!   framework before we see it)
//! - the **metadata side-channel**: session metadata echoed back by
//!   `fetch`, and read by `create`, so callers can inspect or extend it
//!   (add an IP address, a user agent, ...) before a login.

use std::collections::HashMap;

use sessionward_record::Metadata;

/// Where the client-held session token is read from and written to.
///
/// Sessionward only ever stores one opaque string under one field name.
/// Signing, encryption, and the actual `Set-Cookie` plumbing are the
/// host's job.
pub trait SessionTransport {
    /// Returns the value stored under `key`.
    fn get(&self, key: &str) -> Option<&str>;

    /// Stores `value` under `key`, replacing any previous value.
    fn put(&mut self, key: &str, value: String);

    /// Removes `key`. Removing an absent key is a no-op.
    fn delete(&mut self, key: &str);
}

/// A map-backed [`SessionTransport`].
///
/// Hosts typically decode the cookie session into one of these at the
/// start of a request and encode it back into the response at the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryTransport {
    fields: HashMap<String, String>,
}

impl MemoryTransport {
    /// Creates an empty transport (a client with no session).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport already holding `value` under `key`.
    pub fn with_field(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut fields = HashMap::new();
        fields.insert(key.into(), value.into());
        Self { fields }
    }
}

impl SessionTransport for MemoryTransport {
    fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    fn put(&mut self, key: &str, value: String) {
        self.fields.insert(key.to_string(), value);
    }

    fn delete(&mut self, key: &str) {
        self.fields.remove(key);
    }
}

/// Per-request session state.
///
/// Create one per request, pass it by `&mut` to the
/// [`SessionManager`](crate::SessionManager), then persist its transport
/// back to the client.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestContext<T = MemoryTransport> {
    transport: T,
    metadata: Option<Metadata>,
}

impl<T: SessionTransport> RequestContext<T> {
    /// Wraps the request's transport. The metadata slot starts empty.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            metadata: None,
        }
    }

    /// The transport holding the session token.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Mutable access to the transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Consumes the context, returning the transport to persist.
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Session metadata in the side-channel, if any.
    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref()
    }

    /// Replaces the side-channel metadata.
    pub fn set_metadata(&mut self, metadata: Metadata) {
        self.metadata = Some(metadata);
    }

    /// Mutable side-channel metadata, starting from empty if unset.
    ///
    /// Use this before a login to attach extra pairs:
    ///
    /// ```rust
    /// use sessionward_session::{MemoryTransport, RequestContext};
    ///
    /// let mut ctx = RequestContext::new(MemoryTransport::new());
    /// ctx.metadata_mut().insert("ip", "203.0.113.9");
    /// assert_eq!(ctx.metadata().map(|m| m.len()), Some(1));
    /// ```
    pub fn metadata_mut(&mut self) -> &mut Metadata {
        self.metadata.get_or_insert_with(Metadata::new)
    }

    /// Removes and returns the side-channel metadata.
    pub fn take_metadata(&mut self) -> Option<Metadata> {
        self.metadata.take()
    }
}
