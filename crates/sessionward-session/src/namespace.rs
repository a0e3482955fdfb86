//! Key namespacing.
//!
//! Several applications may share one physical credentials store (one
//! Redis, one cache cluster). Prefixing every generated token and the
//! default session-key name with the application's namespace keeps their
//! keys apart.

/// Separator between the namespace and the value it prefixes.
pub const NAMESPACE_DELIMITER: char = '_';

/// An optional prefix for generated keys.
///
/// ```rust
/// use sessionward_session::Namespace;
///
/// assert_eq!(Namespace::new(Some("shop")).prefix("auth"), "shop_auth");
/// assert_eq!(Namespace::none().prefix("auth"), "auth");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Namespace(Option<String>);

impl Namespace {
    /// Creates a namespace. `None` disables prefixing.
    pub fn new(namespace: Option<impl Into<String>>) -> Self {
        Self(namespace.map(Into::into))
    }

    /// A namespace that leaves values unprefixed.
    pub fn none() -> Self {
        Self(None)
    }

    /// The configured prefix, if any.
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Returns `value` prefixed with the namespace, or `value` unchanged
    /// when no namespace is configured.
    pub fn prefix(&self, value: &str) -> String {
        match &self.0 {
            Some(ns) => format!("{ns}{NAMESPACE_DELIMITER}{value}"),
            None => value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_with_namespace() {
        let ns = Namespace::new(Some("billing"));
        assert_eq!(ns.prefix("abc123"), "billing_abc123");
        assert_eq!(ns.as_str(), Some("billing"));
    }

    #[test]
    fn test_prefix_without_namespace_passes_through() {
        let ns = Namespace::new(None::<String>);
        assert_eq!(ns.prefix("abc123"), "abc123");
        assert_eq!(ns, Namespace::none());
    }
}
