//! Ordered session metadata.
//!
//! Every session carries a small bag of key/value pairs next to the
//! principal. Two keys are mandatory and maintained by the session manager:
//!
//! - `fingerprint`: a stable id for one login, kept across token rotations
//! - `inserted_at`: epoch milliseconds of the last (re)creation
//!
//! Callers may add anything else (client IP, user agent, first-seen time).
//!
//! # Why not a `HashMap`?
//!
//! Downstream consumers may care about the order in which keys were added,
//! and a `HashMap` iterates in arbitrary order. [`Metadata`] is a plain
//! `Vec` of pairs with map-like helpers on top. Sessions carry a handful of
//! keys, so linear lookup is fine.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Metadata key holding the stable login fingerprint.
pub const FINGERPRINT_KEY: &str = "fingerprint";

/// Metadata key holding the creation timestamp in epoch milliseconds.
pub const INSERTED_AT_KEY: &str = "inserted_at";

/// An insertion-ordered sequence of unique key/value pairs.
///
/// Writing a key that already exists replaces its value in place
/// (last write wins) and keeps its original position.
///
/// ```rust
/// use sessionward_record::Metadata;
///
/// let mut meta = Metadata::new();
/// meta.insert("ip", "10.0.0.1");
/// meta.insert("user_agent", "curl/8.0");
/// meta.insert("ip", "10.0.0.2");
///
/// let keys: Vec<&str> = meta.keys().collect();
/// assert_eq!(keys, ["ip", "user_agent"]);
/// assert_eq!(meta.get("ip").and_then(|v| v.as_str()), Some("10.0.0.2"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    entries: Vec<(String, Value)>,
}

impl Metadata {
    /// Creates empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    /// Returns `true` if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Sets `key` to `value`, replacing any previous value.
    ///
    /// Returns the previous value if the key was already present.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Option<Value> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Removes `key` and returns its value.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let pos = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(pos).1)
    }

    /// Merges `other` into `self`, pair by pair, in `other`'s order.
    ///
    /// Keys from `other` overwrite keys already in `self`; keys that only
    /// exist in `other` are appended.
    pub fn merge(&mut self, other: Metadata) {
        for (key, value) in other.entries {
            self.insert(key, value);
        }
    }

    /// The login fingerprint, if present and a string.
    pub fn fingerprint(&self) -> Option<&str> {
        self.get(FINGERPRINT_KEY).and_then(Value::as_str)
    }

    /// The creation timestamp in epoch milliseconds, if present and an
    /// integer.
    pub fn inserted_at(&self) -> Option<i64> {
        self.get(INSERTED_AT_KEY).and_then(Value::as_i64)
    }

    /// Iterates over the keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Iterates over the pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no pairs.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Collecting pairs goes through [`Metadata::insert`], so duplicate keys
/// in the input resolve last-write-wins.
impl<K, V> FromIterator<(K, V)> for Metadata
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut meta = Metadata::new();
        for (k, v) in iter {
            meta.insert(k, v);
        }
        meta
    }
}

impl IntoIterator for Metadata {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

// ---------------------------------------------------------------------------
// Serde
// ---------------------------------------------------------------------------

// Metadata is written as a JSON object whose key order is the pair order.
// serde_json's `Map` would sort keys (without the `preserve_order`
// feature), so we drive the map serializer ourselves.

impl Serialize for Metadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Metadata {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(MetadataVisitor)
    }
}

struct MetadataVisitor;

impl<'de> Visitor<'de> for MetadataVisitor {
    type Value = Metadata;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of session metadata")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Metadata, A::Error> {
        let mut meta = Metadata::new();
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            meta.insert(key, value);
        }
        Ok(meta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_new_key_appends_in_order() {
        let mut meta = Metadata::new();
        meta.insert("b", 1);
        meta.insert("a", 2);
        meta.insert("c", 3);

        assert_eq!(meta.keys().collect::<Vec<_>>(), ["b", "a", "c"]);
    }

    #[test]
    fn test_insert_existing_key_replaces_in_place() {
        let mut meta = Metadata::new();
        meta.insert("ip", "1.1.1.1");
        meta.insert("ua", "firefox");

        let previous = meta.insert("ip", "2.2.2.2");

        assert_eq!(previous, Some(Value::from("1.1.1.1")));
        assert_eq!(meta.len(), 2);
        assert_eq!(meta.keys().collect::<Vec<_>>(), ["ip", "ua"]);
        assert_eq!(meta.get("ip"), Some(&Value::from("2.2.2.2")));
    }

    #[test]
    fn test_merge_other_wins_and_new_keys_append() {
        let mut base: Metadata =
            [("ip", Value::from("1.1.1.1")), ("inserted_at", Value::from(5))]
                .into_iter()
                .collect();
        let other: Metadata =
            [("inserted_at", Value::from(10)), ("fingerprint", Value::from("fp"))]
                .into_iter()
                .collect();

        base.merge(other);

        assert_eq!(
            base.keys().collect::<Vec<_>>(),
            ["ip", "inserted_at", "fingerprint"]
        );
        assert_eq!(base.inserted_at(), Some(10));
        assert_eq!(base.fingerprint(), Some("fp"));
    }

    #[test]
    fn test_from_iter_duplicate_keys_last_write_wins() {
        let meta: Metadata = [("k", 1), ("k", 2)].into_iter().collect();

        assert_eq!(meta.len(), 1);
        assert_eq!(meta.get("k"), Some(&Value::from(2)));
    }

    #[test]
    fn test_remove_returns_value_and_drops_key() {
        let mut meta: Metadata = [("a", 1), ("b", 2)].into_iter().collect();

        assert_eq!(meta.remove("a"), Some(Value::from(1)));
        assert_eq!(meta.remove("a"), None);
        assert!(!meta.contains_key("a"));
        assert_eq!(meta.len(), 1);
    }

    #[test]
    fn test_typed_accessors_ignore_wrong_types() {
        let meta: Metadata = [
            (FINGERPRINT_KEY, Value::from(42)),
            (INSERTED_AT_KEY, Value::from("yesterday")),
        ]
        .into_iter()
        .collect();

        assert_eq!(meta.fingerprint(), None);
        assert_eq!(meta.inserted_at(), None);
    }

    #[test]
    fn test_serialize_keeps_insertion_order() {
        let meta: Metadata = [("zeta", 1), ("alpha", 2)].into_iter().collect();

        let json = serde_json::to_string(&meta).unwrap();

        assert_eq!(json, r#"{"zeta":1,"alpha":2}"#);
    }

    #[test]
    fn test_deserialize_keeps_document_order() {
        let meta: Metadata =
            serde_json::from_str(r#"{"zeta":1,"alpha":2,"mid":3}"#).unwrap();

        assert_eq!(meta.keys().collect::<Vec<_>>(), ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_deserialize_rejects_non_map() {
        let result: Result<Metadata, _> = serde_json::from_str("[1, 2]");

        assert!(result.is_err());
    }
}
