//! Canonical query-string codec.
//!
//! Client and server agree on a small, non-percent-encoded form:
//!
//! - entries are emitted in insertion order, separated by `&`
//! - an entry with an empty or absent value is a bare key (`foo`, no `=`)
//!
//! [`decode`] is lenient: stray `&` separators are skipped and a bare key
//! decodes to an empty value.
//!
//! # Example
//!
//! ```
//! use sigrest_core::{QueryParams, decode_query, encode_query};
//!
//! let params = QueryParams::new()
//!     .with("lang", "fr_FR")
//!     .with_bare("visible");
//! assert_eq!(encode_query(&params), "lang=fr_FR&visible");
//!
//! let decoded = decode_query("&lang=fr_FR&&visible&");
//! assert_eq!(decoded.get("visible"), Some(""));
//! ```

use std::fmt;

/// Insertion-ordered query parameters.
///
/// Inserting an existing key replaces its value in place, keeping the
/// original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: Vec<(String, Option<String>)>,
}

impl QueryParams {
    /// Creates an empty set of parameters.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts or replaces a parameter. `None` means a bare key.
    pub fn insert(&mut self, key: impl Into<String>, value: Option<String>) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder-style insert of a `key=value` parameter.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, Some(value.into()));
        self
    }

    /// Builder-style insert of a bare key.
    #[must_use]
    pub fn with_bare(mut self, key: impl Into<String>) -> Self {
        self.insert(key, None);
        self
    }

    /// Value for a key. Bare keys read as `""`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_deref().unwrap_or_default())
    }

    /// Returns `true` if the key is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Removes a key and returns its value.
    pub fn remove(&mut self, key: &str) -> Option<Option<String>> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(key, value)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }

    /// Merges `other` on top of `self`: keys already present keep their
    /// position and take `other`'s value, new keys are appended.
    #[must_use]
    pub fn merged_with(mut self, other: Self) -> Self {
        for (key, value) in other.entries {
            self.insert(key, value);
        }
        self
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<Option<String>>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value.into());
        }
        params
    }
}

impl<K, V> Extend<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<Option<String>>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value.into());
        }
    }
}

impl fmt::Display for QueryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode(self))
    }
}

/// Encodes parameters into the canonical query string (no leading `?`).
///
/// Returns `""` for empty parameters.
#[must_use]
pub fn encode(params: &QueryParams) -> String {
    let mut out = String::new();

    for (key, value) in params.iter() {
        out.push_str(key);
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            out.push('=');
            out.push_str(value);
        }
        out.push('&');
    }
    out.pop();

    out
}

/// Decodes a raw query string (no leading `?`).
///
/// Every `=` switches the current segment to its value and is itself
/// dropped. Segments with an empty key are skipped entirely; a later
/// duplicate key overwrites the earlier value.
#[must_use]
pub fn decode(raw: &str) -> QueryParams {
    let mut table = QueryParams::new();
    let mut key = String::new();
    let mut value = String::new();
    let mut seen_equals = false;

    for c in raw.chars() {
        match c {
            '&' => {
                if !key.is_empty() {
                    table.insert(std::mem::take(&mut key), Some(std::mem::take(&mut value)));
                }
                value.clear();
                seen_equals = false;
            }
            '=' => seen_equals = true,
            c if seen_equals => value.push(c),
            c => key.push(c),
        }
    }

    if !key.is_empty() {
        table.insert(key, Some(value));
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected() -> QueryParams {
        QueryParams::new()
            .with("var1", "foo")
            .with("var2", "bar")
            .with("foo", "")
    }

    #[test]
    fn decode_simple() {
        assert_eq!(decode("var1=foo&var2=bar&foo"), expected());
    }

    #[test]
    fn decode_with_stray_separators() {
        assert_eq!(decode("&var1=foo&&var2=bar&foo&"), expected());
    }

    #[test]
    fn decode_empty() {
        assert!(decode("").is_empty());
        assert!(decode("&&&").is_empty());
    }

    #[test]
    fn decode_drops_extra_equals() {
        let params = decode("a=b=c");
        assert_eq!(params.get("a"), Some("bc"));
    }

    #[test]
    fn decode_skips_segment_without_key() {
        let params = decode("=x&y=1");
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("y"), Some("1"));
    }

    #[test]
    fn decode_duplicate_key_overwrites_in_place() {
        let params = decode("a=1&b=2&a=3");
        let pairs: Vec<_> = params.iter().collect();
        assert_eq!(pairs, vec![("a", Some("3")), ("b", Some("2"))]);
    }

    #[test]
    fn encode_simple() {
        assert_eq!(encode(&expected()), "var1=foo&var2=bar&foo");
    }

    #[test]
    fn encode_with_bare_and_empty_values() {
        let params = QueryParams::new()
            .with("var1", "foo")
            .with("var2", "bar")
            .with("foo", "")
            .with("bar", "baz")
            .with_bare("baz");
        assert_eq!(encode(&params), "var1=foo&var2=bar&foo&bar=baz&baz");
    }

    #[test]
    fn encode_empty() {
        assert_eq!(encode(&QueryParams::new()), "");
    }

    #[test]
    fn round_trip_normalizes_bare_keys() {
        let params = QueryParams::new()
            .with("lang", "fr_FR")
            .with_bare("visible")
            .with("limit", "10");
        let decoded = decode(&encode(&params));

        assert_eq!(decoded.get("lang"), Some("fr_FR"));
        assert_eq!(decoded.get("visible"), Some(""));
        assert_eq!(decoded.get("limit"), Some("10"));
        assert_eq!(encode(&decoded), encode(&params));
    }

    #[test]
    fn merge_keeps_position_and_takes_new_value() {
        let base = decode("a=1&b=2");
        let merged = base.merged_with(QueryParams::new().with("b", "9").with("c", "3"));
        assert_eq!(encode(&merged), "a=1&b=9&c=3");
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut params = QueryParams::new().with("a", "1").with("b", "2");
        params.insert("a", None);
        assert_eq!(encode(&params), "a&b=2");
        assert_eq!(params.remove("a"), Some(None));
        assert!(!params.contains_key("a"));
    }

    #[test]
    fn from_iterator() {
        let params: QueryParams = [("lang", Some("en_US".to_string())), ("flag", None)]
            .into_iter()
            .collect();
        assert_eq!(params.to_string(), "lang=en_US&flag");
    }
}
