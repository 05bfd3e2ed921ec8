//! Query string encoding

use std::collections::BTreeMap;
use std::fmt::Display;
use url::form_urlencoded;

/// Ordered query parameters
///
/// Lists repeat their key, maps are flattened to `key[sub]=value` and
/// absent values are skipped. Booleans render as `true`/`false`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Create an empty parameter list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one `key=value` pair
    pub fn push(&mut self, key: &str, value: impl Display) -> &mut Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    /// Append a pair if the value is present
    pub fn push_opt<V: Display>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.push(key, value);
        }
        self
    }

    /// Append one pair per value, repeating the key
    pub fn push_all<I>(&mut self, key: &str, values: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Display,
    {
        for value in values {
            self.push(key, value);
        }
        self
    }

    /// Append `key[sub]=value` for each map entry
    pub fn push_map<V: Display>(&mut self, key: &str, map: &BTreeMap<String, V>) -> &mut Self {
        for (sub, value) in map {
            self.push(&format!("{key}[{sub}]"), value);
        }
        self
    }

    /// Whether no pairs were added
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Form-urlencode the pairs in insertion order
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }

    /// Append the encoded pairs to a path
    pub fn append_to(&self, path: &str) -> String {
        if self.is_empty() {
            path.to_string()
        } else {
            format!("{path}?{}", self.encode())
        }
    }
}

/// Path of a series addressed by key
///
/// The key is percent-encoded as a single path segment.
pub fn make_series_url(key: &str) -> String {
    format!("series/key/{}", urlencoding::encode(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn test_list_repeats_key() {
        let mut params = QueryParams::new();
        params.push_all("foo", [1.to_string(), "foo".to_string()]);
        assert_eq!(params.encode(), "foo=1&foo=foo");
    }

    #[test]
    fn test_map_uses_brackets() {
        let mut attrs = BTreeMap::new();
        attrs.insert("bar".to_string(), "baz".to_string());

        let mut params = QueryParams::new();
        params.push_map("foo", &attrs);
        assert_eq!(params.encode(), "foo%5Bbar%5D=baz");
    }

    #[test]
    fn test_bool_is_lowercase() {
        let mut params = QueryParams::new();
        params.push("foo", true).push("bar", false);
        assert_eq!(params.encode(), "foo=true&bar=false");
    }

    #[test]
    fn test_none_is_skipped() {
        let mut params = QueryParams::new();
        params.push_opt::<&str>("foo", None);
        assert_eq!(params.encode(), "");
        assert!(params.is_empty());
        assert_eq!(params.append_to("series/"), "series/");
    }

    #[test]
    fn test_append_to_path() {
        let mut params = QueryParams::new();
        params
            .push("start", "2013-01-01T00:00:00+00:00")
            .push_opt("limit", Some(10));
        assert_eq!(
            params.append_to("series/key/foo/segment"),
            "series/key/foo/segment?start=2013-01-01T00%3A00%3A00%2B00%3A00&limit=10"
        );
    }

    #[test_case("foo", "series/key/foo" ; "plain")]
    #[test_case("foo:", "series/key/foo%3A" ; "colon")]
    #[test_case("foo.", "series/key/foo." ; "dot")]
    #[test_case("foo bar/baz", "series/key/foo%20bar%2Fbaz" ; "space and slash")]
    fn test_make_series_url(key: &str, expected: &str) {
        assert_eq!(make_series_url(key), expected);
    }
}
