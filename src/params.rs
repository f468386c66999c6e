//! Ordered request parameters.

use serde::Serialize;
use serde_json::Value;

use crate::error::{Result, TwitterError};

/// Ordered list of request parameters.
///
/// Sent as the query string for `GET`/`DELETE` and as a form-encoded body for
/// `POST`. Values are percent-encoded with the RFC 3986 unreserved set, the
/// same encoding OAuth signing uses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter.
    pub fn push(&mut self, key: impl Into<String>, value: impl ToString) {
        self.0.push((key.into(), value.to_string()));
    }

    /// Builder form of [`Params::push`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.push(key, value);
        self
    }

    /// Flatten a serializable struct or map into parameters.
    ///
    /// Top-level `null` values are skipped; nested arrays and objects are
    /// rendered as JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` does not serialize to a JSON object.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        let object = match serde_json::to_value(value)? {
            Value::Object(map) => map,
            Value::Null => return Ok(Self::default()),
            other => {
                return Err(TwitterError::InvalidArgument(format!(
                    "parameters must serialize to an object, got {other}"
                )))
            }
        };

        let mut params = Self::default();
        for (key, value) in object {
            match value {
                Value::Null => {}
                Value::String(s) => params.push(key, s),
                other => params.push(key, other),
            }
        }
        Ok(params)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (String, String)> {
        self.0.iter()
    }

    /// `k=v&k=v` with both sides percent-encoded.
    pub fn encode(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = &'a (String, String);
    type IntoIter = std::slice::Iter<'a, (String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Percent-encode everything outside the RFC 3986 unreserved set.
pub(crate) fn percent_encode(s: &str) -> String {
    urlencoding::encode(s).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Options {
        q: String,
        page: Option<u32>,
        lang: Option<String>,
    }

    #[test]
    fn test_encode_preserves_order_and_escapes() {
        let params = Params::new()
            .with("status", "Hello Ladies + Gentlemen!")
            .with("id", 42);
        assert_eq!(
            params.encode(),
            "status=Hello%20Ladies%20%2B%20Gentlemen%21&id=42"
        );
    }

    #[test]
    fn test_empty_encodes_to_empty_string() {
        assert_eq!(Params::new().encode(), "");
        assert!(Params::new().is_empty());
    }

    #[test]
    fn test_from_serialize_skips_nulls() {
        let params = Params::from_serialize(&Options {
            q: "coworking".to_string(),
            page: Some(2),
            lang: None,
        })
        .unwrap();

        assert_eq!(params.len(), 2);
        assert_eq!(params.get("q"), Some("coworking"));
        assert_eq!(params.get("page"), Some("2"));
        assert_eq!(params.get("lang"), None);
    }

    #[test]
    fn test_from_serialize_rejects_scalars() {
        let result = Params::from_serialize(&42);
        assert!(matches!(result, Err(TwitterError::InvalidArgument(_))));
    }
}
