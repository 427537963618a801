use std::fmt::Display;

use http::header::{HeaderName, HeaderValue};
use indexmap::IndexMap;

use crate::client::error::CourierError;

/// Represents HTTP headers supplied by the caller for a call.
///
/// Names are kept as given, in insertion order. They are appended to the
/// request after the default `Content-Type`, never replacing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallHeaders {
    headers: IndexMap<String, String>,
}

impl CallHeaders {
    /// Creates a new empty `CallHeaders` instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a header; a later value for the same name replaces the earlier one.
    ///
    /// # Example
    ///
    /// ```rust
    /// use courier_core::CallHeaders;
    ///
    /// let headers = CallHeaders::new()
    ///     .add_header("Authorization", "Bearer token123")
    ///     .add_header("X-Rate-Limit", 1000);
    /// assert_eq!(headers.len(), 2);
    /// ```
    #[must_use]
    pub fn add_header(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.headers.insert(name.into(), value.to_string());
        self
    }

    /// Merges another `CallHeaders` instance into this one.
    ///
    /// Headers from the other instance override headers with the same name in this instance.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.headers.extend(other.headers);
        self
    }

    /// Checks if the headers collection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Returns the number of headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// Iterates over the headers in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.headers
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Converts headers to HTTP header format for reqwest.
    pub(in crate::client) fn to_http_headers(
        &self,
    ) -> Result<Vec<(HeaderName, HeaderValue)>, CourierError> {
        let mut result = Vec::with_capacity(self.headers.len());

        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes())?;
            let value = HeaderValue::from_str(value)?;
            result.push((name, value));
        }

        Ok(result)
    }
}

impl<K, V> FromIterator<(K, V)> for CallHeaders
where
    K: Into<String>,
    V: Display,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |headers, (name, value)| {
                headers.add_header(name, value)
            })
    }
}
