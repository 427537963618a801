//! Query parameters for a call.
//!
//! Values are rendered with their [`Display`] implementation. Spaces in values
//! become `+` before the query string is percent-encoded, giving the classic
//! form-style encoding: `?search=hello+world`.

use std::fmt::Display;

use indexmap::IndexMap;

/// A collection of query parameters, rendered in insertion order.
///
/// # Example
///
/// ```rust
/// use courier_core::CallQuery;
///
/// let query = CallQuery::new()
///     .add_param("search", "hello world")
///     .add_param("page", 2)
///     .add_param("active", true);
/// assert_eq!(query.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallQuery {
    params: IndexMap<String, String>,
}

impl CallQuery {
    /// Creates a new empty query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter; a later value for the same name replaces the earlier one.
    #[must_use]
    pub fn add_param(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.params.insert(name.into(), value.to_string());
        self
    }

    /// Checks if the query has no parameter.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// The query suffix before percent-encoding, `?` included.
    ///
    /// Only values have their spaces replaced, names are kept as is.
    pub(in crate::client) fn to_raw_query(&self) -> Option<String> {
        if self.params.is_empty() {
            return None;
        }

        let pairs = self
            .params
            .iter()
            .map(|(name, value)| format!("{name}={}", value.replace(' ', "+")))
            .collect::<Vec<_>>()
            .join("&");

        Some(format!("?{pairs}"))
    }
}

impl<K, V> FromIterator<(K, V)> for CallQuery
where
    K: Into<String>,
    V: Display,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |query, (name, value)| query.add_param(name, value))
    }
}
