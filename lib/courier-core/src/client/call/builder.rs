use std::fmt::Display;

use serde::Serialize;

use super::CourierCall;
use crate::client::{CallBody, CallHeaders, CallQuery, CourierError, MultipartForm};

impl CourierCall {
    // =============================================================================
    // Parameter Methods
    // =============================================================================

    /// Sets the query parameters, replacing any previous ones.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use courier_core::{CallQuery, Courier};
    ///
    /// let courier = Courier::new("https://api.example.com/");
    /// let call = courier
    ///     .get("users")
    ///     .with_query(CallQuery::new().add_param("name", "Ann Lee").add_param("page", 2));
    /// ```
    #[must_use]
    pub fn with_query(mut self, query: CallQuery) -> Self {
        self.query = query;
        self
    }

    /// Adds headers to the call, merged with the ones already set.
    ///
    /// These headers are appended to the request after its default `Content-Type`:
    /// giving a `Content-Type` here sends both values.
    #[must_use]
    pub fn with_headers(mut self, headers: CallHeaders) -> Self {
        self.headers = self.headers.merge(headers);
        self
    }

    /// Adds a single header.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use courier_core::Courier;
    ///
    /// let courier = Courier::new("https://api.example.com/");
    /// let call = courier
    ///     .delete("items/5")
    ///     .with_header("Authorization", "Bearer token123")
    ///     .with_header("X-Request-ID", 42);
    /// ```
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.headers = self.headers.add_header(name, value);
        self
    }

    // =============================================================================
    // Request Body Methods
    // =============================================================================

    /// Sets raw bytes as the request body, sent as `application/json`.
    #[must_use]
    pub fn body(mut self, data: impl Into<Vec<u8>>) -> Self {
        self.body = Some(CallBody::raw(data));
        self
    }

    /// Encodes `value` with `serde_json` and sets it as the request body.
    ///
    /// # Errors
    ///
    /// Returns [`CourierError::Serialization`] if the value cannot be encoded.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use courier_core::Courier;
    /// # use serde::Serialize;
    ///
    /// #[derive(Serialize)]
    /// struct NewUser {
    ///     name: String,
    /// }
    ///
    /// # fn example() -> Result<(), courier_core::CourierError> {
    /// let courier = Courier::new("https://api.example.com/");
    /// let call = courier.post("users").json(&NewUser { name: "Ann".to_string() })?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn json<T>(mut self, value: &T) -> Result<Self, CourierError>
    where
        T: Serialize + ?Sized,
    {
        self.body = Some(CallBody::json(value)?);
        Ok(self)
    }

    /// Sets a multipart form as the request body.
    ///
    /// The request then announces `multipart/form-data; boundary=...` instead of JSON.
    #[must_use]
    pub fn form(mut self, form: MultipartForm) -> Self {
        self.body = Some(CallBody::from(form));
        self
    }
}
