use http::header::HeaderValue;
use serde::Serialize;

use crate::client::error::CourierError;
use crate::client::form::MultipartForm;

/// Represents the body of an HTTP request.
///
/// Raw bodies are sent as `application/json`; multipart forms carry their own
/// `multipart/form-data; boundary=...` content type.
#[derive(Clone, derive_more::Debug)]
pub enum CallBody {
    /// Bytes sent as is, typically already encoded JSON.
    Raw(#[debug("{} bytes", _0.len())] Vec<u8>),

    /// A multipart form, closed when the request is built.
    Form(MultipartForm),
}

impl CallBody {
    /// Creates a JSON body from a serializable type.
    ///
    /// # Errors
    ///
    /// Returns [`CourierError::Serialization`] if `serde_json` cannot encode the value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use courier_core::CallBody;
    /// # use serde::Serialize;
    /// # fn example() -> Result<(), courier_core::CourierError> {
    /// #[derive(Serialize)]
    /// struct User {
    ///     name: String,
    /// }
    ///
    /// let body = CallBody::json(&User { name: "Ann".to_string() })?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn json<T>(value: &T) -> Result<Self, CourierError>
    where
        T: Serialize + ?Sized,
    {
        let data = serde_json::to_vec(value).map_err(CourierError::Serialization)?;
        Ok(Self::Raw(data))
    }

    /// Creates a raw body.
    pub fn raw(data: impl Into<Vec<u8>>) -> Self {
        Self::Raw(data.into())
    }

    /// The `Content-Type` replacing the JSON default, only set for multipart forms.
    pub(in crate::client) fn form_content_type(&self) -> Result<Option<HeaderValue>, CourierError> {
        match self {
            Self::Raw(_) => Ok(None),
            Self::Form(form) => Ok(Some(HeaderValue::from_str(&form.content_type())?)),
        }
    }

    /// The bytes to send; a form gets its closing delimiter here.
    pub(in crate::client) fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Raw(data) => data,
            Self::Form(form) => form.into_body(),
        }
    }
}

impl From<MultipartForm> for CallBody {
    fn from(form: MultipartForm) -> Self {
        Self::Form(form)
    }
}

impl From<Vec<u8>> for CallBody {
    fn from(data: Vec<u8>) -> Self {
        Self::Raw(data)
    }
}
