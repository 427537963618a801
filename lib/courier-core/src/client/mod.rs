use std::sync::Arc;

use http::Method;

mod builder;
pub use self::builder::{CourierBuilder, DEFAULT_TIMEOUT, validate_base_url};

mod call;
pub use self::call::CourierCall;

mod completion;
pub use self::completion::{CompletionContext, CompletionLoop};

mod error;
pub use self::error::{
    ClientError, CourierError, INVALID_URL_MESSAGE, InvalidBaseUrl, STATUS_ERROR_MESSAGE,
};

mod form;
pub use self::form::MultipartForm;

mod parameters;
pub use self::parameters::{CallBody, CallHeaders, CallQuery};

mod path;

mod sniff;
pub use self::sniff::sniff_mime_type;

/// Typed HTTP client bound to a single base URL.
///
/// Every call path is appended to the base URL. Responses are decoded from JSON
/// into the type the caller asks for, and failures are reported as [`CourierError`].
///
/// Cloning a `Courier` is cheap: clones share the connection pool and the
/// completion context.
///
/// # Example
///
/// ```rust,no_run
/// use courier_core::Courier;
/// # use serde::Deserialize;
///
/// #[derive(Debug, Deserialize)]
/// struct User {
///     id: u32,
///     name: String,
/// }
///
/// # async fn example() -> Result<(), courier_core::CourierError> {
/// let courier = Courier::new("https://api.example.com/");
///
/// let user: Option<User> = courier.get("users/42").decode().await?;
/// courier.delete("users/42").await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Courier {
    client: reqwest::Client,
    base_url: Arc<str>,
    completion: CompletionContext,
}

// Create
impl Courier {
    /// Creates a `Courier` with the default configuration.
    ///
    /// # Panics
    ///
    /// Panics if `base_url` does not start with `http://` or `https://`,
    /// or does not end with `/`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::builder().with_base_url(base_url).build()
    }

    /// Starts the configuration of a `Courier`.
    #[must_use]
    pub fn builder() -> CourierBuilder {
        CourierBuilder::default()
    }

    /// The base URL, as given.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The context where completion callbacks of this courier are delivered.
    #[must_use]
    pub fn completion_context(&self) -> &CompletionContext {
        &self.completion
    }
}

// Calls
impl Courier {
    /// Starts a call with any HTTP method.
    ///
    /// `path` is relative to the base URL, without a leading `/`; it is percent-encoded
    /// when the call is sent.
    #[must_use]
    pub fn call(&self, method: Method, path: impl Into<String>) -> CourierCall {
        CourierCall::build(
            self.client.clone(),
            Arc::clone(&self.base_url),
            self.completion.clone(),
            method,
            path.into(),
        )
    }

    /// Starts a `GET` call.
    #[must_use]
    pub fn get(&self, path: impl Into<String>) -> CourierCall {
        self.call(Method::GET, path)
    }

    /// Starts a `POST` call.
    #[must_use]
    pub fn post(&self, path: impl Into<String>) -> CourierCall {
        self.call(Method::POST, path)
    }

    /// Starts a `PATCH` call.
    #[must_use]
    pub fn patch(&self, path: impl Into<String>) -> CourierCall {
        self.call(Method::PATCH, path)
    }

    /// Starts a `DELETE` call.
    #[must_use]
    pub fn delete(&self, path: impl Into<String>) -> CourierCall {
        self.call(Method::DELETE, path)
    }
}
