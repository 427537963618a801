use std::sync::Arc;
use std::time::Duration;

use super::Courier;
use super::completion::CompletionContext;
use super::error::InvalidBaseUrl;

/// Default timeout for both the request and the whole exchange.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Builder for creating [`Courier`] instances.
///
/// # Default Configuration
///
/// - **Base URL**: none, it must be set with [`with_base_url`](Self::with_base_url)
/// - **Request timeout**: 30 seconds without receiving data
/// - **Resource timeout**: 30 seconds for the whole exchange
/// - **Completion context**: [`CompletionContext::main()`]
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
///
/// use courier_core::{CompletionContext, Courier};
///
/// let courier = Courier::builder()
///     .with_base_url("https://api.example.com/v1/")
///     .with_request_timeout(Duration::from_secs(10))
///     .with_resource_timeout(Duration::from_secs(60))
///     .with_completion_context(CompletionContext::spawn())
///     .build();
///
/// assert_eq!(courier.base_url(), "https://api.example.com/v1/");
/// ```
#[derive(Debug, Clone)]
pub struct CourierBuilder {
    base_url: String,
    request_timeout: Duration,
    resource_timeout: Duration,
    client: Option<reqwest::Client>,
    completion: Option<CompletionContext>,
}

impl CourierBuilder {
    /// Builds the [`Courier`].
    ///
    /// # Panics
    ///
    /// Panics with an [`InvalidBaseUrl`] description if the base URL does not start
    /// with `http://` or `https://`, or does not end with `/`.
    /// Also panics if the HTTP transport cannot be initialised.
    /// Both are programming errors, not runtime conditions.
    #[must_use]
    pub fn build(self) -> Courier {
        let Self {
            base_url,
            request_timeout,
            resource_timeout,
            client,
            completion,
        } = self;

        if let Err(error) = validate_base_url(&base_url) {
            panic!("{error}");
        }

        let client = client.unwrap_or_else(|| {
            reqwest::Client::builder()
                .read_timeout(request_timeout)
                .timeout(resource_timeout)
                .build()
                .unwrap_or_else(|error| panic!("HTTP transport cannot be initialised: {error}"))
        });

        Courier {
            client,
            base_url: Arc::from(base_url),
            completion: completion.unwrap_or_else(CompletionContext::main),
        }
    }

    /// Sets the base URL every call path is appended to.
    ///
    /// It must start with `http://` or `https://` and end with `/`;
    /// this is checked by [`build`](Self::build).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets how long to wait for data before a request fails.
    ///
    /// Ignored when a client is given with [`with_client`](Self::with_client).
    #[must_use]
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Sets how long a whole exchange may take, from connection to the end of the body.
    ///
    /// Ignored when a client is given with [`with_client`](Self::with_client).
    #[must_use]
    pub fn with_resource_timeout(mut self, timeout: Duration) -> Self {
        self.resource_timeout = timeout;
        self
    }

    /// Uses a pre-configured reqwest client as the transport.
    #[must_use]
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Sets where completion callbacks are delivered.
    #[must_use]
    pub fn with_completion_context(mut self, completion: CompletionContext) -> Self {
        self.completion = Some(completion);
        self
    }
}

impl Default for CourierBuilder {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            request_timeout: DEFAULT_TIMEOUT,
            resource_timeout: DEFAULT_TIMEOUT,
            client: None,
            completion: None,
        }
    }
}

/// Checks the base URL of a [`Courier`].
///
/// # Errors
///
/// Returns [`InvalidBaseUrl`] when the URL has no `http://` or `https://` prefix,
/// or no trailing `/`.
pub fn validate_base_url(url: &str) -> Result<(), InvalidBaseUrl> {
    if !url.starts_with("https://") && !url.starts_with("http://") {
        return Err(InvalidBaseUrl::MissingScheme {
            url: url.to_string(),
        });
    }
    if !url.ends_with('/') {
        return Err(InvalidBaseUrl::MissingTrailingSlash {
            url: url.to_string(),
        });
    }
    Ok(())
}
