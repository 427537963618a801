use std::error::Error;

use bytes::Bytes;
use http::StatusCode;

/// Message carried by a [`ClientError`] for a non-success HTTP status.
pub const STATUS_ERROR_MESSAGE: &str = "An error occurred.";

/// Message carried by a [`ClientError`] when no valid URL can be built for a call.
pub const INVALID_URL_MESSAGE: &str = "Invalid URL.";

/// Errors delivered for a call made through a [`Courier`](crate::Courier).
///
/// Transport and decoding failures are reported as the underlying library error,
/// without being folded into a [`ClientError`].
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum CourierError {
    /// The request could not be built, or the server answered outside `200..=299`.
    Client(ClientError),

    /// HTTP transport error from the underlying reqwest library.
    ///
    /// Occurs when no response is available: connection refused, timeouts, TLS issues.
    Transport(reqwest::Error),

    /// The response body is not valid JSON for the requested type.
    #[display("Failed to decode JSON at '{path}': {error}")]
    #[from(skip)]
    Decode {
        /// Location in the document where decoding failed.
        path: String,
        /// The underlying JSON error.
        #[error(source)]
        error: serde_json::Error,
    },

    /// Invalid HTTP header name supplied by the caller.
    InvalidHeaderName(http::header::InvalidHeaderName),

    /// Invalid HTTP header value supplied by the caller.
    InvalidHeaderValue(http::header::InvalidHeaderValue),

    /// A value could not be encoded as a JSON request body.
    #[display("Failed to encode JSON body: {_0}")]
    #[from(skip)]
    Serialization(serde_json::Error),
}

impl CourierError {
    /// The HTTP status code attached to this error, if any.
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Client(error) => Some(error.status_code()),
            Self::Transport(error) => error.status().map(|status| status.as_u16()),
            _ => None,
        }
    }
}

/// A structured failure for a call: the status code, a short message,
/// the raw response body if one was received, and the transport error behind it if any.
///
/// Invalid request URLs are reported with status code `404`, like a missing resource.
#[derive(derive_more::Debug, derive_more::Display)]
#[display("{message} (status code {status_code})")]
pub struct ClientError {
    status_code: u16,
    message: String,
    #[debug("{:?}", data.as_ref().map(|data| String::from_utf8_lossy(data)))]
    data: Option<Bytes>,
    cause: Option<reqwest::Error>,
}

impl ClientError {
    pub(in crate::client) fn invalid_url() -> Self {
        Self {
            status_code: StatusCode::NOT_FOUND.as_u16(),
            message: INVALID_URL_MESSAGE.to_string(),
            data: None,
            cause: None,
        }
    }

    pub(in crate::client) fn unexpected_status(
        status: StatusCode,
        data: Option<Bytes>,
        cause: Option<reqwest::Error>,
    ) -> Self {
        Self {
            status_code: status.as_u16(),
            message: STATUS_ERROR_MESSAGE.to_string(),
            data,
            cause,
        }
    }

    /// The HTTP status code.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    /// A short human readable description.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The raw response body, when the server sent one.
    #[must_use]
    pub fn data(&self) -> Option<&Bytes> {
        self.data.as_ref()
    }

    /// The transport error reported along with the response, if any.
    #[must_use]
    pub fn cause(&self) -> Option<&reqwest::Error> {
        self.cause.as_ref()
    }
}

impl Error for ClientError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_ref().map(|cause| cause as &(dyn Error + 'static))
    }
}

/// The base URL given to a [`Courier`](crate::Courier) breaks its invariants.
///
/// This is a programming error: construction panics with it.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Error, derive_more::Display)]
pub enum InvalidBaseUrl {
    /// The URL does not start with `http://` or `https://`.
    #[display("Courier url must start in https:// or http://, got {url:?}")]
    MissingScheme {
        /// The rejected URL.
        url: String,
    },

    /// The URL does not end with `/`.
    #[display("Courier url must end in /, got {url:?}")]
    MissingTrailingSlash {
        /// The rejected URL.
        url: String,
    },
}
