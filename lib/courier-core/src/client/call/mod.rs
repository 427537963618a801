use std::sync::Arc;

use http::Method;

use super::completion::CompletionContext;
use super::{CallBody, CallHeaders, CallQuery};

mod builder;
mod execution;
mod response;

/// One HTTP call being configured, created by the [`Courier`](crate::Courier) methods.
///
/// A call is consumed when executed: either awaited, or handed a completion callback.
///
/// # Method Groups
///
/// ## Parameter Methods
/// - [`with_query(query)`](Self::with_query) - Set query parameters
/// - [`with_headers(headers)`](Self::with_headers) - Set request headers
/// - [`with_header(name, value)`](Self::with_header) - Add single header
///
/// ## Request Body Methods
/// - [`body(bytes)`](Self::body) - Set a raw (JSON) request body
/// - [`json(data)`](Self::json) - Encode a value as the JSON request body
/// - [`form(form)`](Self::form) - Set a multipart form request body
///
/// ## Execution
/// - [`decode::<T>()`](Self::decode) - Await the decoded JSON result
/// - `.await` - Await the outcome without decoding anything
/// - [`on_complete(callback)`](Self::on_complete) - Run in the background, decode,
///   and deliver the result on the completion context
/// - [`on_complete_empty(callback)`](Self::on_complete_empty) - Same without decoding
///
/// # Outcomes
///
/// - A status outside `200..=299` is a [`ClientError`](crate::ClientError) carrying
///   the status, the response body and the transport error if any.
/// - A successful status with an empty body (or a body that could not be read)
///   decodes to `Ok(None)`.
/// - Transport and JSON errors are delivered as they are.
#[derive(derive_more::Debug)]
pub struct CourierCall {
    pub(super) client: reqwest::Client,
    pub(super) base_url: Arc<str>,
    #[debug(skip)]
    pub(super) completion: CompletionContext,

    pub(super) method: Method,
    pub(super) path: String,
    pub(super) query: CallQuery,
    pub(super) headers: CallHeaders,

    #[debug(ignore)]
    pub(super) body: Option<CallBody>,
}

impl CourierCall {
    pub(in crate::client) fn build(
        client: reqwest::Client,
        base_url: Arc<str>,
        completion: CompletionContext,
        method: Method,
        path: String,
    ) -> Self {
        Self {
            client,
            base_url,
            completion,
            method,
            path,
            query: CallQuery::default(),
            headers: CallHeaders::default(),
            body: None,
        }
    }

    /// The HTTP method of this call.
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The path of this call, relative to the base URL and not yet encoded.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}
