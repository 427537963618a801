use std::future::{Future, IntoFuture};
use std::pin::Pin;

use headers::{ContentType, HeaderMapExt};
use http::Method;
use http::header::CONTENT_TYPE;
use reqwest::{Body, Request};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::CourierCall;
use super::response::Received;
use crate::client::error::{ClientError, CourierError};
use crate::client::path::build_url;
use crate::client::{CallBody, CallHeaders};

impl CourierCall {
    /// The URL this call targets: base URL, encoded path and encoded query.
    ///
    /// # Errors
    ///
    /// Returns the `404` "Invalid URL." [`ClientError`] if no valid URL can be built.
    ///
    /// # Example
    ///
    /// ```rust
    /// use courier_core::{CallQuery, Courier};
    ///
    /// let courier = Courier::new("https://api.example.com/");
    /// let call = courier
    ///     .get("my files")
    ///     .with_query(CallQuery::new().add_param("q", "a b"));
    ///
    /// let url = call.url()?;
    /// assert_eq!(url.as_str(), "https://api.example.com/my%20files?q=a+b");
    /// # Ok::<(), courier_core::ClientError>(())
    /// ```
    pub fn url(&self) -> Result<Url, ClientError> {
        build_url(&self.base_url, &self.path, &self.query)
    }

    /// Sends the request and decodes a successful JSON response as `T`.
    ///
    /// A successful response with an empty body is `Ok(None)`.
    ///
    /// # Errors
    ///
    /// - [`CourierError::Client`] for an invalid URL or a status outside `200..=299`
    /// - [`CourierError::Transport`] when no response was received
    /// - [`CourierError::Decode`] when the body is not valid JSON for `T`
    /// - [`CourierError::InvalidHeaderName`] / [`CourierError::InvalidHeaderValue`]
    ///   for unusable caller headers
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use courier_core::Courier;
    /// # use serde::Deserialize;
    ///
    /// #[derive(Deserialize)]
    /// struct User {
    ///     id: u32,
    ///     name: String,
    /// }
    ///
    /// # async fn example() -> Result<(), courier_core::CourierError> {
    /// let courier = Courier::new("https://api.example.com/");
    /// let user: Option<User> = courier.get("users/42").decode().await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn decode<T>(self) -> Result<Option<T>, CourierError>
    where
        T: DeserializeOwned,
    {
        self.exchange().await?.into_json()
    }

    /// Runs the call in the background, decodes its response as `T`,
    /// then hands the result to `callback` on the completion context.
    ///
    /// The callback is always invoked exactly once, unless the completion context is closed.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a tokio runtime.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use courier_core::Courier;
    /// # use serde::Deserialize;
    /// # #[derive(Debug, Deserialize)]
    /// # struct User { id: u32 }
    ///
    /// # async fn example() {
    /// let courier = Courier::new("https://api.example.com/");
    /// courier.get("users/42").on_complete(|result: Result<Option<User>, _>| {
    ///     println!("got {result:?}");
    /// });
    /// # }
    /// ```
    pub fn on_complete<T, F>(self, callback: F)
    where
        T: DeserializeOwned + Send + 'static,
        F: FnOnce(Result<Option<T>, CourierError>) + Send + 'static,
    {
        let completion = self.completion.clone();
        tokio::spawn(async move {
            let result = self.decode::<T>().await;
            completion.deliver(move || callback(result));
        });
    }

    /// Runs the call in the background, then hands its outcome to `callback`
    /// on the completion context.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a tokio runtime.
    pub fn on_complete_empty<F>(self, callback: F)
    where
        F: FnOnce(Result<(), CourierError>) + Send + 'static,
    {
        let completion = self.completion.clone();
        tokio::spawn(async move {
            let result = self.await;
            completion.deliver(move || callback(result));
        });
    }

    async fn exchange(self) -> Result<Received, CourierError> {
        let Self {
            client,
            base_url,
            completion: _,
            method,
            path,
            query,
            headers,
            body,
        } = self;

        let url = build_url(&base_url, &path, &query)?;
        let request = Self::build_request(method, url, &headers, body)?;

        debug!(?request, "sending...");
        let response = client.execute(request).await?;
        debug!(?response, "...receiving");

        let status = response.status();
        let body = response.bytes().await;
        Ok(Received { status, body })
    }

    pub(super) fn build_request(
        method: Method,
        url: Url,
        headers: &CallHeaders,
        body: Option<CallBody>,
    ) -> Result<Request, CourierError> {
        let mut request = Request::new(method, url);
        let req_headers = request.headers_mut();

        match body.as_ref().map(CallBody::form_content_type).transpose()?.flatten() {
            Some(form_content_type) => {
                req_headers.insert(CONTENT_TYPE, form_content_type);
            }
            None => req_headers.typed_insert(ContentType::json()),
        }

        // Caller headers come after the default content type, without replacing it
        for (name, value) in headers.to_http_headers()? {
            req_headers.append(name, value);
        }

        if let Some(body) = body {
            *request.body_mut() = Some(Body::from(body.into_bytes()));
        }

        Ok(request)
    }
}

/// Awaiting a call sends it and checks its outcome, ignoring the response body.
///
/// ```rust,no_run
/// # async fn example() -> Result<(), courier_core::CourierError> {
/// let courier = courier_core::Courier::new("https://api.example.com/");
/// courier.delete("items/5").await?;
/// # Ok(())
/// # }
/// ```
impl IntoFuture for CourierCall {
    type Output = Result<(), CourierError>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move { self.exchange().await?.into_empty() })
    }
}
