//! # Courier Core
//!
//! A small typed HTTP client facade bound to a single base URL.
//!
//! - **[`Courier`]** - issues `GET`, `POST`, `PATCH` and `DELETE` calls, decoding JSON
//!   responses into the type the caller asks for
//! - **[`MultipartForm`]** - builds `multipart/form-data` bodies
//! - **[`CompletionContext`]** - the single context where completion callbacks run
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use courier_core::{CallQuery, Courier};
//! # use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! struct User {
//!     id: u32,
//!     name: String,
//! }
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), courier_core::CourierError> {
//! let courier = Courier::new("https://api.example.com/v1/");
//!
//! // Decode a JSON response, `None` when the server sends an empty body
//! let user: Option<User> = courier.get("users/42").decode().await?;
//!
//! // Query parameters are encoded in insertion order
//! let users: Option<Vec<User>> = courier
//!     .get("users")
//!     .with_query(CallQuery::new().add_param("name", "Ann Lee"))
//!     .decode()
//!     .await?;
//!
//! // Only check the outcome
//! courier.delete("users/42").await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Sending Bodies
//!
//! ```rust,no_run
//! use courier_core::{Courier, MultipartForm};
//! # use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct NewUser {
//!     name: String,
//! }
//!
//! # async fn example(avatar: Vec<u8>) -> Result<(), courier_core::CourierError> {
//! let courier = Courier::new("https://api.example.com/v1/");
//!
//! courier
//!     .post("users")
//!     .json(&NewUser { name: "Ann".to_string() })?
//!     .await?;
//!
//! let form = MultipartForm::new()
//!     .add_text_field("name", "Ann")
//!     .add_data_field("avatar", avatar);
//! courier.patch("users/42").form(form).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Callbacks
//!
//! [`CourierCall::on_complete`] runs the call in the background and hands the result
//! to a callback on the courier's [`CompletionContext`]. All callbacks of a context
//! run one at a time, in completion order, on the same consumer.
//!
//! ```rust,no_run
//! use courier_core::{CompletionContext, Courier};
//!
//! # async fn example() {
//! let (context, mut completion_loop) = CompletionContext::manual();
//! let courier = Courier::builder()
//!     .with_base_url("https://api.example.com/v1/")
//!     .with_completion_context(context)
//!     .build();
//!
//! courier.delete("users/42").on_complete_empty(|result| {
//!     if let Err(error) = result {
//!         eprintln!("delete failed: {error}");
//!     }
//! });
//!
//! // later, from the loop owning the context
//! completion_loop.run_pending();
//! # }
//! ```
//!
//! ## Errors
//!
//! Failures are reported as [`CourierError`]:
//! - a status outside `200..=299` is a [`ClientError`] with the status code, the message
//!   [`STATUS_ERROR_MESSAGE`] and the raw response body
//! - a URL that cannot be built is a [`ClientError`] with status `404` and the message
//!   [`INVALID_URL_MESSAGE`]
//! - transport and JSON decoding errors are passed through

mod client;

// Public API - only expose user-facing types and functions
pub use self::client::{
    CallBody, CallHeaders, CallQuery, ClientError, CompletionContext, CompletionLoop, Courier,
    CourierBuilder, CourierCall, CourierError, DEFAULT_TIMEOUT, INVALID_URL_MESSAGE,
    InvalidBaseUrl, MultipartForm, STATUS_ERROR_MESSAGE, sniff_mime_type, validate_base_url,
};
