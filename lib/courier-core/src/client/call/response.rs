use bytes::Bytes;
use http::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::client::error::{ClientError, CourierError};

/// What came back for a call that reached the server.
///
/// The body is read eagerly; a failure while reading it is kept alongside the status.
#[derive(Debug)]
pub(super) struct Received {
    pub(super) status: StatusCode,
    pub(super) body: Result<Bytes, reqwest::Error>,
}

impl Received {
    /// Fails with a [`ClientError`] for a status outside `200..=299`.
    fn check_status(self) -> Result<Result<Bytes, reqwest::Error>, CourierError> {
        let Self { status, body } = self;
        if status.is_success() {
            return Ok(body);
        }

        let (data, cause) = match body {
            Ok(data) => ((!data.is_empty()).then_some(data), None),
            Err(error) => (None, Some(error)),
        };
        Err(ClientError::unexpected_status(status, data, cause).into())
    }

    /// Decodes the body as JSON.
    ///
    /// An empty body, or one that could not be read, is `Ok(None)`.
    pub(super) fn into_json<T>(self) -> Result<Option<T>, CourierError>
    where
        T: DeserializeOwned,
    {
        let data = match self.check_status()? {
            Ok(data) => data,
            Err(error) => {
                warn!(%error, "failed to read response body");
                return Ok(None);
            }
        };
        if data.is_empty() {
            debug!("empty response body");
            return Ok(None);
        }

        decode_json(&data).map(Some)
    }

    /// Checks the outcome without looking at the body.
    pub(super) fn into_empty(self) -> Result<(), CourierError> {
        self.check_status()?.map_err(CourierError::Transport)?;
        Ok(())
    }
}

fn decode_json<T>(data: &[u8]) -> Result<T, CourierError>
where
    T: DeserializeOwned,
{
    let mut deserializer = serde_json::Deserializer::from_slice(data);
    let value = serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
        CourierError::Decode {
            path: err.path().to_string(),
            error: err.into_inner(),
        }
    })?;

    // trailing characters
    deserializer.end().map_err(|error| CourierError::Decode {
        path: ".".to_string(),
        error,
    })?;

    Ok(value)
}
