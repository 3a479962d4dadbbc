use reqwest::Response;

use crate::errors::{Error, RequestError, Result};

/// Convert non-2xx responses into a structured error that includes the server body.
///
/// If the status is successful (2xx), the original response is returned.
/// If the status is an error (4xx or 5xx), the response body is consumed
/// to create a `Error::Request(RequestError::Server)` and returned as an `Err`.
pub(crate) async fn check_http_status(response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status();
    let message = response_message(response).await;

    Err(Error::from(RequestError::Server { status, message }))
}

/// Body text of a failed response, or the canonical reason when the body is unreadable.
pub(crate) async fn response_message(response: Response) -> String {
    let status = response.status();
    response.text().await.unwrap_or_else(|_| {
        status
            .canonical_reason()
            .unwrap_or("Unknown Error")
            .to_string()
    })
}

/// Read the body as bytes and decode it as JSON, mapping decode failures to
/// [`RequestError::DecodeJson`].
pub(crate) async fn decode_json<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| {
        RequestError::DecodeJson {
            message: e.to_string(),
        }
        .into()
    })
}
