//! Response normalization.
//!
//! Turns a transport outcome into a [`CallResult`]. Error statuses (4xx and
//! 5xx) become [`Error::Http`]. A body whose content type mentions `json` is
//! parsed; any other body is kept as a JSON string, and an empty body is
//! `null`. Recoverable failures either propagate or become
//! `{"error": "<message>"}`, depending on `throw_on_error`.

use serde_json::Value;
use sigrest_core::{CallResult, ContentType, Error, Response, Result, StatusCode};
use tracing::warn;

/// Status reported when the transport produced no response.
pub const NO_STATUS: u16 = 0;

/// Normalize a transport outcome.
///
/// # Errors
///
/// With `throw_on_error`, returns transport and decoding failures as is.
/// Errors that are not recoverable (see [`Error::is_recoverable`]) are
/// always returned.
pub fn normalize(outcome: Result<Response>, throw_on_error: bool) -> Result<CallResult> {
    let (status, err) = match outcome {
        Ok(response) => {
            let status = response.status();
            match decode(response) {
                Ok(result) => return Ok(result),
                Err(err) => (status, err),
            }
        }
        Err(err) => (err.status().unwrap_or(NO_STATUS), err),
    };

    if throw_on_error || !err.is_recoverable() {
        return Err(err);
    }

    warn!(status, error = %err, "recovered call failure into an error body");
    Ok(CallResult::error(status, err.to_string()))
}

fn decode(response: Response) -> Result<CallResult> {
    let status = response.status();

    if status >= 400 {
        let reason = StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or("Unknown Status");
        return Err(Error::http_with_body(status, reason, response.into_body()));
    }

    let is_json = response.content_type().is_some_and(ContentType::is_json);
    let body = response.into_body();

    let body = if body.is_empty() {
        Value::Null
    } else if is_json {
        sigrest_core::from_json(&body)?
    } else {
        Value::String(String::from_utf8_lossy(&body).into_owned())
    };

    Ok(CallResult::new(status, body))
}
