//! HTTP response handling.
//!
//! - [`Response`] is what the transport hands back: status, headers, bytes.
//! - [`CallResult`] is the normalized `(status, body)` shape every call
//!   produces.
//! - [`Reply`] is either of them, depending on
//!   [`CallOptions::handle_response`](crate::CallOptions::handle_response).

use std::collections::HashMap;

use bytes::Bytes;
use serde_json::{Value, json};

use crate::Result;

// ============================================================================
// Raw Response
// ============================================================================

/// HTTP response with status, headers, and body.
#[derive(Debug, Clone)]
pub struct Response {
    status: u16,
    headers: HashMap<String, String>,
    body: Bytes,
}

impl Response {
    /// Creates a new response.
    #[must_use]
    pub fn new(status: u16, headers: HashMap<String, String>, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value by name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// The `Content-Type` header.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.header("Content-Type")
    }

    /// Response body.
    #[must_use]
    pub const fn body(&self) -> &Bytes {
        &self.body
    }

    /// Consume into body.
    #[must_use]
    pub fn into_body(self) -> Bytes {
        self.body
    }

    /// Consume into (status, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (u16, HashMap<String, String>, Bytes) {
        (self.status, self.headers, self.body)
    }

    /// Status is 2xx.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Status is 4xx.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status >= 400 && self.status < 500
    }

    /// Status is 5xx.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status >= 500 && self.status < 600
    }

    /// Deserialize the response body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        crate::from_json(&self.body)
    }

    /// Get the response body as text.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid UTF-8.
    pub fn text(&self) -> std::result::Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.to_vec())
    }
}

// ============================================================================
// Normalized Result
// ============================================================================

/// Normalized outcome of a call: a status code and a JSON body.
///
/// When a failure was recovered the body is `{"error": "<message>"}` and
/// [`CallResult::error_message`] returns the message.
#[derive(Debug, Clone, PartialEq)]
pub struct CallResult {
    status: u16,
    body: Value,
    failed: bool,
}

impl CallResult {
    /// A successfully decoded body.
    #[must_use]
    pub const fn new(status: u16, body: Value) -> Self {
        Self {
            status,
            body,
            failed: false,
        }
    }

    /// A recovered failure.
    #[must_use]
    pub fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "error": message.into() }),
            failed: true,
        }
    }

    /// HTTP status code, `0` when the transport produced none.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// The body.
    #[must_use]
    pub const fn body(&self) -> &Value {
        &self.body
    }

    /// Returns `true` if this holds a recovered failure.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.failed
    }

    /// The recovered failure message.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        if self.failed {
            self.body.get("error").and_then(Value::as_str)
        } else {
            None
        }
    }

    /// Decode the body into a typed value.
    ///
    /// # Errors
    ///
    /// Returns an error if the body does not match `T`.
    pub fn json<T: serde::de::DeserializeOwned>(self) -> Result<T> {
        crate::from_value(self.body)
    }

    /// Consume into `(status, body)`.
    #[must_use]
    pub fn into_parts(self) -> (u16, Value) {
        (self.status, self.body)
    }
}

/// What a call returns: the normalized result, or the untouched transport
/// response when `handle_response` was requested.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Normalized `(status, body)`.
    Normalized(CallResult),
    /// Raw transport response.
    Raw(Response),
}

impl Reply {
    /// HTTP status code of either variant.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::Normalized(result) => result.status(),
            Self::Raw(response) => response.status(),
        }
    }

    /// The normalized result, if any.
    #[must_use]
    pub fn into_normalized(self) -> Option<CallResult> {
        match self {
            Self::Normalized(result) => Some(result),
            Self::Raw(_) => None,
        }
    }

    /// The raw response, if any.
    #[must_use]
    pub fn into_raw(self) -> Option<Response> {
        match self {
            Self::Raw(response) => Some(response),
            Self::Normalized(_) => None,
        }
    }
}

impl From<CallResult> for Reply {
    fn from(result: CallResult) -> Self {
        Self::Normalized(result)
    }
}

impl From<Response> for Reply {
    fn from(response: Response) -> Self {
        Self::Raw(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_basic() {
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());

        let response = Response::new(200, headers, r#"{"id":1}"#);

        assert_eq!(response.status(), 200);
        assert_eq!(response.content_type(), Some("application/json"));
        assert_eq!(response.header("Content-Type"), Some("application/json"));
        assert!(response.is_success());
        assert!(!response.is_client_error());
        assert!(!response.is_server_error());
    }

    #[test]
    fn response_status_checks() {
        assert!(Response::new(404, HashMap::new(), Bytes::new()).is_client_error());
        assert!(Response::new(500, HashMap::new(), Bytes::new()).is_server_error());
        assert!(!Response::new(302, HashMap::new(), Bytes::new()).is_success());
    }

    #[test]
    fn response_json_and_text() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct Product {
            id: u64,
        }

        let response = Response::new(200, HashMap::new(), r#"{"id":1}"#);
        assert_eq!(response.json::<Product>().expect("json"), Product { id: 1 });
        assert_eq!(response.text().expect("text"), r#"{"id":1}"#);
    }

    #[test]
    fn call_result_success() {
        let result = CallResult::new(200, json!([{"id": 1}]));
        assert!(!result.is_error());
        assert_eq!(result.error_message(), None);
        assert_eq!(result.into_parts(), (200, json!([{"id": 1}])));
    }

    #[test]
    fn call_result_error_shape() {
        let result = CallResult::error(404, "HTTP error 404: Not Found");
        assert!(result.is_error());
        assert_eq!(result.status(), 404);
        assert_eq!(result.body(), &json!({"error": "HTTP error 404: Not Found"}));
        assert_eq!(result.error_message(), Some("HTTP error 404: Not Found"));
    }

    #[test]
    fn success_body_with_error_key_is_not_a_failure() {
        let result = CallResult::new(200, json!({"error": "none"}));
        assert_eq!(result.error_message(), None);
    }

    #[test]
    fn call_result_typed_body() {
        #[derive(Debug, PartialEq, serde::Deserialize)]
        struct Product {
            id: u64,
            reference: String,
        }

        let result = CallResult::new(200, json!({"id": 3, "reference": "TSHIRT-01"}));
        let product: Product = result.json().expect("decode");
        assert_eq!(
            product,
            Product {
                id: 3,
                reference: "TSHIRT-01".to_string()
            }
        );
    }

    #[test]
    fn reply_accessors() {
        let reply = Reply::from(CallResult::new(201, Value::Null));
        assert_eq!(reply.status(), 201);
        assert!(reply.clone().into_raw().is_none());
        assert!(reply.into_normalized().is_some());

        let reply = Reply::from(Response::new(204, HashMap::new(), Bytes::new()));
        assert_eq!(reply.status(), 204);
        assert!(reply.into_raw().is_some());
    }
}
