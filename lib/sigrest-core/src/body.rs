//! Body serialization utilities.

use bytes::Bytes;
use serde_json::Value;

use crate::Result;

/// Content type for request bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// JSON content type (`application/json`).
    Json,
    /// Plain text content type (`text/plain`).
    PlainText,
}

impl ContentType {
    /// Get the MIME type string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::PlainText => "text/plain",
        }
    }

    /// Returns `true` if a `Content-Type` header value denotes JSON,
    /// including structured suffixes such as `application/problem+json`.
    #[must_use]
    pub fn is_json(header_value: &str) -> bool {
        header_value.to_ascii_lowercase().contains("json")
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Request body: either bytes sent verbatim or a structured JSON value.
///
/// Strings are never re-encoded. [`Payload::json`] encodes a serializable
/// value once, up front; [`Payload::Json`] holds a `serde_json::Value` that is
/// encoded when the request is built.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Payload {
    /// No body (signed as the empty string).
    #[default]
    Empty,
    /// Pre-encoded body, sent as is.
    Raw(Bytes),
    /// Structured body, JSON-encoded when the request is built.
    Json(Value),
}

impl Payload {
    /// Encodes any serializable value as a JSON body.
    ///
    /// The value is serialized straight to bytes, so struct fields keep
    /// their declaration order on the wire.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be represented as JSON.
    pub fn json<T: serde::Serialize + ?Sized>(value: &T) -> Result<Self> {
        Ok(Self::Raw(to_json(value)?))
    }

    /// The exact bytes that will be sent and signed.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails.
    pub fn to_bytes(&self) -> Result<Bytes> {
        match self {
            Self::Empty => Ok(Bytes::new()),
            Self::Raw(bytes) => Ok(bytes.clone()),
            Self::Json(value) => to_json(value),
        }
    }
}

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Self::Raw(Bytes::copy_from_slice(value.as_bytes()))
    }
}

impl From<String> for Payload {
    fn from(value: String) -> Self {
        Self::Raw(Bytes::from(value))
    }
}

impl From<Bytes> for Payload {
    fn from(value: Bytes) -> Self {
        Self::Raw(value)
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

/// Serialize a value to JSON bytes.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Example
///
/// ```
/// use sigrest_core::to_json;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Product { reference: String }
///
/// let product = Product { reference: "TSHIRT-01".to_string() };
/// let bytes = to_json(&product).expect("serialize");
/// assert_eq!(bytes.as_ref(), br#"{"reference":"TSHIRT-01"}"#);
/// ```
pub fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<Bytes> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(Into::into)
}

/// Deserialize JSON bytes to a value with path-aware error messages.
///
/// # Errors
///
/// Returns an error if JSON deserialization fails, with the error message
/// including the path to the problematic field (e.g., "items[0].price").
pub fn from_json<T: serde::de::DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|e| {
        crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })
}

/// Deserialize an already parsed JSON value with path-aware error messages.
///
/// # Errors
///
/// Returns an error if the value does not match `T`.
pub fn from_value<T: serde::de::DeserializeOwned>(value: Value) -> Result<T> {
    serde_path_to_error::deserialize(value).map_err(|e| {
        crate::Error::json_deserialization(e.path().to_string(), e.inner().to_string())
    })
}
