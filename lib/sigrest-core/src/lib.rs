//! Core types and traits for the sigrest REST client.
//!
//! This crate holds the request-construction pipeline, free of I/O:
//! - [`CaseConverter`] - snake/camel/Pascal case conversion
//! - [`QueryParams`], [`encode_query`], [`decode_query`] - canonical query codec
//! - [`Signer`] and [`Credentials`] - HMAC-SHA1 body signing
//! - [`Method`] and [`Verb`] - HTTP methods and canonical resource verbs
//! - [`Request`] and [`RequestBuilder`] - signed HTTP requests
//! - [`Response`], [`CallResult`], [`Reply`] - raw and normalized responses
//! - [`Error`] and [`Result`] - Error handling
//! - [`HttpClient`] - Transport trait
//! - [`StatusCode`] - HTTP status codes (re-exported from `http` crate)

mod body;
mod case;
mod client;
mod error;
mod method;
mod options;
pub mod prelude;
mod query;
mod request;
mod response;
mod signer;

pub use body::{ContentType, Payload, from_json, from_value, to_json};
pub use case::{
    CaseConverter, DEFAULT_SEPARATOR, camel_to_snake, pascal_to_snake, snake_to_camel,
    snake_to_pascal,
};
pub use client::HttpClient;
pub use error::{Error, Result};
pub use method::{Method, Verb};
pub use options::CallOptions;
pub use query::{QueryParams, decode as decode_query, encode as encode_query};
pub use request::{Request, RequestBuilder};
pub use response::{CallResult, Reply, Response};
pub use signer::{Credentials, SIGNATURE_PARAM, Signer, sign};

// Re-export http crate types for status codes and headers
pub use http::{StatusCode, header};
