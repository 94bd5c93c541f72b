//! Signed REST API client.
//!
//! Calls a resource-oriented HTTP API with HMAC-signed requests and returns
//! every outcome in the same `(status, body)` shape.
//!
//! # Example
//!
//! ```ignore
//! use sigrest::prelude::*;
//!
//! let config = ClientConfig::builder("my-token", "cafebabe", "https://shop.example.com")
//!     .throw_on_error(true)
//!     .build()?;
//! let client = ApiClient::new(config);
//!
//! // GET https://shop.example.com/api/products?limit=10&sign=...
//! let reply = client.list("products", Params::new().query("limit", "10")).await?;
//!
//! // Same call shape, operation chosen by name
//! let reply = client.invoke("listAttributeAvs", Args::new()).await?;
//! if let Some(result) = reply.into_normalized() {
//!     let (status, body) = result.into_parts();
//! }
//! ```
//!
//! The request pipeline (case conversion, query codec, signing, request
//! building) lives in [`sigrest_core`] and is re-exported here.

mod api_client;
mod client;
mod config;
mod connector;
pub mod dispatch;
pub mod middleware;
pub mod normalize;
pub mod prelude;

pub use api_client::{ApiClient, Params};
pub use client::{BoxedService, HyperClient, HyperClientBuilder, ServiceFuture};
pub use config::{
    ClientConfig, ClientConfigBuilder, DEFAULT_API_ROUTE, TransportConfig, TransportConfigBuilder,
    env,
};
pub use dispatch::{Args, Operation};

// Re-export tower for middleware composition
pub use tower;

// Re-export core types
pub use sigrest_core::{
    CallOptions, CallResult, CaseConverter, ContentType, Credentials, DEFAULT_SEPARATOR, Error,
    HttpClient, Method, Payload, QueryParams, Reply, Request, RequestBuilder, Response, Result,
    SIGNATURE_PARAM, Signer, Verb, camel_to_snake, decode_query, encode_query, from_json,
    pascal_to_snake, sign, snake_to_camel, snake_to_pascal, to_json,
};

// Re-export http types for status codes and headers
pub use sigrest_core::{StatusCode, header};
