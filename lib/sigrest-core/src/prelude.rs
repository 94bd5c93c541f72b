//! Prelude module for convenient imports.
//!
//! ```ignore
//! use sigrest_core::prelude::*;
//! ```

pub use crate::{
    CallOptions, CallResult, Credentials, Error, HttpClient, Method, Payload, QueryParams, Reply,
    Request, RequestBuilder, Response, Result, Verb,
};
