//! Prelude module for convenient imports.
//!
//! ```ignore
//! use sigrest::prelude::*;
//! ```

pub use crate::{
    ApiClient, Args, CallOptions, CallResult, ClientConfig, Error, HttpClient, HyperClient,
    Method, Params, Payload, QueryParams, Reply, Response, Result,
};
pub use serde::{Deserialize, Serialize};
