//! Transport trait.
//!
//! [`HttpClient`] is the injection point between request construction and
//! the network. The `sigrest` crate ships a hyper-based implementation;
//! tests and applications may provide their own.

use std::future::Future;
use std::sync::Arc;

use crate::{Request, Response, Result};

/// Core HTTP transport trait.
///
/// One call to [`HttpClient::execute`] is one attempt on the wire.
/// Implementations return non-2xx responses as `Ok`; status handling is the
/// caller's concern.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
///
/// use sigrest_core::{HttpClient, Request, Response, Result};
///
/// struct AlwaysEmpty;
///
/// impl HttpClient for AlwaysEmpty {
///     async fn execute(&self, _request: Request) -> Result<Response> {
///         Ok(Response::new(204, HashMap::new(), ""))
///     }
/// }
/// ```
pub trait HttpClient: Send + Sync {
    /// Execute an HTTP request and return the response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails for any reason:
    /// - Network errors
    /// - TLS errors
    /// - Timeouts
    fn execute(&self, request: Request) -> impl Future<Output = Result<Response>> + Send;
}

impl<T: HttpClient> HttpClient for Arc<T> {
    fn execute(&self, request: Request) -> impl Future<Output = Result<Response>> + Send {
        T::execute(self, request)
    }
}

impl<T: HttpClient> HttpClient for &T {
    fn execute(&self, request: Request) -> impl Future<Output = Result<Response>> + Send {
        T::execute(self, request)
    }
}
