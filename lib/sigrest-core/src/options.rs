//! Per-call options.

use std::time::Duration;

/// Options attached to a single call.
///
/// They travel with the [`Request`](crate::Request) so the transport can
/// honor them; the core itself never retries or times out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallOptions {
    /// Return the raw transport response instead of a normalized result.
    pub handle_response: bool,
    /// Override of the transport's request timeout.
    pub timeout: Option<Duration>,
}

impl CallOptions {
    /// Default options.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            handle_response: false,
            timeout: None,
        }
    }

    /// Ask for the raw response.
    #[must_use]
    pub const fn handle_response(mut self, handle: bool) -> Self {
        self.handle_response = handle;
        self
    }

    /// Override the request timeout for this call.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
