//! Tower middleware layers for the sigrest transport.
//!
//! Layers are applied to [`HyperClient`](crate::HyperClient) through
//! [`HyperClientBuilder::layer`](crate::HyperClientBuilder::layer). Any
//! Tower layer whose service speaks [`Request`](crate::Request) and
//! [`Response`](crate::Response) can be plugged in.
//!
//! # Available Layers
//!
//! - [`LoggingLayer`] - Logs requests/responses using `tracing`
//!
//! # Example
//!
//! ```ignore
//! use sigrest::HyperClient;
//! use sigrest::middleware::LoggingLayer;
//!
//! let transport = HyperClient::builder()
//!     .layer(LoggingLayer::debug())
//!     .build();
//! ```

mod logging;

pub use logging::{LogLevel, Logging, LoggingLayer};

// Re-export tower types for convenience
pub use tower::{Layer, ServiceBuilder};
