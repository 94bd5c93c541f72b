//! Client configuration types.
//!
//! - [`ClientConfig`]: who we talk to and how (credentials, base URL, API
//!   route, error policy, case separator). Immutable once built.
//! - [`TransportConfig`]: timeouts and pooling of the default
//!   [`HyperClient`](crate::HyperClient) transport.

use std::time::Duration;

use sigrest_core::{CaseConverter, Credentials, DEFAULT_SEPARATOR, Error, Result};

/// Default route prepended to resource names.
pub const DEFAULT_API_ROUTE: &str = "/api/";

/// Environment variable names read by [`ClientConfig::from_env`].
pub mod env {
    /// API token (required).
    pub const API_TOKEN: &str = "API_TOKEN";
    /// Hex-encoded signing key (required).
    pub const API_KEY: &str = "API_KEY";
    /// Base URL, e.g. `https://shop.example.com` (required).
    pub const API_BASE_URL: &str = "API_BASE_URL";
    /// API route, defaults to `/api/`.
    pub const API_BASE_ROUTE: &str = "API_BASE_ROUTE";
    /// `true`/`false`, defaults to `false`.
    pub const API_THROW_ON_ERROR: &str = "API_THROW_ON_ERROR";
    /// Single character, defaults to `-`.
    pub const API_SNAKE_SEPARATOR: &str = "API_SNAKE_SEPARATOR";
}

/// Configuration of an [`ApiClient`](crate::ApiClient).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    credentials: Credentials,
    base_url: String,
    base_api_route: String,
    throw_on_error: bool,
    case: CaseConverter,
}

impl ClientConfig {
    /// Start a configuration with the required settings.
    #[must_use]
    pub fn builder(
        api_token: impl Into<String>,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> ClientConfigBuilder {
        ClientConfigBuilder {
            api_token: api_token.into(),
            api_key: api_key.into(),
            base_url: base_url.into(),
            base_api_route: None,
            throw_on_error: None,
            separator: None,
        }
    }

    /// Build a configuration with default optional settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] if the API key is not valid hex.
    pub fn new(
        api_token: impl Into<String>,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self> {
        Self::builder(api_token, api_key, base_url).build()
    }

    /// Load the configuration from environment variables, see [`env`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a required variable is missing or a value
    /// is malformed, [`Error::InvalidKey`] for a non-hex key.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load the configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`ClientConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |name: &str| {
            lookup(name).ok_or_else(|| Error::config(format!("missing environment variable {name}")))
        };

        let mut builder = Self::builder(
            required(env::API_TOKEN)?,
            required(env::API_KEY)?,
            required(env::API_BASE_URL)?,
        );

        if let Some(route) = lookup(env::API_BASE_ROUTE) {
            builder = builder.base_api_route(route);
        }
        if let Some(flag) = lookup(env::API_THROW_ON_ERROR) {
            builder = builder.throw_on_error(parse_flag(env::API_THROW_ON_ERROR, &flag)?);
        }
        if let Some(separator) = lookup(env::API_SNAKE_SEPARATOR) {
            builder = builder.separator(parse_separator(&separator)?);
        }

        builder.build()
    }

    /// Token and signing key.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Base URL (scheme and host), concatenated as is.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Route prepended to resource names.
    #[must_use]
    pub fn base_api_route(&self) -> &str {
        &self.base_api_route
    }

    /// Whether recoverable failures are returned as errors instead of
    /// error-shaped bodies.
    #[must_use]
    pub const fn throw_on_error(&self) -> bool {
        self.throw_on_error
    }

    /// Case converter used to derive resource names.
    #[must_use]
    pub const fn case(&self) -> CaseConverter {
        self.case
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    api_token: String,
    api_key: String,
    base_url: String,
    base_api_route: Option<String>,
    throw_on_error: Option<bool>,
    separator: Option<char>,
}

impl ClientConfigBuilder {
    /// Set the API route (default `/api/`).
    #[must_use]
    pub fn base_api_route(mut self, route: impl Into<String>) -> Self {
        self.base_api_route = Some(route.into());
        self
    }

    /// Propagate recoverable failures instead of returning error bodies.
    #[must_use]
    pub const fn throw_on_error(mut self, throw: bool) -> Self {
        self.throw_on_error = Some(throw);
        self
    }

    /// Set the snake-case separator (default `-`).
    #[must_use]
    pub const fn separator(mut self, separator: char) -> Self {
        self.separator = Some(separator);
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] if the API key is not valid hex.
    pub fn build(self) -> Result<ClientConfig> {
        Ok(ClientConfig {
            credentials: Credentials::new(self.api_token, &self.api_key)?,
            base_url: self.base_url,
            base_api_route: self
                .base_api_route
                .unwrap_or_else(|| DEFAULT_API_ROUTE.to_string()),
            throw_on_error: self.throw_on_error.unwrap_or(false),
            case: CaseConverter::new(self.separator.unwrap_or(DEFAULT_SEPARATOR)),
        })
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::config(format!("{name}: expected a boolean, got `{other}`"))),
    }
}

fn parse_separator(value: &str) -> Result<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(separator), None) => Ok(separator),
        _ => Err(Error::config(format!(
            "{}: expected a single character, got `{value}`",
            env::API_SNAKE_SEPARATOR
        ))),
    }
}

// ============================================================================
// Transport Configuration
// ============================================================================

/// Configuration for the default HTTP transport.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Request timeout duration.
    pub timeout: Duration,
    /// Connection timeout duration.
    pub connect_timeout: Duration,
    /// Maximum idle connections per host.
    pub pool_idle_per_host: usize,
    /// Idle connection timeout.
    pub pool_idle_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            pool_idle_per_host: 32,
            pool_idle_timeout: Duration::from_secs(90),
        }
    }
}

impl TransportConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> TransportConfigBuilder {
        TransportConfigBuilder::default()
    }
}

/// Builder for [`TransportConfig`].
#[derive(Debug, Clone, Default)]
pub struct TransportConfigBuilder {
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    pool_idle_per_host: Option<usize>,
    pool_idle_timeout: Option<Duration>,
}

impl TransportConfigBuilder {
    /// Set the request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the maximum idle connections per host.
    #[must_use]
    pub const fn pool_idle_per_host(mut self, count: usize) -> Self {
        self.pool_idle_per_host = Some(count);
        self
    }

    /// Set the idle connection timeout.
    #[must_use]
    pub const fn pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = Some(timeout);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> TransportConfig {
        let defaults = TransportConfig::default();
        TransportConfig {
            timeout: self.timeout.unwrap_or(defaults.timeout),
            connect_timeout: self.connect_timeout.unwrap_or(defaults.connect_timeout),
            pool_idle_per_host: self
                .pool_idle_per_host
                .unwrap_or(defaults.pool_idle_per_host),
            pool_idle_timeout: self.pool_idle_timeout.unwrap_or(defaults.pool_idle_timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults() {
        let config = ClientConfig::new("token", "cafebabe", "https://shop.example.com")
            .expect("config");
        assert_eq!(config.base_url(), "https://shop.example.com");
        assert_eq!(config.base_api_route(), "/api/");
        assert!(!config.throw_on_error());
        assert_eq!(config.case().separator(), '-');
        assert_eq!(config.credentials().api_token(), "token");
    }

    #[test]
    fn builder_overrides() {
        let config = ClientConfig::builder("token", "cafebabe", "https://shop.example.com")
            .base_api_route("/admin/api/")
            .throw_on_error(true)
            .separator('_')
            .build()
            .expect("config");
        assert_eq!(config.base_api_route(), "/admin/api/");
        assert!(config.throw_on_error());
        assert_eq!(config.case().separator(), '_');
    }

    #[test]
    fn invalid_key_is_rejected_at_build() {
        let err = ClientConfig::new("token", "xyz", "https://shop.example.com")
            .expect_err("should fail");
        assert!(matches!(err, Error::InvalidKey(_)));
    }

    #[test]
    fn from_lookup_required_and_optional() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("API_TOKEN", "token"),
            ("API_KEY", "cafebabe"),
            ("API_BASE_URL", "https://shop.example.com"),
            ("API_THROW_ON_ERROR", "true"),
            ("API_SNAKE_SEPARATOR", "_"),
        ]))
        .expect("config");

        assert!(config.throw_on_error());
        assert_eq!(config.case().separator(), '_');
        assert_eq!(config.base_api_route(), "/api/");
    }

    #[test]
    fn from_lookup_missing_variable() {
        let err = ClientConfig::from_lookup(lookup(&[("API_TOKEN", "token")]))
            .expect_err("should fail");
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("API_KEY"));
    }

    #[test]
    fn from_lookup_malformed_values() {
        let base = [
            ("API_TOKEN", "token"),
            ("API_KEY", "cafebabe"),
            ("API_BASE_URL", "https://shop.example.com"),
        ];

        let mut vars = base.to_vec();
        vars.push(("API_THROW_ON_ERROR", "maybe"));
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&vars)),
            Err(Error::Config(_))
        ));

        let mut vars = base.to_vec();
        vars.push(("API_SNAKE_SEPARATOR", "--"));
        assert!(matches!(
            ClientConfig::from_lookup(lookup(&vars)),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn transport_defaults() {
        let config = TransportConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.pool_idle_per_host, 32);
    }

    #[test]
    fn transport_builder_overrides() {
        let config = TransportConfig::builder()
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(5))
            .pool_idle_per_host(16)
            .build();

        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.connect_timeout, Duration::from_secs(5));
        assert_eq!(config.pool_idle_per_host, 16);
    }
}
