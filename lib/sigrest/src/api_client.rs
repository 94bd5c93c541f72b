//! The API client.
//!
//! [`ApiClient`] combines a [`ClientConfig`] with any [`HttpClient`]
//! transport. Each call builds one signed [`Request`], sends it once and
//! normalizes the outcome into a [`Reply`].

use std::collections::HashMap;
use std::fmt::Display;

use sigrest_core::{
    CallOptions, Error, HttpClient, Method, Payload, QueryParams, Reply, Request, Result, Verb,
};
use tracing::debug;

use crate::{
    HyperClient,
    config::ClientConfig,
    dispatch::{Args, Operation, resolve},
    normalize::normalize,
};

/// Optional parts of a call: query parameters, headers and options.
#[derive(Debug, Clone, Default)]
pub struct Params {
    pub(crate) query: QueryParams,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) options: CallOptions,
}

impl Params {
    /// No query, no headers, default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `name=value` query parameter.
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name, Some(value.into()));
        self
    }

    /// Add a bare query key.
    #[must_use]
    pub fn bare_query(mut self, name: impl Into<String>) -> Self {
        self.query.insert(name, None);
        self
    }

    /// Merge query parameters; later values win.
    #[must_use]
    pub fn query_params(mut self, params: QueryParams) -> Self {
        self.query = self.query.merged_with(params);
        self
    }

    /// Add a header. `Authorization` and `Content-Type` override the
    /// defaults.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set the per-call options.
    #[must_use]
    pub const fn options(mut self, options: CallOptions) -> Self {
        self.options = options;
        self
    }

    /// Ask for the raw response.
    #[must_use]
    pub const fn handle_response(mut self) -> Self {
        self.options = self.options.handle_response(true);
        self
    }
}

/// REST API client.
///
/// # Example
///
/// ```ignore
/// use sigrest::{ApiClient, Args, ClientConfig, Params};
///
/// let client = ApiClient::new(ClientConfig::from_env()?);
///
/// let products = client.list("products", Params::new().query("limit", "10")).await?;
/// let avs = client.invoke("listAttributeAvs", Args::new()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient<C = HyperClient> {
    transport: C,
    config: ClientConfig,
}

impl ApiClient<HyperClient> {
    /// Create a client over the default [`HyperClient`] transport.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(HyperClient::new(), config)
    }
}

impl<C> ApiClient<C> {
    /// Create a client over a custom transport.
    #[must_use]
    pub const fn with_transport(transport: C, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    /// The client configuration.
    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get a reference to the transport.
    #[must_use]
    pub const fn inner(&self) -> &C {
        &self.transport
    }

    /// Consume the client and return the transport.
    #[must_use]
    pub fn into_inner(self) -> C {
        self.transport
    }

    fn resource_path(&self, resource: &str) -> String {
        format!("{}{resource}", self.config.base_api_route())
    }
}

impl<C: HttpClient> ApiClient<C> {
    /// `GET {route}{resource}`.
    pub async fn list(&self, resource: &str, params: Params) -> Result<Reply> {
        let path = self.resource_path(resource);
        self.send(Verb::List, &path, Payload::Empty, params).await
    }

    /// `GET {route}{resource}/{id}`.
    pub async fn get(&self, resource: &str, id: impl Display, params: Params) -> Result<Reply> {
        let path = format!("{}/{id}", self.resource_path(resource));
        self.send(Verb::Get, &path, Payload::Empty, params).await
    }

    /// `POST {route}{resource}` with a JSON body.
    pub async fn create(
        &self,
        resource: &str,
        body: impl Into<Payload>,
        params: Params,
    ) -> Result<Reply> {
        let path = self.resource_path(resource);
        self.send(Verb::Post, &path, body.into(), params).await
    }

    /// `PUT {route}{resource}/{id}`, or `PUT {route}{resource}` when the id
    /// is absent or empty.
    pub async fn update(
        &self,
        resource: &str,
        body: impl Into<Payload>,
        id: Option<&str>,
        params: Params,
    ) -> Result<Reply> {
        let mut path = self.resource_path(resource);
        if let Some(id) = id.filter(|id| !id.is_empty()) {
            path.push('/');
            path.push_str(id);
        }
        self.send(Verb::Put, &path, body.into(), params).await
    }

    /// `DELETE {route}{resource}/{id}`.
    pub async fn remove(&self, resource: &str, id: impl Display, params: Params) -> Result<Reply> {
        let path = format!("{}/{id}", self.resource_path(resource));
        self.send(Verb::Delete, &path, Payload::Empty, params).await
    }

    /// Call a path relative to the base URL, e.g. `/api/products/search`.
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        body: impl Into<Payload>,
        params: Params,
    ) -> Result<Reply> {
        let url = format!("{}{path}", self.config.base_url());
        self.call_url(method, &url, body, params).await
    }

    /// Call an absolute URL, which may already carry a query string.
    ///
    /// # Errors
    ///
    /// Request construction errors always propagate. Transport and decoding
    /// failures propagate when `throw_on_error` is set or the raw response
    /// was requested; otherwise they come back as an error body.
    pub async fn call_url(
        &self,
        method: Method,
        url: &str,
        body: impl Into<Payload>,
        params: Params,
    ) -> Result<Reply> {
        let Params {
            query,
            headers,
            options,
        } = params;

        let request = Request::builder(method, url)
            .headers(headers)
            .query_params(query)
            .body(body)
            .options(options)
            .build(self.config.credentials())?;

        debug!(%method, path = request.path(), "dispatching request");

        let outcome = self.transport.execute(request).await;

        if options.handle_response {
            return outcome.map(Reply::Raw);
        }

        normalize(outcome, self.config.throw_on_error()).map(Reply::Normalized)
    }

    /// Invoke an operation by name, see [`dispatch`](crate::dispatch).
    ///
    /// `listAttributeAvs` with empty [`Args`] is the same call as
    /// `list("attribute-avs", Params::new())`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownOperation`] for unresolvable names and
    /// [`Error::InvalidRequest`] when a required argument is missing, in
    /// addition to the errors of the resolved call.
    pub async fn invoke(&self, name: &str, args: Args) -> Result<Reply> {
        let (operation, derived) = resolve(name, self.config.case())?.into_parts();
        let Args {
            resource,
            id,
            body,
            method,
            params,
        } = args;

        let resource = derived.or(resource).ok_or_else(|| {
            Error::invalid_request(format!("operation `{operation}` requires a resource"))
        })?;
        let required_id = |id: Option<String>| {
            id.ok_or_else(|| Error::invalid_request(format!("operation `{operation}` requires an id")))
        };

        match operation {
            Operation::List => self.list(&resource, params).await,
            Operation::Get => self.get(&resource, required_id(id)?, params).await,
            Operation::Create => self.create(&resource, body, params).await,
            Operation::Update => self.update(&resource, body, id.as_deref(), params).await,
            Operation::Remove => self.remove(&resource, required_id(id)?, params).await,
            Operation::Call => {
                self.call(method.unwrap_or(Method::Get), &resource, body, params)
                    .await
            }
        }
    }

    async fn send(&self, verb: Verb, path: &str, body: Payload, params: Params) -> Result<Reply> {
        debug!(verb = verb.as_str(), path, "calling resource");
        self.call(verb.method(), path, body, params).await
    }
}
