//! Operation registry and convention-based name resolution.
//!
//! [`ApiClient::invoke`](crate::ApiClient::invoke) accepts an operation name
//! chosen at runtime. The name is resolved in two steps:
//!
//! 1. an exact match against the direct operations (`list`, `get`, `create`,
//!    `update`, `remove`, `call`)
//! 2. otherwise the first [`Verb`] (in [`Verb::ALL`] order) whose lowercase
//!    form is a strict prefix of the name; the rest of the name is converted
//!    from `PascalCase` to the configured snake form and becomes the resource
//!
//! ```
//! use sigrest::dispatch::{Operation, resolve};
//! use sigrest_core::CaseConverter;
//!
//! let resolved = resolve("listAttributeAvs", CaseConverter::default()).expect("known");
//! assert_eq!(resolved.operation(), Operation::List);
//! assert_eq!(resolved.resource(), Some("attribute-avs"));
//! ```

use std::fmt;

use sigrest_core::{CallOptions, CaseConverter, Error, Method, Payload, QueryParams, Result, Verb};
use tracing::debug;

use crate::Params;

/// A high-level client action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// GET on the collection.
    List,
    /// GET on one item.
    Get,
    /// POST on the collection.
    Create,
    /// PUT on one item, or on the collection when no id is given.
    Update,
    /// DELETE on one item.
    Remove,
    /// Any method on a path relative to the base URL.
    Call,
}

/// Direct operation names, looked up before convention matching.
const DIRECT: [(&str, Operation); 6] = [
    ("list", Operation::List),
    ("get", Operation::Get),
    ("create", Operation::Create),
    ("update", Operation::Update),
    ("remove", Operation::Remove),
    ("call", Operation::Call),
];

impl Operation {
    /// The direct operation registered under `name`, if any.
    #[must_use]
    pub fn direct(name: &str) -> Option<Self> {
        DIRECT
            .iter()
            .find(|(direct, _)| *direct == name)
            .map(|(_, operation)| *operation)
    }

    /// The name this operation is registered under.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Get => "get",
            Self::Create => "create",
            Self::Update => "update",
            Self::Remove => "remove",
            Self::Call => "call",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<Verb> for Operation {
    fn from(verb: Verb) -> Self {
        match verb {
            Verb::List => Self::List,
            Verb::Get => Self::Get,
            Verb::Post => Self::Create,
            Verb::Put => Self::Update,
            Verb::Delete => Self::Remove,
        }
    }
}

/// Outcome of [`resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    operation: Operation,
    resource: Option<String>,
}

impl Resolved {
    /// The resolved operation.
    #[must_use]
    pub const fn operation(&self) -> Operation {
        self.operation
    }

    /// The resource derived from the name, `None` for direct operations.
    #[must_use]
    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    /// Consume into `(operation, resource)`.
    #[must_use]
    pub fn into_parts(self) -> (Operation, Option<String>) {
        (self.operation, self.resource)
    }
}

/// Resolve an operation name.
///
/// # Errors
///
/// Returns [`Error::UnknownOperation`] if the name is neither a direct
/// operation nor `<verb><Resource>`.
pub fn resolve(name: &str, case: CaseConverter) -> Result<Resolved> {
    if let Some(operation) = Operation::direct(name) {
        debug!(name, %operation, "resolved direct operation");
        return Ok(Resolved {
            operation,
            resource: None,
        });
    }

    for verb in Verb::ALL {
        if let Some(rest) = name.strip_prefix(verb.prefix())
            && !rest.is_empty()
        {
            let resource = case.pascal_to_snake(rest);
            let operation = Operation::from(verb);
            debug!(name, %operation, resource, "resolved operation by convention");
            return Ok(Resolved {
                operation,
                resource: Some(resource),
            });
        }
    }

    Err(Error::unknown_operation(name))
}

/// Arguments of a dynamically invoked operation.
///
/// Operations pick what they need: `list` reads the resource and query,
/// `create` adds the body, `get`/`remove` need an id, `call` treats the
/// resource as a path and honors [`Args::method`].
#[derive(Debug, Clone, Default)]
pub struct Args {
    pub(crate) resource: Option<String>,
    pub(crate) id: Option<String>,
    pub(crate) body: Payload,
    pub(crate) method: Option<Method>,
    pub(crate) params: Params,
}

impl Args {
    /// Empty arguments.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the resource (or the path for `call`).
    ///
    /// Ignored when the operation name already carries the resource.
    #[must_use]
    pub fn resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    /// Set the item id.
    #[must_use]
    pub fn id(mut self, id: impl ToString) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Set the request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Payload>) -> Self {
        self.body = body.into();
        self
    }

    /// Set a structured JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn json<T: serde::Serialize + ?Sized>(self, value: &T) -> Result<Self> {
        Ok(self.body(Payload::json(value)?))
    }

    /// HTTP method used by `call` (GET by default).
    #[must_use]
    pub const fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Replace the query, headers and options at once.
    #[must_use]
    pub fn params(mut self, params: Params) -> Self {
        self.params = params;
        self
    }

    /// Add a `name=value` query parameter.
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params = self.params.query(name, value);
        self
    }

    /// Add a bare query key.
    #[must_use]
    pub fn bare_query(mut self, name: impl Into<String>) -> Self {
        self.params = self.params.bare_query(name);
        self
    }

    /// Merge query parameters; later values win.
    #[must_use]
    pub fn query_params(mut self, params: QueryParams) -> Self {
        self.params = self.params.query_params(params);
        self
    }

    /// Add a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params = self.params.header(name, value);
        self
    }

    /// Set the per-call options.
    #[must_use]
    pub fn options(mut self, options: CallOptions) -> Self {
        self.params = self.params.options(options);
        self
    }

    /// Ask for the raw response.
    #[must_use]
    pub fn handle_response(mut self) -> Self {
        self.params = self.params.handle_response();
        self
    }
}
