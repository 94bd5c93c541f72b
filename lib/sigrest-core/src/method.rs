//! HTTP methods and canonical verbs.

use std::str::FromStr;

use derive_more::Display;

use crate::Error;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Method {
    /// GET method - retrieve a resource.
    #[display("GET")]
    Get,
    /// POST method - create a resource.
    #[display("POST")]
    Post,
    /// PUT method - replace a resource.
    #[display("PUT")]
    Put,
    /// DELETE method - remove a resource.
    #[display("DELETE")]
    Delete,
    /// PATCH method - partially update a resource.
    #[display("PATCH")]
    Patch,
}

impl Method {
    /// Returns `true` if requests with this method carry a JSON body by default.
    #[must_use]
    pub const fn has_json_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Delete => Self::DELETE,
            Method::Patch => Self::PATCH,
        }
    }
}

impl TryFrom<http::Method> for Method {
    type Error = Error;

    fn try_from(method: http::Method) -> Result<Self, Self::Error> {
        match method {
            http::Method::GET => Ok(Self::Get),
            http::Method::POST => Ok(Self::Post),
            http::Method::PUT => Ok(Self::Put),
            http::Method::DELETE => Ok(Self::Delete),
            http::Method::PATCH => Ok(Self::Patch),
            other => Err(Error::InvalidRequest(format!(
                "unsupported HTTP method: {other}"
            ))),
        }
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            "PATCH" => Ok(Self::Patch),
            _ => Err(Error::InvalidRequest(format!("unsupported HTTP method: {s}"))),
        }
    }
}

/// One of the five resource-oriented operations.
///
/// The declaration order is the matching priority used by convention
/// dispatch, see [`Verb::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Verb {
    /// List a collection: `GET {route}{resource}`.
    #[display("LIST")]
    List,
    /// Fetch one item: `GET {route}{resource}/{id}`.
    #[display("GET")]
    Get,
    /// Create an item: `POST {route}{resource}`.
    #[display("POST")]
    Post,
    /// Replace an item: `PUT {route}{resource}[/{id}]`.
    #[display("PUT")]
    Put,
    /// Remove an item: `DELETE {route}{resource}/{id}`.
    #[display("DELETE")]
    Delete,
}

impl Verb {
    /// All verbs in matching priority order.
    pub const ALL: [Self; 5] = [Self::List, Self::Get, Self::Post, Self::Put, Self::Delete];

    /// Upper-case name, e.g. `LIST`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::List => "LIST",
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Lower-case prefix recognized in convention method names.
    #[must_use]
    pub const fn prefix(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Delete => "delete",
        }
    }

    /// HTTP method sent on the wire.
    #[must_use]
    pub const fn method(&self) -> Method {
        match self {
            Self::List | Self::Get => Method::Get,
            Self::Post => Method::Post,
            Self::Put => Method::Put,
            Self::Delete => Method::Delete,
        }
    }
}

impl FromStr for Verb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|verb| verb.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidRequest(format!("unknown verb: {s}")))
    }
}

impl From<Verb> for Method {
    fn from(verb: Verb) -> Self {
        verb.method()
    }
}
