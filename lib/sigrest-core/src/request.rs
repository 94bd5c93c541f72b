//! Signed HTTP request building.
//!
//! [`RequestBuilder::build`] turns raw call parameters into a fully formed
//! [`Request`]:
//!
//! 1. the body is encoded once, and those exact bytes are signed
//! 2. `Content-Type: application/json` is added for POST/PUT unless present
//! 3. `Authorization: TOKEN <token>` is added unless present
//! 4. the `sign` parameter is set on the explicit query parameters
//! 5. a query already present in the URL is decoded and merged underneath
//!    the explicit parameters (explicit values win)
//! 6. the merged parameters are encoded with the canonical codec
//!
//! No I/O happens here.
//!
//! # Example
//!
//! ```
//! use sigrest_core::{Credentials, Method, Request};
//!
//! let credentials = Credentials::new("my-token", "cafebabe").expect("valid key");
//! let request = Request::builder(Method::Get, "https://shop.example.com/api/products?limit=5")
//!     .query("lang", "fr_FR")
//!     .build(&credentials)
//!     .expect("valid request");
//!
//! assert_eq!(request.header("Authorization"), Some("TOKEN my-token"));
//! assert_eq!(request.query().get("limit"), Some("5"));
//! assert!(request.query().contains_key("sign"));
//! ```

use std::collections::HashMap;

use bytes::Bytes;
use url::Url;

use crate::{
    CallOptions, ContentType, Credentials, Error, Method, Payload, QueryParams, Result, query,
    signer::SIGNATURE_PARAM,
};

/// A signed HTTP request, ready for the transport.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    url: Url,
    query: QueryParams,
    headers: HashMap<String, String>,
    body: Bytes,
    options: CallOptions,
}

impl Request {
    /// Creates a new [`RequestBuilder`].
    #[must_use]
    pub fn builder(method: Method, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(method, url)
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Absolute request URL, including the encoded query string.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// URL path, without the query string.
    #[must_use]
    pub fn path(&self) -> &str {
        self.url.path()
    }

    /// The final, merged query parameters (including `sign`).
    #[must_use]
    pub fn query(&self) -> &QueryParams {
        &self.query
    }

    /// The body signature.
    #[must_use]
    pub fn signature(&self) -> Option<&str> {
        self.query.get(SIGNATURE_PARAM)
    }

    /// Request headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Mutable access to headers.
    #[must_use]
    pub fn headers_mut(&mut self) -> &mut HashMap<String, String> {
        &mut self.headers
    }

    /// Single header value by name (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Request body, exactly as signed.
    #[must_use]
    pub const fn body(&self) -> &Bytes {
        &self.body
    }

    /// Per-call options.
    #[must_use]
    pub const fn options(&self) -> &CallOptions {
        &self.options
    }

    /// Consume into (method, url, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (Method, Url, HashMap<String, String>, Bytes) {
        (self.method, self.url, self.headers, self.body)
    }
}

/// Builder for constructing signed [`Request`] instances.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    url: String,
    query: QueryParams,
    headers: HashMap<String, String>,
    body: Payload,
    options: CallOptions,
}

impl RequestBuilder {
    /// Creates a new builder for an absolute URL, which may already carry
    /// a query string.
    #[must_use]
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            query: QueryParams::new(),
            headers: HashMap::new(),
            body: Payload::Empty,
            options: CallOptions::default(),
        }
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets multiple headers.
    #[must_use]
    pub fn headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Sets a `name=value` query parameter.
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name, Some(value.into()));
        self
    }

    /// Sets a bare query key.
    #[must_use]
    pub fn bare_query(mut self, name: impl Into<String>) -> Self {
        self.query.insert(name, None);
        self
    }

    /// Merges explicit query parameters; later values win.
    #[must_use]
    pub fn query_params(mut self, params: QueryParams) -> Self {
        self.query = self.query.merged_with(params);
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Payload>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets a structured JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn json<T: serde::Serialize + ?Sized>(self, value: &T) -> Result<Self> {
        Ok(self.body(Payload::json(value)?))
    }

    /// Sets the per-call options.
    #[must_use]
    pub const fn options(mut self, options: CallOptions) -> Self {
        self.options = options;
        self
    }

    /// Signs and assembles the [`Request`].
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be JSON-encoded or the final URL
    /// does not parse. A `#` anywhere in the URL or the query is rejected
    /// with [`Error::InvalidRequest`].
    pub fn build(self, credentials: &Credentials) -> Result<Request> {
        let Self {
            method,
            url,
            mut query,
            mut headers,
            body,
            options,
        } = self;

        let body = body.to_bytes()?;

        if method.has_json_body() && find_header(&headers, "Content-Type").is_none() {
            headers.insert(
                "Content-Type".to_string(),
                ContentType::Json.as_str().to_string(),
            );
        }

        if find_header(&headers, "Authorization").is_none() {
            headers.insert("Authorization".to_string(), credentials.authorization());
        }

        query.insert(SIGNATURE_PARAM, Some(credentials.signer().sign(&body)));

        let (base, query) = match url.split_once('?') {
            Some((base, existing)) => (base, query::decode(existing).merged_with(query)),
            None => (url.as_str(), query),
        };

        let encoded = query::encode(&query);
        let full = if encoded.is_empty() {
            base.to_string()
        } else {
            format!("{base}?{encoded}")
        };

        let url = Url::parse(&full)?;
        if url.fragment().is_some() {
            return Err(Error::invalid_request(
                "'#' in the URL or query would hide the signature in a fragment",
            ));
        }

        Ok(Request {
            method,
            url,
            query,
            headers,
            body,
            options,
        })
    }
}

fn find_header<'a>(headers: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};
    use serde_json::json;

    use super::*;
    use crate::{Error, sign};

    const KEY: &str = "cafebabe";

    fn credentials() -> Credentials {
        Credentials::new("my-token", KEY).expect("valid key")
    }

    #[test]
    fn get_request_is_signed_over_empty_body() {
        let request = Request::builder(Method::Get, "https://shop.example.com/api/products")
            .build(&credentials())
            .expect("request");

        let expected = sign(b"", KEY).expect("sign");
        check!(request.method() == Method::Get);
        check!(request.signature() == Some(expected.as_str()));
        check!(
            request.url().as_str() == format!("https://shop.example.com/api/products?sign={expected}")
        );
        check!(request.body().is_empty());
        check!(request.header("Content-Type").is_none());
        check!(request.header("authorization") == Some("TOKEN my-token"));
    }

    #[test]
    fn post_request_signs_json_body() {
        let request = Request::builder(Method::Post, "https://shop.example.com/api/products")
            .json(&json!({"title": "Shirt"}))
            .expect("json")
            .build(&credentials())
            .expect("request");

        let expected = sign(br#"{"title":"Shirt"}"#, KEY).expect("sign");
        check!(request.body().as_ref() == br#"{"title":"Shirt"}"#);
        check!(request.signature() == Some(expected.as_str()));
        check!(request.header("Content-Type") == Some("application/json"));
    }

    #[test]
    fn struct_body_keeps_field_order() {
        #[derive(serde::Serialize)]
        struct Product<'a> {
            reference: &'a str,
            id: u64,
        }

        let request = Request::builder(Method::Post, "https://shop.example.com/api/products")
            .json(&Product {
                reference: "X",
                id: 1,
            })
            .expect("json")
            .build(&credentials())
            .expect("request");

        check!(request.body().as_ref() == br#"{"reference":"X","id":1}"#);
        let expected = sign(br#"{"reference":"X","id":1}"#, KEY).expect("sign");
        check!(request.signature() == Some(expected.as_str()));
    }

    #[test]
    fn raw_string_body_is_not_reencoded() {
        let request = Request::builder(Method::Put, "https://shop.example.com/api/products/1")
            .body(r#"{"title":"Shirt"}"#)
            .build(&credentials())
            .expect("request");

        check!(request.body().as_ref() == br#"{"title":"Shirt"}"#);
        let expected = sign(br#"{"title":"Shirt"}"#, KEY).expect("sign");
        check!(request.signature() == Some(expected.as_str()));
        check!(request.header("Content-Type") == Some("application/json"));
    }

    #[test]
    fn delete_request_has_no_content_type() {
        let request = Request::builder(Method::Delete, "https://shop.example.com/api/products/1")
            .build(&credentials())
            .expect("request");

        check!(request.header("Content-Type").is_none());
        check!(request.header("Authorization") == Some("TOKEN my-token"));
    }

    #[test]
    fn caller_headers_are_not_overridden() {
        let request = Request::builder(Method::Post, "https://shop.example.com/api/products")
            .header("content-type", "text/plain")
            .header("Authorization", "TOKEN other")
            .body("plain")
            .build(&credentials())
            .expect("request");

        check!(request.header("Content-Type") == Some("text/plain"));
        check!(request.header("Authorization") == Some("TOKEN other"));
        check!(request.headers().len() == 2);
    }

    #[test]
    fn existing_url_query_is_merged_under_explicit_params() {
        let request = Request::builder(
            Method::Get,
            "https://shop.example.com/api/products?lang=en_US&limit=5&visible",
        )
        .query("lang", "fr_FR")
        .query("order", "alpha")
        .build(&credentials())
        .expect("request");

        let sign = sign(b"", KEY).expect("sign");
        check!(request.query().get("lang") == Some("fr_FR"));
        check!(
            request.url().query()
                == Some(format!("lang=fr_FR&limit=5&visible&order=alpha&sign={sign}").as_str())
        );
        check!(request.path() == "/api/products");
    }

    #[test]
    fn explicit_sign_is_replaced() {
        let request = Request::builder(Method::Get, "https://shop.example.com/api/products?sign=forged")
            .query("sign", "also-forged")
            .build(&credentials())
            .expect("request");

        let expected = sign(b"", KEY).expect("sign");
        check!(request.signature() == Some(expected.as_str()));
        check!(request.url().query() == Some(format!("sign={expected}").as_str()));
    }

    #[test]
    fn bare_query_keys_have_no_equals() {
        let request = Request::builder(Method::Get, "https://shop.example.com/api/products")
            .bare_query("visible")
            .query("empty", "")
            .build(&credentials())
            .expect("request");

        let_assert!(Some(query) = request.url().query());
        check!(query.starts_with("visible&empty&sign="));
    }

    #[test]
    fn options_travel_with_the_request() {
        let options = CallOptions::new().timeout(std::time::Duration::from_secs(2));
        let request = Request::builder(Method::Get, "https://shop.example.com/api/products")
            .options(options)
            .build(&credentials())
            .expect("request");

        check!(request.options() == &options);
    }

    #[test]
    fn hash_in_query_is_rejected() {
        let result = Request::builder(Method::Get, "https://shop.example.com/api/products")
            .query("tag", "a#b")
            .build(&credentials());
        let_assert!(Err(Error::InvalidRequest(_)) = result);

        let result = Request::builder(Method::Get, "https://shop.example.com/api/products")
            .bare_query("#top")
            .build(&credentials());
        let_assert!(Err(Error::InvalidRequest(_)) = result);

        let result = Request::builder(Method::Get, "https://shop.example.com/api/products#top")
            .build(&credentials());
        let_assert!(Err(Error::InvalidRequest(_)) = result);
    }

    #[test]
    fn signature_is_always_in_the_sent_query() {
        let request = Request::builder(Method::Get, "https://shop.example.com/api/products")
            .query("q", "a b?c/d")
            .build(&credentials())
            .expect("request");

        let expected = sign(b"", KEY).expect("sign");
        let_assert!(Some(query) = request.url().query());
        check!(query.contains(&format!("sign={expected}")));
        check!(request.url().fragment().is_none());
    }

    #[test]
    fn invalid_url() {
        let result = Request::builder(Method::Get, "/api/products").build(&credentials());

        let_assert!(Err(Error::InvalidUrl(_)) = result);
    }
}
