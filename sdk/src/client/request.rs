//! Per-call request description.
//!
//! A [`Request`] is built fresh for every HTTP call and handed to
//! [`HttpClient::execute`](super::HttpClient::execute); it has no lifecycle
//! beyond that single round-trip. JSON bodies are serialized eagerly by the
//! builder so an encoding failure surfaces before anything touches the
//! network.

use std::fmt;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::multipart::Form;
use reqwest::Method;
use serde::Serialize;

use crate::error::Error;

/// Payload attached to an outgoing request.
pub(crate) enum Body {
    /// No body at all.
    Empty,
    /// A JSON document, already serialized.
    Json(Vec<u8>),
    /// Pre-encoded bytes passed through unchanged.
    Raw(Bytes),
    /// A multipart form (file uploads); reqwest owns the boundary header.
    Multipart(Form),
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            Self::Json(bytes) => f.debug_tuple("Json").field(&bytes.len()).finish(),
            Self::Raw(bytes) => f.debug_tuple("Raw").field(&bytes.len()).finish(),
            Self::Multipart(_) => f.write_str("Multipart"),
        }
    }
}

/// Configuration for a single HTTP call.
///
/// ## Examples
///
/// ```rust,ignore
/// use interlace_sdk::Request;
///
/// let request = Request::get("/open-api/v3/accounts")
///     .query("limit", 10)
///     .query("page", 1)
///     .authenticated();
/// ```
#[derive(Debug)]
pub struct Request {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) body: Body,
    pub(crate) query: Vec<(String, String)>,
    pub(crate) headers: HeaderMap,
    pub(crate) requires_auth: bool,
    pub(crate) content_type: Option<String>,
}

impl Request {
    /// Starts a request with an arbitrary method and endpoint path.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: Body::Empty,
            query: Vec::new(),
            headers: HeaderMap::new(),
            requires_auth: false,
            content_type: None,
        }
    }

    /// Starts a GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Starts a POST request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Starts a PUT request.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Starts a PATCH request.
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// Starts a DELETE request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Appends a query parameter. Values are percent-escaped when the URL is
    /// composed; repeated keys are preserved in insertion order.
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Serializes `body` to JSON and attaches it.
    ///
    /// ## Errors
    ///
    /// Returns [`Error::Encoding`] if serialization fails.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, Error> {
        self.body = Body::Json(serde_json::to_vec(body).map_err(Error::Encoding)?);
        Ok(self)
    }

    /// Attaches pre-encoded bytes as the body, passed through unchanged.
    pub fn raw(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Body::Raw(body.into());
        self
    }

    /// Attaches a multipart form body (file uploads).
    pub fn multipart(mut self, form: Form) -> Self {
        self.body = Body::Multipart(form);
        self
    }

    /// Adds an extra header for this call. Extra headers are applied last and
    /// override any default on key collision.
    ///
    /// ## Errors
    ///
    /// Returns [`Error::Validation`] if the name or value is not a legal
    /// header.
    pub fn header(mut self, name: &str, value: &str) -> Result<Self, Error> {
        let name = HeaderName::try_from(name)
            .map_err(|_| Error::validation(format!("invalid header name: {name}")))?;
        let value = HeaderValue::try_from(value)
            .map_err(|_| Error::validation(format!("invalid header value for {name}")))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Marks the request as requiring the access token header.
    pub fn authenticated(mut self) -> Self {
        self.requires_auth = true;
        self
    }

    /// Overrides the `Content-Type` that would otherwise be inferred.
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Payload {
        name: String,
    }

    #[test]
    fn defaults_are_bare() {
        let request = Request::get("/open-api/v3/accounts");
        assert_eq!(request.method, Method::GET);
        assert!(!request.requires_auth);
        assert!(request.query.is_empty());
        assert!(request.content_type.is_none());
        assert!(matches!(request.body, Body::Empty));
    }

    #[test]
    fn query_preserves_order_and_repeats() {
        let request = Request::get("/x").query("a", 1).query("b", "two").query("a", 3);
        assert_eq!(
            request.query,
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "two".to_string()),
                ("a".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn json_body_is_serialized_eagerly() {
        let request = Request::post("/x")
            .json(&Payload { name: "test".into() })
            .unwrap();
        match request.body {
            Body::Json(bytes) => assert_eq!(bytes, br#"{"name":"test"}"#),
            other => panic!("expected JSON body, got {other:?}"),
        }
    }

    #[test]
    fn unserializable_body_is_an_encoding_error() {
        // Maps with non-string keys cannot be represented in JSON.
        let bad: std::collections::BTreeMap<(u8, u8), u8> = [((1, 2), 3)].into();
        let err = Request::post("/x").json(&bad).unwrap_err();
        assert!(matches!(err, Error::Encoding(_)));
    }

    #[test]
    fn invalid_header_name_rejected() {
        let err = Request::get("/x").header("bad header", "v").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
