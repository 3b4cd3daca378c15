//! Request execution with tracing instrumentation.
//!
//! [`HttpClient`] performs exactly one HTTP round-trip per invocation with
//! uniform URL, header, body, and error handling. It owns the shared access
//! token: resource clients hold the same `Arc<HttpClient>`, so rotating the
//! token after an auth flow is immediately visible to all of them.

use std::sync::{PoisonError, RwLock};

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::{instrument, Span};
use url::Url;

use super::request::{Body, Request};
use crate::config::Config;
use crate::error::{ApiError, Error};

/// Async HTTP executor shared by every resource client.
///
/// Wraps `reqwest::Client` (connection pooling, rustls, per-call timeout)
/// with the API's conventions: JSON in and out, a provider-specific access
/// token header, and `{code, message}` error payloads on any status ≥ 400.
///
/// The token lives behind an `RwLock` so concurrent requests and token
/// rotation are safe against each other; the executor itself has no other
/// mutable state, no retries, and no cache.
pub struct HttpClient {
    inner: reqwest::Client,
    base_url: Url,
    auth_header: HeaderName,
    access_token: RwLock<Option<String>>,
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The token is deliberately omitted.
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url.as_str())
            .field("auth_header", &self.auth_header)
            .field("has_token", &self.access_token().is_some())
            .finish()
    }
}

impl HttpClient {
    /// Builds an executor from a [`Config`].
    ///
    /// `Accept: application/json` and the configured `User-Agent` become
    /// client-level default headers; the timeout bounds every call issued
    /// through this instance.
    ///
    /// ## Errors
    ///
    /// Returns [`Error::Url`] for an unparseable base URL and
    /// [`Error::Validation`] for a user agent or auth header name that is
    /// not a legal HTTP header.
    pub fn new(config: &Config) -> Result<Self, Error> {
        let base_url = Url::parse(&config.base_url)?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        default_headers.insert(
            USER_AGENT,
            HeaderValue::try_from(config.user_agent.as_str())
                .map_err(|_| Error::validation(format!("invalid user agent: {}", config.user_agent)))?,
        );

        let inner = reqwest::Client::builder()
            .timeout(config.timeout)
            .default_headers(default_headers)
            .build()?;

        let auth_header = HeaderName::try_from(config.auth_header.as_str())
            .map_err(|_| Error::validation(format!("invalid auth header name: {}", config.auth_header)))?;

        Ok(Self {
            inner,
            base_url,
            auth_header,
            access_token: RwLock::new(None),
        })
    }

    /// Returns the base URL requests are issued against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Stores a new access token, visible to every clone of the handle.
    pub fn set_access_token(&self, token: impl Into<String>) {
        let token = token.into();
        let mut guard = self.access_token.write().unwrap_or_else(PoisonError::into_inner);
        *guard = if token.is_empty() { None } else { Some(token) };
    }

    /// Drops the stored access token.
    pub fn clear_access_token(&self) {
        let mut guard = self.access_token.write().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }

    /// Returns a copy of the current access token, if any.
    pub fn access_token(&self) -> Option<String> {
        self.access_token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Executes a request and decodes the JSON response body into `T`.
    ///
    /// ## Errors
    ///
    /// [`Error::Transport`] if the request never completed,
    /// [`Error::Api`] for any status ≥ 400, and [`Error::Decoding`] when a
    /// successful body does not match `T`.
    pub async fn execute<T: DeserializeOwned>(&self, request: Request) -> Result<T, Error> {
        let body = self.dispatch(request).await?;
        serde_json::from_slice(&body).map_err(Error::Decoding)
    }

    /// Executes a request and discards the response body.
    ///
    /// For endpoints whose success responses are empty or irrelevant; error
    /// handling is identical to [`execute`](Self::execute).
    pub async fn execute_empty(&self, request: Request) -> Result<(), Error> {
        self.dispatch(request).await.map(|_| ())
    }

    /// Appends an endpoint path to the base URL, keeping any path prefix the
    /// base carries (e.g. a gateway mount point like `https://host/gateway`).
    fn endpoint_url(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        let base_path = url.path().trim_end_matches('/').to_string();
        url.set_path(&format!("{base_path}/{}", path.trim_start_matches('/')));
        url
    }

    /// One HTTP round-trip: compose URL, apply headers and body, send,
    /// classify the outcome.
    #[instrument(
        name = "api_request",
        skip_all,
        fields(
            http.method = %request.method,
            http.url = tracing::field::Empty,
            http.status_code = tracing::field::Empty,
            otel.kind = "client",
        )
    )]
    async fn dispatch(&self, request: Request) -> Result<Bytes, Error> {
        let mut url = self.endpoint_url(&request.path);
        if !request.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &request.query {
                pairs.append_pair(key, value);
            }
            drop(pairs);
        }
        Span::current().record("http.url", url.as_str());

        let mut builder = self.inner.request(request.method.clone(), url);

        // Content type: explicit override wins; otherwise JSON bodies on
        // non-GET methods default to application/json. Multipart boundaries
        // are reqwest's business.
        if let Some(content_type) = &request.content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        } else if matches!(request.body, Body::Json(_)) && request.method != Method::GET {
            builder = builder.header(CONTENT_TYPE, "application/json");
        }

        if request.requires_auth {
            match self.access_token() {
                Some(token) if !token.is_empty() => {
                    builder = builder.header(self.auth_header.clone(), token);
                }
                _ => {
                    // Send anyway; the server's 401 carries a real error
                    // code, unlike anything fabricated locally.
                    tracing::warn!(
                        path = %request.path,
                        "authenticated request issued without an access token"
                    );
                }
            }
        }

        // Caller-supplied headers go last so they override the defaults.
        builder = builder.headers(request.headers);

        builder = match request.body {
            Body::Empty => builder,
            Body::Json(bytes) => builder.body(bytes),
            Body::Raw(bytes) => builder.body(bytes),
            Body::Multipart(form) => builder.multipart(form),
        };

        let response = builder.send().await?;
        let status = response.status();
        Span::current().record("http.status_code", status.as_u16());

        let body = response.bytes().await?;
        if status.as_u16() >= 400 {
            return Err(ApiError::from_body(&body).into());
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PARSE_ERROR_CODE;
    use crate::response::Envelope;
    use serde::Deserialize;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client() -> HttpClient {
        HttpClient::new(&Config::sandbox()).unwrap()
    }

    async fn mock_client(server: &MockServer) -> HttpClient {
        HttpClient::new(&Config::with_base_url(server.uri())).unwrap()
    }

    #[derive(Debug, Deserialize)]
    struct Account {
        id: String,
        status: String,
    }

    #[test]
    fn token_roundtrip() {
        let http = client();
        assert_eq!(http.access_token(), None);
        http.set_access_token("tok_1");
        assert_eq!(http.access_token().as_deref(), Some("tok_1"));
        http.clear_access_token();
        assert_eq!(http.access_token(), None);
    }

    #[test]
    fn empty_token_is_treated_as_absent() {
        let http = client();
        http.set_access_token("");
        assert_eq!(http.access_token(), None);
    }

    #[test]
    fn rejects_malformed_base_url() {
        let config = Config::with_base_url("not a url");
        assert!(matches!(HttpClient::new(&config), Err(Error::Url(_))));
    }

    #[test]
    fn rejects_bad_auth_header_name() {
        let config = Config::sandbox().with_auth_header("no spaces allowed");
        assert!(matches!(HttpClient::new(&config), Err(Error::Validation(_))));
    }

    #[test]
    fn debug_does_not_leak_token() {
        let http = client();
        http.set_access_token("secret-token-value");
        let rendered = format!("{http:?}");
        assert!(!rendered.contains("secret-token-value"));
        assert!(rendered.contains("has_token: true"));
    }

    #[tokio::test]
    async fn decodes_enveloped_payload() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/open-api/v3/accounts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "code": "000000",
                "message": "success",
                "data": { "id": "acct_1", "status": "Active" }
            })))
            .mount(&mock_server)
            .await;

        let http = mock_client(&mock_server).await;
        let envelope: Envelope<Account> = http
            .execute(Request::get("/open-api/v3/accounts"))
            .await
            .unwrap();
        let account = envelope.into_data().unwrap();
        assert_eq!(account.id, "acct_1");
        assert_eq!(account.status, "Active");
    }

    #[tokio::test]
    async fn error_status_surfaces_api_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/open-api/v3/accounts"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "code": "400001",
                "message": "accountId is required"
            })))
            .mount(&mock_server)
            .await;

        let http = mock_client(&mock_server).await;
        let err = http
            .execute::<Envelope<Account>>(Request::get("/open-api/v3/accounts"))
            .await
            .unwrap_err();
        match err {
            Error::Api(api) => {
                assert_eq!(api.code, "400001");
                assert_eq!(api.message, "accountId is required");
            }
            other => panic!("expected Error::Api, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_error_body_falls_back_to_parse_code() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/open-api/v3/accounts"))
            .respond_with(ResponseTemplate::new(500).set_body_string("<html>bad gateway</html>"))
            .mount(&mock_server)
            .await;

        let http = mock_client(&mock_server).await;
        let err = http
            .execute::<Envelope<Account>>(Request::get("/open-api/v3/accounts"))
            .await
            .unwrap_err();
        assert_eq!(err.api_code(), Some(PARSE_ERROR_CODE));
    }

    #[tokio::test]
    async fn authenticated_request_carries_token_header() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/open-api/v3/accounts"))
            .and(header("x-access-token", "tok_abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "code": "000000",
                "message": "success",
                "data": { "id": "acct_1", "status": "Active" }
            })))
            .mount(&mock_server)
            .await;

        let http = mock_client(&mock_server).await;
        http.set_access_token("tok_abc");
        let envelope: Envelope<Account> = http
            .execute(Request::get("/open-api/v3/accounts").authenticated())
            .await
            .unwrap();
        assert!(envelope.is_success());
    }

    #[tokio::test]
    async fn missing_token_still_sends_the_request() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/open-api/v3/accounts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "code": "000000",
                "message": "success",
                "data": { "id": "acct_1", "status": "Active" }
            })))
            .mount(&mock_server)
            .await;

        let http = mock_client(&mock_server).await;
        let envelope: Envelope<Account> = http
            .execute(Request::get("/open-api/v3/accounts").authenticated())
            .await
            .unwrap();
        assert!(envelope.is_success());

        let received = mock_server.received_requests().await.unwrap();
        assert!(!received[0].headers.contains_key("x-access-token"));
    }

    #[tokio::test]
    async fn unauthenticated_request_omits_token_header() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/open-api/v3/oauth/authorize"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "code": "000000",
                "message": "success",
                "data": { "id": "acct_1", "status": "Active" }
            })))
            .mount(&mock_server)
            .await;

        let http = mock_client(&mock_server).await;
        http.set_access_token("tok_abc");
        let _: Envelope<Account> = http
            .execute(Request::get("/open-api/v3/oauth/authorize"))
            .await
            .unwrap();

        let received = mock_server.received_requests().await.unwrap();
        assert!(!received[0].headers.contains_key("x-access-token"));
    }

    #[tokio::test]
    async fn query_parameters_are_encoded() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/open-api/v3/accounts"))
            .and(query_param("limit", "10"))
            .and(query_param("status", "Active Review"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "code": "000000",
                "message": "success",
                "data": { "id": "acct_1", "status": "Active" }
            })))
            .mount(&mock_server)
            .await;

        let http = mock_client(&mock_server).await;
        let envelope: Envelope<Account> = http
            .execute(
                Request::get("/open-api/v3/accounts")
                    .query("limit", 10)
                    .query("status", "Active Review"),
            )
            .await
            .unwrap();
        assert!(envelope.is_success());
    }

    #[tokio::test]
    async fn json_body_sets_content_type() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/open-api/v3/accounts"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({ "name": "Acme Ltd" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "code": "000000",
                "message": "success",
                "data": { "id": "acct_2", "status": "Pending" }
            })))
            .mount(&mock_server)
            .await;

        let http = mock_client(&mock_server).await;
        let request = Request::post("/open-api/v3/accounts")
            .json(&serde_json::json!({ "name": "Acme Ltd" }))
            .unwrap();
        let envelope: Envelope<Account> = http.execute(request).await.unwrap();
        assert_eq!(envelope.into_data().unwrap().id, "acct_2");
    }

    #[tokio::test]
    async fn caller_headers_override_defaults() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/open-api/v3/accounts"))
            .and(header("user-agent", "custom-agent/1.0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "code": "000000",
                "message": "success",
                "data": { "id": "acct_1", "status": "Active" }
            })))
            .mount(&mock_server)
            .await;

        let http = mock_client(&mock_server).await;
        let request = Request::get("/open-api/v3/accounts")
            .header("user-agent", "custom-agent/1.0")
            .unwrap();
        let envelope: Envelope<Account> = http.execute(request).await.unwrap();
        assert!(envelope.is_success());
    }

    #[tokio::test]
    async fn base_url_path_prefix_is_preserved() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/gateway/open-api/v3/accounts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "code": "000000",
                "message": "success",
                "data": { "id": "acct_1", "status": "Active" }
            })))
            .mount(&mock_server)
            .await;

        let config = Config::with_base_url(format!("{}/gateway", mock_server.uri()));
        let http = HttpClient::new(&config).unwrap();
        let envelope: Envelope<Account> = http
            .execute(Request::get("/open-api/v3/accounts"))
            .await
            .unwrap();
        assert!(envelope.is_success());
    }

    #[tokio::test]
    async fn execute_empty_ignores_response_body() {
        let mock_server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/open-api/v3/cards/card_1"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let http = mock_client(&mock_server).await;
        http.execute_empty(Request::delete("/open-api/v3/cards/card_1"))
            .await
            .unwrap();
    }
}
