//! OAuth client-credentials flow.
//!
//! The flow is two-step: `authorize` issues a short-lived code for the
//! client id, and `access_token` exchanges that code for a bearer token.
//! [`authorize_and_token`](OAuthApi::authorize_and_token) runs both steps.
//! None of these endpoints require an existing token.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::client::{HttpClient, Request};
use crate::error::Error;
use crate::response::Envelope;

/// Authorization code returned by the first leg of the flow.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizeData {
    pub code: String,
    #[serde(default)]
    pub timestamp: i64,
}

/// A full token grant, including the refresh token.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthToken {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: String,
    /// Lifetime of the access token, in seconds.
    #[serde(default)]
    pub expires_in: i64,
    #[serde(default)]
    pub timestamp: i64,
}

/// Token grant returned by a refresh; no new refresh token is issued.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshedToken {
    pub access_token: String,
    #[serde(default)]
    pub expires_in: i64,
    #[serde(default)]
    pub timestamp: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AccessTokenRequest<'a> {
    code: &'a str,
    client_id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshTokenRequest<'a> {
    client_id: &'a str,
    refresh_token: &'a str,
}

#[derive(Debug)]
pub struct OAuthApi {
    http: Arc<HttpClient>,
}

impl OAuthApi {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Request an authorization code for `client_id`.
    pub async fn authorize(&self, client_id: &str) -> Result<AuthorizeData, Error> {
        if client_id.is_empty() {
            return Err(Error::validation("client_id must not be empty"));
        }
        let request = Request::get("/open-api/v3/oauth/authorize").query("clientId", client_id);
        let envelope: Envelope<AuthorizeData> = self.http.execute(request).await?;
        envelope.into_data()
    }

    /// Exchange an authorization code for an access token.
    pub async fn access_token(&self, code: &str, client_id: &str) -> Result<OAuthToken, Error> {
        if code.is_empty() {
            return Err(Error::validation("code must not be empty"));
        }
        if client_id.is_empty() {
            return Err(Error::validation("client_id must not be empty"));
        }
        let request = Request::post("/open-api/v3/oauth/access-token")
            .json(&AccessTokenRequest { code, client_id })?;
        let envelope: Envelope<OAuthToken> = self.http.execute(request).await?;
        envelope.into_data()
    }

    /// Exchange a refresh token for a fresh access token.
    pub async fn refresh_token(
        &self,
        client_id: &str,
        refresh_token: &str,
    ) -> Result<RefreshedToken, Error> {
        if refresh_token.is_empty() {
            return Err(Error::validation("refresh_token must not be empty"));
        }
        let request = Request::post("/open-api/v3/oauth/refresh-token").json(&RefreshTokenRequest {
            client_id,
            refresh_token,
        })?;
        let envelope: Envelope<RefreshedToken> = self.http.execute(request).await?;
        envelope.into_data()
    }

    /// Run the full two-step flow: authorize, then exchange the code.
    pub async fn authorize_and_token(&self, client_id: &str) -> Result<OAuthToken, Error> {
        let authorization = self.authorize(client_id).await?;
        self.access_token(&authorization.code, client_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn api() -> OAuthApi {
        let http = HttpClient::new(&Config::sandbox()).unwrap();
        OAuthApi::new(Arc::new(http))
    }

    #[tokio::test]
    async fn authorize_rejects_empty_client_id() {
        let err = api().authorize("").await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn access_token_rejects_empty_code() {
        let err = api().access_token("", "client-1").await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn token_deserializes_with_missing_optionals() {
        let token: OAuthToken =
            serde_json::from_str(r#"{"accessToken":"tok_1"}"#).unwrap();
        assert_eq!(token.access_token, "tok_1");
        assert_eq!(token.expires_in, 0);
    }
}
