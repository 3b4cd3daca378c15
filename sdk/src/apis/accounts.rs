//! Account registration and lookup.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::client::{HttpClient, Request};
use crate::error::{ApiError, Error};
use crate::response::Envelope;

/// Upper bound the listing endpoint accepts for `limit`.
const MAX_PAGE_SIZE: u32 = 100;
const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    #[serde(default)]
    pub create_time: String,
    /// 1 = personal, 2 = business, 3 = child.
    #[serde(default)]
    pub r#type: i32,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub verified_name: String,
    #[serde(default)]
    pub verified_name_en: Option<String>,
    #[serde(default)]
    pub display_id: String,
    #[serde(default)]
    pub parent_account_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AccountList {
    #[serde(default)]
    pub list: Vec<Account>,
    /// The remote side reports the total as a decimal string.
    #[serde(default)]
    pub total: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterAccountRequest {
    pub phone_number: String,
    pub email: String,
    pub name: String,
    pub phone_country_code: String,
}

/// Filters for [`AccountsApi::list`]. `limit` is clamped to 100 and defaults
/// to 10; `page` defaults to 1.
#[derive(Debug, Clone, Default)]
pub struct AccountListParams {
    pub account_id: Option<String>,
    pub limit: Option<u32>,
    pub page: Option<u32>,
    pub status: Option<String>,
    pub account_type: Option<i32>,
}

#[derive(Debug)]
pub struct AccountsApi {
    http: Arc<HttpClient>,
}

impl AccountsApi {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Register a new account.
    pub async fn register(&self, request: &RegisterAccountRequest) -> Result<Account, Error> {
        if request.phone_number.is_empty() || request.email.is_empty() {
            return Err(Error::validation("phone_number and email are required"));
        }
        let request = Request::post("/open-api/v3/accounts/register")
            .json(request)?
            .authenticated();
        let envelope: Envelope<Account> = self.http.execute(request).await?;
        envelope.into_data()
    }

    /// List accounts with optional filtering.
    pub async fn list(&self, params: AccountListParams) -> Result<AccountList, Error> {
        let limit = params
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);
        let page = params.page.unwrap_or(1).max(1);

        let mut request = Request::get("/open-api/v3/accounts")
            .query("limit", limit)
            .query("page", page)
            .authenticated();
        if let Some(account_id) = &params.account_id {
            request = request.query("accountId", account_id);
        }
        if let Some(status) = &params.status {
            request = request.query("status", status);
        }
        if let Some(account_type) = params.account_type {
            request = request.query("type", account_type);
        }

        let envelope: Envelope<AccountList> = self.http.execute(request).await?;
        envelope.into_data()
    }

    /// Look up a single account by id. The listing endpoint is the only way
    /// to fetch one account, so this filters a one-element page.
    pub async fn get(&self, account_id: &str) -> Result<Account, Error> {
        if account_id.is_empty() {
            return Err(Error::validation("account_id must not be empty"));
        }
        let params = AccountListParams {
            account_id: Some(account_id.to_string()),
            limit: Some(1),
            page: Some(1),
            ..Default::default()
        };
        let mut page = self.list(params).await?;
        if page.list.is_empty() {
            return Err(ApiError {
                code: "ACCOUNT_NOT_FOUND".to_string(),
                message: format!("account {account_id} not found"),
            }
            .into());
        }
        Ok(page.list.remove(0))
    }

    /// Fetch every account, walking pages of the maximum size until a short
    /// page comes back or the reported total is reached. The total check
    /// terminates the walk even against a server that ignores `page` and
    /// keeps replaying the same full page.
    pub async fn list_all(&self) -> Result<Vec<Account>, Error> {
        let mut accounts = Vec::new();
        let mut page = 1;
        loop {
            let params = AccountListParams {
                limit: Some(MAX_PAGE_SIZE),
                page: Some(page),
                ..Default::default()
            };
            let batch = self.list(params).await?;
            let total: usize = batch.total.parse().unwrap_or(0);
            let short = batch.list.len() < MAX_PAGE_SIZE as usize;
            accounts.extend(batch.list);
            if short || accounts.len() >= total.max(1) {
                return Ok(accounts);
            }
            page += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn register_request() -> RegisterAccountRequest {
        RegisterAccountRequest {
            phone_number: "15900000031".into(),
            email: "a@b.c".into(),
            name: "test".into(),
            phone_country_code: "86".into(),
        }
    }

    async fn api(server: &MockServer) -> AccountsApi {
        let http = HttpClient::new(&Config::with_base_url(server.uri())).unwrap();
        AccountsApi::new(Arc::new(http))
    }

    #[tokio::test]
    async fn register_decodes_the_envelope_payload() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/open-api/v3/accounts/register"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "code": "000000",
                "message": "success",
                "data": { "id": "acc_1", "displayId": "D1" }
            })))
            .mount(&mock_server)
            .await;

        let account = api(&mock_server)
            .await
            .register(&register_request())
            .await
            .unwrap();
        assert_eq!(account.id, "acc_1");
        assert_eq!(account.display_id, "D1");
    }

    #[tokio::test]
    async fn register_surfaces_duplicate_phone_rejection() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/open-api/v3/accounts/register"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "code": "400001",
                "message": "duplicate phone"
            })))
            .mount(&mock_server)
            .await;

        let err = api(&mock_server)
            .await
            .register(&register_request())
            .await
            .unwrap_err();
        match err {
            Error::Api(api) => {
                assert_eq!(api.code, "400001");
                assert_eq!(api.message, "duplicate phone");
            }
            other => panic!("expected Error::Api, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn register_requires_contact_fields() {
        let mock_server = MockServer::start().await;
        let mut request = register_request();
        request.email.clear();
        let err = api(&mock_server)
            .await
            .register(&request)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn list_all_terminates_when_the_server_replays_full_pages() {
        let mock_server = MockServer::start().await;
        let rows: Vec<serde_json::Value> = (0..MAX_PAGE_SIZE)
            .map(|i| serde_json::json!({ "id": format!("acc_{i}"), "status": "ACTIVE" }))
            .collect();
        // Same full page for every request, page parameter ignored.
        Mock::given(method("GET"))
            .and(path("/open-api/v3/accounts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "code": "000000",
                "message": "success",
                "data": { "list": rows, "total": MAX_PAGE_SIZE.to_string() }
            })))
            .mount(&mock_server)
            .await;

        let accounts = api(&mock_server).await.list_all().await.unwrap();
        assert_eq!(accounts.len(), MAX_PAGE_SIZE as usize);
    }

    #[test]
    fn list_deserializes_string_total() {
        let list: AccountList = serde_json::from_str(
            r#"{"list":[{"id":"acc_1","status":"ACTIVE"}],"total":"1"}"#,
        )
        .unwrap();
        assert_eq!(list.total, "1");
        assert_eq!(list.list[0].id, "acc_1");
    }

    #[test]
    fn register_request_uses_camel_case() {
        let body = serde_json::to_value(RegisterAccountRequest {
            phone_number: "15900000031".into(),
            email: "a@b.c".into(),
            name: "test".into(),
            phone_country_code: "86".into(),
        })
        .unwrap();
        assert_eq!(body["phoneCountryCode"], "86");
        assert_eq!(body["phoneNumber"], "15900000031");
    }
}
