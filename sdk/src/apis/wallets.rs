//! Crypto wallet management.
//!
//! These endpoints return their payloads directly, without the code/data
//! envelope the account endpoints use.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::client::{HttpClient, Request};
use crate::error::Error;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub id: String,
    pub account_id: String,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletList {
    #[serde(default)]
    pub wallets: Vec<Wallet>,
    #[serde(default)]
    pub total_count: u32,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub has_more: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WalletAddress {
    pub id: String,
    pub wallet_id: String,
    pub currency: String,
    pub chain: String,
    pub address: String,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWalletRequest {
    pub account_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
    /// Caller-chosen key to make retried creates safe.
    pub idempotency_key: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAddressRequest {
    pub currency: String,
    pub chain: String,
}

#[derive(Debug, Clone, Default)]
pub struct WalletListParams {
    pub account_id: Option<String>,
    pub limit: Option<u32>,
    pub page: Option<u32>,
}

#[derive(Debug)]
pub struct WalletsApi {
    http: Arc<HttpClient>,
}

impl WalletsApi {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    pub async fn create(&self, request: &CreateWalletRequest) -> Result<Wallet, Error> {
        if request.account_id.is_empty() {
            return Err(Error::validation("account_id is required"));
        }
        if request.idempotency_key.is_empty() {
            return Err(Error::validation("idempotency_key is required"));
        }
        let request = Request::post("/open-api/v3/cryptoconnect/wallets")
            .json(request)?
            .authenticated();
        self.http.execute(request).await
    }

    pub async fn list(&self, params: WalletListParams) -> Result<WalletList, Error> {
        let mut request = Request::get("/open-api/v3/cryptoconnect/wallets").authenticated();
        if let Some(account_id) = &params.account_id {
            request = request.query("accountId", account_id);
        }
        if let Some(limit) = params.limit {
            request = request.query("limit", limit);
        }
        if let Some(page) = params.page {
            request = request.query("page", page);
        }
        self.http.execute(request).await
    }

    pub async fn get(&self, wallet_id: &str) -> Result<Wallet, Error> {
        if wallet_id.is_empty() {
            return Err(Error::validation("wallet_id must not be empty"));
        }
        let request =
            Request::get(format!("/open-api/v3/cryptoconnect/wallets/{wallet_id}")).authenticated();
        self.http.execute(request).await
    }

    /// Rename a wallet.
    pub async fn update_nickname(&self, wallet_id: &str, nickname: &str) -> Result<Wallet, Error> {
        if wallet_id.is_empty() {
            return Err(Error::validation("wallet_id must not be empty"));
        }
        if nickname.is_empty() {
            return Err(Error::validation("nickname is required"));
        }
        #[derive(Serialize)]
        struct Body<'a> {
            nickname: &'a str,
        }
        let request = Request::patch(format!("/open-api/v3/cryptoconnect/wallets/{wallet_id}"))
            .json(&Body { nickname })?
            .authenticated();
        self.http.execute(request).await
    }

    /// Derive a new deposit address on the given chain.
    pub async fn create_address(
        &self,
        wallet_id: &str,
        request: &CreateAddressRequest,
    ) -> Result<WalletAddress, Error> {
        if wallet_id.is_empty() {
            return Err(Error::validation("wallet_id must not be empty"));
        }
        if request.currency.is_empty() || request.chain.is_empty() {
            return Err(Error::validation("currency and chain are required"));
        }
        let request = Request::post(format!(
            "/open-api/v3/cryptoconnect/wallets/{wallet_id}/addresses"
        ))
        .json(request)?
        .authenticated();
        self.http.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn api() -> WalletsApi {
        WalletsApi::new(Arc::new(HttpClient::new(&Config::sandbox()).unwrap()))
    }

    #[tokio::test]
    async fn create_requires_idempotency_key() {
        let request = CreateWalletRequest {
            account_id: "acc_1".into(),
            nickname: None,
            idempotency_key: String::new(),
        };
        let err = api().create(&request).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn create_address_requires_chain() {
        let request = CreateAddressRequest {
            currency: "USDC".into(),
            chain: String::new(),
        };
        let err = api().create_address("w_1", &request).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
