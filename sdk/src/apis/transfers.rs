//! Blockchain transfers and KYT screening.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::client::{HttpClient, Request};
use crate::error::Error;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockchainTransfer {
    pub id: String,
    pub wallet_id: String,
    pub currency: String,
    pub chain: String,
    /// Decimal string; on-chain amounts are never floats.
    pub amount: String,
    #[serde(default)]
    pub fee: Option<String>,
    pub to_address: String,
    #[serde(default)]
    pub tag: Option<String>,
    pub status: String,
    #[serde(default)]
    pub tx_hash: Option<String>,
    #[serde(default)]
    pub confirmations: u32,
    #[serde(default)]
    pub required_confirms: u32,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferList {
    #[serde(default)]
    pub transfers: Vec<BlockchainTransfer>,
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
pub struct KytAlert {
    pub r#type: String,
    pub severity: String,
    #[serde(default)]
    pub description: String,
}

/// Know-Your-Transaction screening result for a transfer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferKyt {
    pub transfer_id: String,
    #[serde(default)]
    pub risk_score: i32,
    pub risk_level: String,
    #[serde(default)]
    pub alerts: Vec<KytAlert>,
    #[serde(default)]
    pub checked_at: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransferRequest {
    pub wallet_id: String,
    pub currency: String,
    pub chain: String,
    pub amount: String,
    pub to_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    pub idempotency_key: String,
}

impl CreateTransferRequest {
    fn validate(&self) -> Result<(), Error> {
        if self.wallet_id.is_empty()
            || self.currency.is_empty()
            || self.chain.is_empty()
            || self.amount.is_empty()
            || self.to_address.is_empty()
            || self.idempotency_key.is_empty()
        {
            return Err(Error::validation(
                "wallet_id, currency, chain, amount, to_address and idempotency_key are required",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeAndQuotaRequest {
    pub wallet_id: String,
    pub currency: String,
    pub chain: String,
    pub amount: String,
    pub to_address: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeAndQuota {
    pub fee: String,
    pub fee_currency: String,
    #[serde(default)]
    pub min_amount: String,
    #[serde(default)]
    pub max_amount: String,
    #[serde(default)]
    pub available_quota: String,
    #[serde(default)]
    pub estimated_arrival: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TransferListParams {
    pub wallet_id: Option<String>,
    pub currency: Option<String>,
    pub chain: Option<String>,
    pub status: Option<String>,
    pub limit: Option<u32>,
    pub page: Option<u32>,
}

#[derive(Debug)]
pub struct TransfersApi {
    http: Arc<HttpClient>,
}

impl TransfersApi {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Submit a new on-chain transfer.
    pub async fn create(&self, request: &CreateTransferRequest) -> Result<BlockchainTransfer, Error> {
        request.validate()?;
        let request = Request::post("/open-api/v3/cryptoconnect/transfers")
            .json(request)?
            .authenticated();
        self.http.execute(request).await
    }

    pub async fn list(&self, params: TransferListParams) -> Result<TransferList, Error> {
        let mut request = Request::get("/open-api/v3/cryptoconnect/transfers").authenticated();
        if let Some(wallet_id) = &params.wallet_id {
            request = request.query("walletId", wallet_id);
        }
        if let Some(currency) = &params.currency {
            request = request.query("currency", currency);
        }
        if let Some(chain) = &params.chain {
            request = request.query("chain", chain);
        }
        if let Some(status) = &params.status {
            request = request.query("status", status);
        }
        if let Some(limit) = params.limit {
            request = request.query("limit", limit);
        }
        if let Some(page) = params.page {
            request = request.query("page", page);
        }
        self.http.execute(request).await
    }

    pub async fn get(&self, transfer_id: &str) -> Result<BlockchainTransfer, Error> {
        if transfer_id.is_empty() {
            return Err(Error::validation("transfer_id must not be empty"));
        }
        let request = Request::get(format!("/open-api/v3/cryptoconnect/transfers/{transfer_id}"))
            .authenticated();
        self.http.execute(request).await
    }

    /// Fetch the KYT screening verdict for a transfer.
    pub async fn kyt(&self, transfer_id: &str) -> Result<TransferKyt, Error> {
        if transfer_id.is_empty() {
            return Err(Error::validation("transfer_id must not be empty"));
        }
        let request = Request::get(format!(
            "/open-api/v3/cryptoconnect/transfers/{transfer_id}/kyt"
        ))
        .authenticated();
        self.http.execute(request).await
    }

    /// Quote the fee and remaining quota for a prospective transfer.
    pub async fn fee_and_quota(&self, request: &FeeAndQuotaRequest) -> Result<FeeAndQuota, Error> {
        if request.wallet_id.is_empty()
            || request.currency.is_empty()
            || request.chain.is_empty()
            || request.amount.is_empty()
            || request.to_address.is_empty()
        {
            return Err(Error::validation(
                "wallet_id, currency, chain, amount and to_address are required",
            ));
        }
        let request = Request::post("/open-api/v3/cryptoconnect/transfers/fee-and-quota")
            .json(request)?
            .authenticated();
        self.http.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[tokio::test]
    async fn create_rejects_blank_to_address() {
        let api = TransfersApi::new(Arc::new(HttpClient::new(&Config::sandbox()).unwrap()));
        let request = CreateTransferRequest {
            wallet_id: "w_1".into(),
            currency: "USDT".into(),
            chain: "TRC20".into(),
            amount: "25.00".into(),
            to_address: String::new(),
            tag: None,
            idempotency_key: "idem_1".into(),
        };
        let err = api.create(&request).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn transfer_amount_stays_a_string() {
        let transfer: BlockchainTransfer = serde_json::from_str(
            r#"{
                "id": "t_1",
                "walletId": "w_1",
                "currency": "USDC",
                "chain": "ERC20",
                "amount": "100.000001",
                "toAddress": "0xabc",
                "status": "PENDING"
            }"#,
        )
        .unwrap();
        assert_eq!(transfer.amount, "100.000001");
    }
}
