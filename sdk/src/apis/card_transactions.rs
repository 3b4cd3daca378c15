//! Card funding movements and the transaction ledger.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::client::{HttpClient, Request};
use crate::error::Error;

/// Request for moving funds into or out of a prepaid card. The same shape
/// serves both directions.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardTransferRequest {
    pub card_id: String,
    pub amount: f64,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_trade_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub infinity_account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub infinity_account_type: Option<String>,
}

impl CardTransferRequest {
    fn validate(&self) -> Result<(), Error> {
        if self.card_id.is_empty() {
            return Err(Error::validation("card_id is required"));
        }
        if self.amount <= 0.0 {
            return Err(Error::validation("amount must be greater than 0"));
        }
        if self.currency.is_empty() {
            return Err(Error::validation("currency is required"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardTransferResult {
    pub id: String,
    pub card_id: String,
    pub amount: f64,
    pub currency: String,
    pub status: String,
    #[serde(default)]
    pub merchant_trade_no: String,
    #[serde(default)]
    pub infinity_account_id: String,
    #[serde(default)]
    pub infinity_account_type: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardTransaction {
    pub id: String,
    pub card_id: String,
    #[serde(default)]
    pub r#type: String,
    pub amount: f64,
    pub currency: String,
    pub status: String,
    #[serde(default)]
    pub merchant_name: String,
    #[serde(default)]
    pub merchant_category_code: String,
    #[serde(default)]
    pub merchant_country: String,
    #[serde(default)]
    pub authorization_code: String,
    #[serde(default)]
    pub settlement_amount: f64,
    #[serde(default)]
    pub settlement_currency: String,
    #[serde(default)]
    pub billing_amount: f64,
    #[serde(default)]
    pub billing_currency: String,
    #[serde(default)]
    pub exchange_rate: f64,
    #[serde(default)]
    pub cardholder_id: String,
    #[serde(default)]
    pub transaction_time: String,
    #[serde(default)]
    pub settlement_time: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub decline_reason: String,
    #[serde(default)]
    pub is_international: bool,
    #[serde(default)]
    pub is_online: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CardTransactionList {
    #[serde(default)]
    pub list: Vec<CardTransaction>,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
}

/// Filters for [`CardTransactionsApi::list`]. Times are RFC 3339 strings.
#[derive(Debug, Clone, Default)]
pub struct CardTransactionListParams {
    pub account_id: Option<String>,
    pub card_id: Option<String>,
    pub transaction_type: Option<String>,
    pub status: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub limit: Option<u32>,
    pub page: Option<u32>,
}

#[derive(Debug)]
pub struct CardTransactionsApi {
    http: Arc<HttpClient>,
}

impl CardTransactionsApi {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Move funds from the account into a prepaid card.
    pub async fn transfer_in(
        &self,
        request: &CardTransferRequest,
    ) -> Result<CardTransferResult, Error> {
        request.validate()?;
        let request = Request::post("/open-api/v3/cards/transfer-in")
            .json(request)?
            .authenticated();
        self.http.execute(request).await
    }

    /// Move funds from a prepaid card back to the account.
    pub async fn transfer_out(
        &self,
        request: &CardTransferRequest,
    ) -> Result<CardTransferResult, Error> {
        request.validate()?;
        let request = Request::post("/open-api/v3/cards/transfer-out")
            .json(request)?
            .authenticated();
        self.http.execute(request).await
    }

    pub async fn list(
        &self,
        params: CardTransactionListParams,
    ) -> Result<CardTransactionList, Error> {
        let mut request = Request::get("/open-api/v3/cards/transaction-list").authenticated();
        if let Some(account_id) = &params.account_id {
            request = request.query("accountId", account_id);
        }
        if let Some(card_id) = &params.card_id {
            request = request.query("cardId", card_id);
        }
        if let Some(transaction_type) = &params.transaction_type {
            request = request.query("type", transaction_type);
        }
        if let Some(status) = &params.status {
            request = request.query("status", status);
        }
        if let Some(start_time) = &params.start_time {
            request = request.query("startTime", start_time);
        }
        if let Some(end_time) = &params.end_time {
            request = request.query("endTime", end_time);
        }
        if let Some(limit) = params.limit {
            request = request.query("limit", limit);
        }
        if let Some(page) = params.page {
            request = request.query("page", page);
        }
        self.http.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[tokio::test]
    async fn zero_amount_transfer_is_rejected() {
        let api =
            CardTransactionsApi::new(Arc::new(HttpClient::new(&Config::sandbox()).unwrap()));
        let request = CardTransferRequest {
            card_id: "card_1".into(),
            amount: 0.0,
            currency: "USD".into(),
            merchant_trade_no: None,
            infinity_account_id: None,
            infinity_account_type: None,
        };
        let err = api.transfer_in(&request).await.unwrap_err();
        assert!(err.to_string().contains("greater than 0"));
    }
}
