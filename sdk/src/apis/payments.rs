//! Acquiring: payment orders, refunds, and order search.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::client::{HttpClient, Request};
use crate::error::Error;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub merchant_trade_no: String,
    /// Decimal string, e.g. `"10.00"`.
    pub amount: String,
    pub currency: String,
    pub status: String,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub checkout_url: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub paid_at: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Refund {
    pub id: String,
    pub payment_id: String,
    pub merchant_trade_no: String,
    pub amount: String,
    pub currency: String,
    pub status: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub processed_at: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub payments: Vec<Payment>,
    #[serde(default)]
    pub refunds: Vec<Refund>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePaymentRequest {
    pub merchant_trade_no: String,
    pub amount: String,
    pub currency: String,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_url: Option<String>,
}

/// `order_no` accepts either the system order id or the merchant trade
/// number.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelPaymentRequest {
    pub order_no: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRefundRequest {
    /// Merchant trade number of the payment being refunded.
    pub source_merchant_trade_no: String,
    /// Merchant trade number for the refund itself.
    pub merchant_trade_no: String,
    pub amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug)]
pub struct PaymentsApi {
    http: Arc<HttpClient>,
}

impl PaymentsApi {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    pub async fn create(&self, request: &CreatePaymentRequest) -> Result<Payment, Error> {
        if request.merchant_trade_no.is_empty()
            || request.amount.is_empty()
            || request.currency.is_empty()
            || request.country.is_empty()
        {
            return Err(Error::validation(
                "merchant_trade_no, amount, currency and country are required",
            ));
        }
        let request = Request::post("/open-api/v3/acquiring/payments")
            .json(request)?
            .authenticated();
        self.http.execute(request).await
    }

    pub async fn cancel(&self, order_no: &str) -> Result<Payment, Error> {
        if order_no.is_empty() {
            return Err(Error::validation("order_no is required"));
        }
        let request = Request::post("/open-api/v3/acquiring/payments/cancel")
            .json(&CancelPaymentRequest {
                order_no: order_no.to_string(),
            })?
            .authenticated();
        self.http.execute(request).await
    }

    pub async fn create_refund(&self, request: &CreateRefundRequest) -> Result<Refund, Error> {
        if request.source_merchant_trade_no.is_empty()
            || request.merchant_trade_no.is_empty()
            || request.amount.is_empty()
        {
            return Err(Error::validation(
                "source_merchant_trade_no, merchant_trade_no and amount are required",
            ));
        }
        let request = Request::post("/open-api/v3/acquiring/refunds")
            .json(request)?
            .authenticated();
        self.http.execute(request).await
    }

    pub async fn query_payment(&self, order_no: &str) -> Result<Payment, Error> {
        if order_no.is_empty() {
            return Err(Error::validation("order_no must not be empty"));
        }
        let request = Request::get("/open-api/v3/acquiring/payments")
            .query("orderNo", order_no)
            .authenticated();
        self.http.execute(request).await
    }

    pub async fn query_refund(&self, order_no: &str) -> Result<Refund, Error> {
        if order_no.is_empty() {
            return Err(Error::validation("order_no must not be empty"));
        }
        let request = Request::get("/open-api/v3/acquiring/refunds")
            .query("orderNo", order_no)
            .authenticated();
        self.http.execute(request).await
    }

    /// Batch-search payments and refunds by order number.
    pub async fn search(&self, order_nos: &[String]) -> Result<SearchResult, Error> {
        if order_nos.is_empty() {
            return Err(Error::validation("order_nos must not be empty"));
        }
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body<'a> {
            order_nos: &'a [String],
        }
        let request = Request::post("/open-api/v3/acquiring/search")
            .json(&Body { order_nos })?
            .authenticated();
        self.http.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[tokio::test]
    async fn search_rejects_empty_order_list() {
        let api = PaymentsApi::new(Arc::new(HttpClient::new(&Config::sandbox()).unwrap()));
        let err = api.search(&[]).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn search_result_tolerates_missing_sections() {
        let result: SearchResult = serde_json::from_str(r#"{"payments":[]}"#).unwrap();
        assert!(result.payments.is_empty());
        assert!(result.refunds.is_empty());
    }
}
