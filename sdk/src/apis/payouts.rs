//! Cross-border payouts: rates, payees, quotations, and payout orders.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::client::{HttpClient, Request};
use crate::error::Error;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRate {
    pub source_currency: String,
    pub target_currency: String,
    pub rate: f64,
    #[serde(default)]
    pub inverse_rate: f64,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub converted_amount: f64,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub valid_until: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payee {
    pub id: String,
    pub account_id: String,
    pub beneficiary_name: String,
    #[serde(default)]
    pub bank_name: String,
    #[serde(default)]
    pub bank_code: String,
    #[serde(default)]
    pub bank_country: String,
    #[serde(default)]
    pub account_number: String,
    #[serde(default)]
    pub iban: String,
    #[serde(default)]
    pub swift_code: String,
    #[serde(default)]
    pub routing_number: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub beneficiary_type: String,
    #[serde(default)]
    pub beneficiary_address: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PayeeList {
    #[serde(default)]
    pub list: Vec<Payee>,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePayeeRequest {
    pub account_id: String,
    pub beneficiary_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_code: Option<String>,
    pub bank_country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iban: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swift_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing_number: Option<String>,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beneficiary_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beneficiary_address: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payout {
    pub id: String,
    pub account_id: String,
    pub payee_id: String,
    pub source_currency: String,
    pub source_amount: f64,
    pub target_currency: String,
    #[serde(default)]
    pub target_amount: f64,
    #[serde(default)]
    pub exchange_rate: f64,
    #[serde(default)]
    pub fee: f64,
    pub status: String,
    #[serde(default)]
    pub reference: String,
    #[serde(default)]
    pub merchant_trade_no: String,
    #[serde(default)]
    pub failure_reason: String,
    #[serde(default)]
    pub quotation_id: String,
    #[serde(default)]
    pub estimated_arrival: String,
    #[serde(default)]
    pub completed_at: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PayoutList {
    #[serde(default)]
    pub list: Vec<Payout>,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePayoutRequest {
    pub account_id: String,
    pub payee_id: String,
    pub source_currency: String,
    pub source_amount: f64,
    pub target_currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_trade_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quotation_id: Option<String>,
}

/// A locked-in rate offer, valid until `valid_until`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quotation {
    pub id: String,
    pub account_id: String,
    pub source_currency: String,
    pub source_amount: f64,
    pub target_currency: String,
    #[serde(default)]
    pub target_amount: f64,
    #[serde(default)]
    pub rate: f64,
    #[serde(default)]
    pub fee: f64,
    #[serde(default)]
    pub total_amount: f64,
    pub status: String,
    #[serde(default)]
    pub valid_until: String,
    #[serde(default)]
    pub estimated_arrival: String,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuotationRequest {
    pub account_id: String,
    pub source_currency: String,
    pub source_amount: f64,
    pub target_currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payee_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayoutCancellation {
    pub id: String,
    pub status: String,
    #[serde(default)]
    pub message: String,
    pub success: bool,
}

#[derive(Debug, Clone, Default)]
pub struct PayeeListParams {
    pub account_id: Option<String>,
    pub currency: Option<String>,
    pub status: Option<String>,
    pub limit: Option<u32>,
    pub page: Option<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct PayoutListParams {
    pub account_id: Option<String>,
    pub payee_id: Option<String>,
    pub status: Option<String>,
    pub source_currency: Option<String>,
    pub target_currency: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub limit: Option<u32>,
    pub page: Option<u32>,
}

#[derive(Debug)]
pub struct PayoutsApi {
    http: Arc<HttpClient>,
}

impl PayoutsApi {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Current conversion rate between two currencies. Pass an amount above
    /// zero to also get the converted total.
    pub async fn exchange_rate(
        &self,
        source_currency: &str,
        target_currency: &str,
        amount: Option<f64>,
    ) -> Result<ExchangeRate, Error> {
        if source_currency.is_empty() || target_currency.is_empty() {
            return Err(Error::validation(
                "source_currency and target_currency are required",
            ));
        }
        let mut request = Request::get("/open-api/v3/payment/rate")
            .query("sourceCurrency", source_currency)
            .query("targetCurrency", target_currency)
            .authenticated();
        if let Some(amount) = amount.filter(|amount| *amount > 0.0) {
            request = request.query("amount", format!("{amount:.2}"));
        }
        self.http.execute(request).await
    }

    pub async fn create_payee(&self, request: &CreatePayeeRequest) -> Result<Payee, Error> {
        if request.account_id.is_empty()
            || request.beneficiary_name.is_empty()
            || request.bank_country.is_empty()
            || request.currency.is_empty()
        {
            return Err(Error::validation(
                "account_id, beneficiary_name, bank_country and currency are required",
            ));
        }
        let request = Request::post("/open-api/v3/payee")
            .json(request)?
            .authenticated();
        self.http.execute(request).await
    }

    pub async fn get_payee(&self, payee_id: &str) -> Result<Payee, Error> {
        if payee_id.is_empty() {
            return Err(Error::validation("payee_id must not be empty"));
        }
        let request =
            Request::get(format!("/open-api/v3/payee/{payee_id}/detail")).authenticated();
        self.http.execute(request).await
    }

    pub async fn list_payees(&self, params: PayeeListParams) -> Result<PayeeList, Error> {
        let mut request = Request::get("/open-api/v3/payees").authenticated();
        if let Some(account_id) = &params.account_id {
            request = request.query("accountId", account_id);
        }
        if let Some(currency) = &params.currency {
            request = request.query("currency", currency);
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

    pub async fn create(&self, request: &CreatePayoutRequest) -> Result<Payout, Error> {
        if request.account_id.is_empty()
            || request.payee_id.is_empty()
            || request.source_currency.is_empty()
            || request.target_currency.is_empty()
        {
            return Err(Error::validation(
                "account_id, payee_id, source_currency and target_currency are required",
            ));
        }
        if request.source_amount <= 0.0 {
            return Err(Error::validation("source_amount must be greater than 0"));
        }
        let request = Request::post("/open-api/v3/payment")
            .json(request)?
            .authenticated();
        self.http.execute(request).await
    }

    pub async fn get(&self, payout_id: &str) -> Result<Payout, Error> {
        if payout_id.is_empty() {
            return Err(Error::validation("payout_id must not be empty"));
        }
        let request =
            Request::get(format!("/open-api/v3/payment/{payout_id}/detail")).authenticated();
        self.http.execute(request).await
    }

    pub async fn list(&self, params: PayoutListParams) -> Result<PayoutList, Error> {
        let mut request = Request::get("/open-api/v3/payments").authenticated();
        if let Some(account_id) = &params.account_id {
            request = request.query("accountId", account_id);
        }
        if let Some(payee_id) = &params.payee_id {
            request = request.query("payeeId", payee_id);
        }
        if let Some(status) = &params.status {
            request = request.query("status", status);
        }
        if let Some(source_currency) = &params.source_currency {
            request = request.query("sourceCurrency", source_currency);
        }
        if let Some(target_currency) = &params.target_currency {
            request = request.query("targetCurrency", target_currency);
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

    /// Lock in a rate before committing to a payout.
    pub async fn create_quotation(
        &self,
        request: &CreateQuotationRequest,
    ) -> Result<Quotation, Error> {
        if request.account_id.is_empty()
            || request.source_currency.is_empty()
            || request.target_currency.is_empty()
        {
            return Err(Error::validation(
                "account_id, source_currency and target_currency are required",
            ));
        }
        if request.source_amount <= 0.0 {
            return Err(Error::validation("source_amount must be greater than 0"));
        }
        let request = Request::post("/open-api/v3/payment/quotation")
            .json(request)?
            .authenticated();
        self.http.execute(request).await
    }

    pub async fn get_quotation(&self, quotation_id: &str) -> Result<Quotation, Error> {
        if quotation_id.is_empty() {
            return Err(Error::validation("quotation_id must not be empty"));
        }
        let request = Request::get(format!("/open-api/v3/payment/quotation/{quotation_id}"))
            .authenticated();
        self.http.execute(request).await
    }

    /// Accept a quotation, turning it into a payout to `payee_id`.
    pub async fn accept_quotation(
        &self,
        quotation_id: &str,
        payee_id: &str,
        merchant_trade_no: Option<&str>,
    ) -> Result<Payout, Error> {
        if quotation_id.is_empty() {
            return Err(Error::validation("quotation_id must not be empty"));
        }
        if payee_id.is_empty() {
            return Err(Error::validation("payee_id is required"));
        }
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body<'a> {
            payee_id: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            merchant_trade_no: Option<&'a str>,
        }
        let request = Request::post(format!(
            "/open-api/v3/payment/quotation/{quotation_id}/accept"
        ))
        .json(&Body {
            payee_id,
            merchant_trade_no,
        })?
        .authenticated();
        self.http.execute(request).await
    }

    /// Cancel a payout that has not yet been dispatched.
    pub async fn cancel(&self, payout_id: &str) -> Result<PayoutCancellation, Error> {
        if payout_id.is_empty() {
            return Err(Error::validation("payout_id must not be empty"));
        }
        let request =
            Request::post(format!("/open-api/v3/payment/{payout_id}/cancel")).authenticated();
        self.http.execute(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn api() -> PayoutsApi {
        PayoutsApi::new(Arc::new(HttpClient::new(&Config::sandbox()).unwrap()))
    }

    #[tokio::test]
    async fn exchange_rate_requires_both_currencies() {
        let err = api().exchange_rate("USD", "", None).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn payout_amount_must_be_positive() {
        let request = CreatePayoutRequest {
            account_id: "acc_1".into(),
            payee_id: "payee_1".into(),
            source_currency: "USD".into(),
            source_amount: -5.0,
            target_currency: "EUR".into(),
            ..Default::default()
        };
        let err = api().create(&request).await.unwrap_err();
        assert!(err.to_string().contains("source_amount"));
    }
}
