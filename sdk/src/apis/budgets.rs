//! Budgets: named spending pools that fund budget cards.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::client::{HttpClient, Request};
use crate::error::Error;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: String,
    pub account_id: String,
    pub name: String,
    pub currency: String,
    #[serde(default)]
    pub balance: f64,
    #[serde(default)]
    pub available_balance: f64,
    #[serde(default)]
    pub pending_balance: f64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub card_count: u32,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BudgetList {
    #[serde(default)]
    pub list: Vec<Budget>,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBudgetRequest {
    pub account_id: String,
    pub name: String,
    pub currency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub init_balance: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBudgetRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// Result of an increase or decrease of a budget's balance.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetBalanceChange {
    pub id: String,
    pub budget_id: String,
    pub amount: f64,
    pub currency: String,
    #[serde(default)]
    pub r#type: String,
    pub status: String,
    #[serde(default)]
    pub merchant_trade_no: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub balance_before: f64,
    #[serde(default)]
    pub balance_after: f64,
    #[serde(default)]
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetRemoval {
    pub id: String,
    #[serde(default)]
    pub message: String,
    pub success: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetTransaction {
    pub id: String,
    pub budget_id: String,
    #[serde(default)]
    pub r#type: String,
    pub amount: f64,
    pub currency: String,
    pub status: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub merchant_trade_no: String,
    #[serde(default)]
    pub balance_before: f64,
    #[serde(default)]
    pub balance_after: f64,
    #[serde(default)]
    pub card_id: String,
    #[serde(default)]
    pub cardholder_id: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BudgetTransactionList {
    #[serde(default)]
    pub list: Vec<BudgetTransaction>,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
}

#[derive(Debug, Clone, Default)]
pub struct BudgetListParams {
    pub account_id: Option<String>,
    pub status: Option<String>,
    pub limit: Option<u32>,
    pub page: Option<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct BudgetTransactionListParams {
    pub transaction_type: Option<String>,
    pub status: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub limit: Option<u32>,
    pub page: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct BalanceChangeBody<'a> {
    amount: f64,
    currency: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    merchant_trade_no: Option<&'a str>,
}

#[derive(Debug)]
pub struct BudgetsApi {
    http: Arc<HttpClient>,
}

impl BudgetsApi {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    pub async fn create(&self, request: &CreateBudgetRequest) -> Result<Budget, Error> {
        if request.account_id.is_empty() || request.name.is_empty() || request.currency.is_empty() {
            return Err(Error::validation(
                "account_id, name and currency are required",
            ));
        }
        let request = Request::post("/open-api/v3/budgets")
            .json(request)?
            .authenticated();
        self.http.execute(request).await
    }

    pub async fn list(&self, params: BudgetListParams) -> Result<BudgetList, Error> {
        let mut request = Request::get("/open-api/v3/budgets").authenticated();
        if let Some(account_id) = &params.account_id {
            request = request.query("accountId", account_id);
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

    pub async fn get(&self, budget_id: &str) -> Result<Budget, Error> {
        let budget_id = require_budget_id(budget_id)?;
        let request = Request::get(format!("/open-api/v3/budgets/{budget_id}")).authenticated();
        self.http.execute(request).await
    }

    pub async fn update(
        &self,
        budget_id: &str,
        request: &UpdateBudgetRequest,
    ) -> Result<Budget, Error> {
        let budget_id = require_budget_id(budget_id)?;
        let request = Request::patch(format!("/open-api/v3/budgets/{budget_id}"))
            .json(request)?
            .authenticated();
        self.http.execute(request).await
    }

    pub async fn delete(&self, budget_id: &str) -> Result<BudgetRemoval, Error> {
        let budget_id = require_budget_id(budget_id)?;
        let request = Request::delete(format!("/open-api/v3/budgets/{budget_id}")).authenticated();
        self.http.execute(request).await
    }

    /// Top up a budget from the account balance.
    pub async fn increase_balance(
        &self,
        budget_id: &str,
        amount: f64,
        currency: &str,
        merchant_trade_no: Option<&str>,
    ) -> Result<BudgetBalanceChange, Error> {
        self.change_balance(budget_id, "increase", amount, currency, merchant_trade_no)
            .await
    }

    /// Withdraw from a budget back to the account balance.
    pub async fn decrease_balance(
        &self,
        budget_id: &str,
        amount: f64,
        currency: &str,
        merchant_trade_no: Option<&str>,
    ) -> Result<BudgetBalanceChange, Error> {
        self.change_balance(budget_id, "decrease", amount, currency, merchant_trade_no)
            .await
    }

    async fn change_balance(
        &self,
        budget_id: &str,
        direction: &str,
        amount: f64,
        currency: &str,
        merchant_trade_no: Option<&str>,
    ) -> Result<BudgetBalanceChange, Error> {
        let budget_id = require_budget_id(budget_id)?;
        if amount <= 0.0 {
            return Err(Error::validation("amount must be greater than 0"));
        }
        if currency.is_empty() {
            return Err(Error::validation("currency is required"));
        }
        let request = Request::post(format!("/open-api/v3/budgets/{budget_id}/{direction}"))
            .json(&BalanceChangeBody {
                amount,
                currency,
                merchant_trade_no,
            })?
            .authenticated();
        self.http.execute(request).await
    }

    pub async fn get_transaction(
        &self,
        budget_id: &str,
        transaction_id: &str,
    ) -> Result<BudgetTransaction, Error> {
        let budget_id = require_budget_id(budget_id)?;
        if transaction_id.is_empty() {
            return Err(Error::validation("transaction_id must not be empty"));
        }
        let request = Request::get(format!(
            "/open-api/v3/budgets/{budget_id}/transactions/{transaction_id}"
        ))
        .authenticated();
        self.http.execute(request).await
    }

    pub async fn list_transactions(
        &self,
        budget_id: &str,
        params: BudgetTransactionListParams,
    ) -> Result<BudgetTransactionList, Error> {
        let budget_id = require_budget_id(budget_id)?;
        let mut request =
            Request::get(format!("/open-api/v3/budgets/{budget_id}/transactions")).authenticated();
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

fn require_budget_id(budget_id: &str) -> Result<&str, Error> {
    if budget_id.is_empty() {
        return Err(Error::validation("budget_id must not be empty"));
    }
    Ok(budget_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn api() -> BudgetsApi {
        BudgetsApi::new(Arc::new(HttpClient::new(&Config::sandbox()).unwrap()))
    }

    #[tokio::test]
    async fn balance_change_rejects_zero_amount() {
        let err = api()
            .increase_balance("b_1", 0.0, "USD", None)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("greater than 0"));
    }

    #[tokio::test]
    async fn create_requires_currency() {
        let request = CreateBudgetRequest {
            account_id: "acc_1".into(),
            name: "marketing".into(),
            currency: String::new(),
            description: None,
            init_balance: None,
        };
        let err = api().create(&request).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
