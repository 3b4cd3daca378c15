//! Card issuance and lifecycle management.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::client::{HttpClient, Request};
use crate::error::Error;

/// Most cards the batch-create endpoints accept in one call.
const MAX_BATCH_CARDS: usize = 100;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub account_id: String,
    #[serde(default)]
    pub card_type: String,
    #[serde(default)]
    pub card_status: String,
    #[serde(default)]
    pub card_bin: String,
    #[serde(default, rename = "last4Digits")]
    pub last_four: String,
    #[serde(default)]
    pub expiry_month: String,
    #[serde(default)]
    pub expiry_year: String,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub balance: Option<f64>,
    #[serde(default)]
    pub credit_limit: Option<f64>,
    #[serde(default)]
    pub available_limit: Option<f64>,
    #[serde(default)]
    pub is_physical: bool,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub cardholder_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardList {
    #[serde(default)]
    pub cards: Vec<Card>,
    #[serde(default)]
    pub total_count: u32,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub has_more: bool,
}

/// Sensitive card detail. `card_number` and `cvv` arrive AES-encrypted with
/// the client secret; decryption is up to the caller.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPrivateInfo {
    pub id: String,
    pub card_number: String,
    pub cvv: String,
    #[serde(default)]
    pub expiry_month: String,
    #[serde(default)]
    pub expiry_year: String,
    #[serde(default)]
    pub cardholder_name: String,
    #[serde(default)]
    pub card_bin: String,
    #[serde(default, rename = "last4Digits")]
    pub last_four: String,
    #[serde(default)]
    pub card_status: String,
    #[serde(default)]
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRemoval {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub card_id: String,
    #[serde(default)]
    pub removed_at: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSummary {
    pub card_id: String,
    #[serde(default)]
    pub available_balance: f64,
    #[serde(default)]
    pub current_balance: f64,
    #[serde(default)]
    pub pending_transactions: f64,
    #[serde(default)]
    pub daily_spending_limit: f64,
    #[serde(default)]
    pub monthly_spending_limit: f64,
    #[serde(default)]
    pub single_trans_limit: f64,
    #[serde(default)]
    pub spent_today: f64,
    #[serde(default)]
    pub spent_this_month: f64,
}

/// Per-card transaction limits. `None` leaves a limit unchanged.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VelocityControl {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_spending_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_trans_limit: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePrepaidCardRequest {
    pub bin_id: String,
    pub cardholder_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_spending_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_trans_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_spending_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub three_d_secure_auth_required: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBudgetCardRequest {
    pub bin_id: String,
    pub cardholder_id: String,
    pub budget_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_spending_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_trans_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_spending_limit: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCardRequest {
    pub card_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_spending_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub single_trans_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_spending_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub three_d_secure_auth_required: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CardBatch {
    #[serde(default)]
    pub list: Vec<Card>,
    #[serde(default)]
    pub total: u32,
}

#[derive(Debug, Clone, Default)]
pub struct CardListParams {
    pub account_id: Option<String>,
    pub card_status: Option<String>,
    pub card_type: Option<String>,
    pub is_active: Option<bool>,
    pub limit: Option<u32>,
    pub page: Option<u32>,
}

#[derive(Debug)]
pub struct CardsApi {
    http: Arc<HttpClient>,
}

impl CardsApi {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    pub async fn list(&self, params: CardListParams) -> Result<CardList, Error> {
        let mut request = Request::get("/open-api/v3/card-list").authenticated();
        if let Some(account_id) = &params.account_id {
            request = request.query("accountId", account_id);
        }
        if let Some(card_status) = &params.card_status {
            request = request.query("cardStatus", card_status);
        }
        if let Some(card_type) = &params.card_type {
            request = request.query("cardType", card_type);
        }
        if let Some(is_active) = params.is_active {
            request = request.query("isActive", is_active);
        }
        if let Some(limit) = params.limit {
            request = request.query("limit", limit);
        }
        if let Some(page) = params.page {
            request = request.query("page", page);
        }
        self.http.execute(request).await
    }

    /// Fetch the sensitive card detail (encrypted PAN and CVV).
    pub async fn private_info(&self, card_id: &str) -> Result<CardPrivateInfo, Error> {
        let card_id = non_empty(card_id)?;
        let request = Request::get(format!("/open-api/v3/cards/{card_id}")).authenticated();
        self.http.execute(request).await
    }

    pub async fn remove(&self, card_id: &str) -> Result<CardRemoval, Error> {
        let card_id = non_empty(card_id)?;
        let request = Request::delete(format!("/open-api/v3/cards/{card_id}")).authenticated();
        self.http.execute(request).await
    }

    pub async fn freeze(&self, card_id: &str) -> Result<Card, Error> {
        let card_id = non_empty(card_id)?;
        let request = Request::post(format!("/open-api/v3/cards/{card_id}/freeze")).authenticated();
        self.http.execute(request).await
    }

    pub async fn unfreeze(&self, card_id: &str) -> Result<Card, Error> {
        let card_id = non_empty(card_id)?;
        let request =
            Request::post(format!("/open-api/v3/cards/{card_id}/unfreeze")).authenticated();
        self.http.execute(request).await
    }

    /// Replace the card's transaction limits.
    pub async fn set_velocity_control(
        &self,
        card_id: &str,
        control: &VelocityControl,
    ) -> Result<Card, Error> {
        let card_id = non_empty(card_id)?;
        let request = Request::put(format!("/open-api/v3/cards/{card_id}/velocity-control"))
            .json(control)?
            .authenticated();
        self.http.execute(request).await
    }

    pub async fn create_prepaid(&self, request: &CreatePrepaidCardRequest) -> Result<Card, Error> {
        if request.bin_id.is_empty() || request.cardholder_id.is_empty() {
            return Err(Error::validation("bin_id and cardholder_id are required"));
        }
        let request = Request::post("/open-api/v3/prepaid-card")
            .json(request)?
            .authenticated();
        self.http.execute(request).await
    }

    /// Create up to 100 prepaid cards in one call.
    pub async fn create_prepaid_batch(
        &self,
        cards: &[CreatePrepaidCardRequest],
    ) -> Result<CardBatch, Error> {
        check_batch_size(cards.len())?;
        #[derive(Serialize)]
        struct Body<'a> {
            cards: &'a [CreatePrepaidCardRequest],
        }
        let request = Request::post("/open-api/v3/prepaid-cards")
            .json(&Body { cards })?
            .authenticated();
        self.http.execute(request).await
    }

    pub async fn create_budget_card(
        &self,
        request: &CreateBudgetCardRequest,
    ) -> Result<Card, Error> {
        if request.bin_id.is_empty() || request.cardholder_id.is_empty() {
            return Err(Error::validation("bin_id and cardholder_id are required"));
        }
        if request.budget_id.is_empty() {
            return Err(Error::validation("budget_id is required"));
        }
        let request = Request::post("/open-api/v3/budget-card")
            .json(request)?
            .authenticated();
        self.http.execute(request).await
    }

    pub async fn create_budget_card_batch(
        &self,
        cards: &[CreateBudgetCardRequest],
    ) -> Result<CardBatch, Error> {
        check_batch_size(cards.len())?;
        #[derive(Serialize)]
        struct Body<'a> {
            cards: &'a [CreateBudgetCardRequest],
        }
        let request = Request::post("/open-api/v3/budget-cards")
            .json(&Body { cards })?
            .authenticated();
        self.http.execute(request).await
    }

    pub async fn summary(&self, card_id: &str) -> Result<CardSummary, Error> {
        let card_id = non_empty(card_id)?;
        let request =
            Request::get(format!("/open-api/v3/cards/{card_id}/card-summary")).authenticated();
        self.http.execute(request).await
    }

    pub async fn update(&self, request: &UpdateCardRequest) -> Result<Card, Error> {
        if request.card_id.is_empty() {
            return Err(Error::validation("card_id is required"));
        }
        let request = Request::put("/open-api/v3/card")
            .json(request)?
            .authenticated();
        self.http.execute(request).await
    }

    /// Bind a crypto wallet to a card so the card spends from it.
    pub async fn bind_wallet(&self, card_id: &str, wallet_id: &str) -> Result<Card, Error> {
        let card_id = non_empty(card_id)?;
        if wallet_id.is_empty() {
            return Err(Error::validation("wallet_id is required"));
        }
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Body<'a> {
            wallet_id: &'a str,
        }
        let request = Request::post(format!("/open-api/v3/cards/{card_id}/bind-wallet"))
            .json(&Body { wallet_id })?
            .authenticated();
        self.http.execute(request).await
    }
}

fn non_empty(card_id: &str) -> Result<&str, Error> {
    if card_id.is_empty() {
        return Err(Error::validation("card_id must not be empty"));
    }
    Ok(card_id)
}

fn check_batch_size(count: usize) -> Result<(), Error> {
    if count == 0 {
        return Err(Error::validation("cards list must not be empty"));
    }
    if count > MAX_BATCH_CARDS {
        return Err(Error::validation(format!(
            "cannot create more than {MAX_BATCH_CARDS} cards at once"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn api() -> CardsApi {
        CardsApi::new(Arc::new(HttpClient::new(&Config::sandbox()).unwrap()))
    }

    #[tokio::test]
    async fn empty_card_id_is_rejected_before_any_io() {
        let err = api().freeze("").await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn oversized_batch_is_rejected() {
        let card = CreatePrepaidCardRequest {
            bin_id: "bin_1".into(),
            cardholder_id: "ch_1".into(),
            shipping_address_id: None,
            label: None,
            daily_spending_limit: None,
            single_trans_limit: None,
            monthly_spending_limit: None,
            three_d_secure_auth_required: None,
        };
        let cards = vec![card; 101];
        let err = api().create_prepaid_batch(&cards).await.unwrap_err();
        assert!(err.to_string().contains("100"));
    }

    #[test]
    fn velocity_control_omits_unset_limits() {
        let body = serde_json::to_value(VelocityControl {
            daily_spending_limit: Some(500.0),
            single_trans_limit: None,
        })
        .unwrap();
        assert_eq!(body["dailySpendingLimit"], 500.0);
        assert!(body.get("singleTransLimit").is_none());
    }
}
