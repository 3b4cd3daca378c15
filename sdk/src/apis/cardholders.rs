//! Cardholder records for card issuance.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::client::{HttpClient, Request};
use crate::error::Error;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cardholder {
    pub id: String,
    pub account_id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub phone_country_code: String,
    #[serde(default)]
    pub date_of_birth: String,
    #[serde(default)]
    pub nationality: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CardholderList {
    #[serde(default)]
    pub list: Vec<Cardholder>,
    #[serde(default)]
    pub total: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardholderAddress {
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    pub line1: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityDocument {
    /// CN-RIC, HK-HKID, PASSPORT, DLN, and similar.
    pub r#type: String,
    pub number: String,
    pub issuing_country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCardholderRequest {
    pub account_id: String,
    pub bin_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub phone_country_code: String,
    pub date_of_birth: String,
    pub nationality: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<CardholderAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_document: Option<IdentityDocument>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCardholderRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_country_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<CardholderAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CardholderListParams {
    pub account_id: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug)]
pub struct CardholdersApi {
    http: Arc<HttpClient>,
}

impl CardholdersApi {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    pub async fn create(&self, request: &CreateCardholderRequest) -> Result<Cardholder, Error> {
        if request.account_id.is_empty()
            || request.bin_id.is_empty()
            || request.first_name.is_empty()
            || request.last_name.is_empty()
            || request.email.is_empty()
        {
            return Err(Error::validation(
                "account_id, bin_id, first_name, last_name and email are required",
            ));
        }
        let request = Request::post("/open-api/v3/cardholders")
            .json(request)?
            .authenticated();
        self.http.execute(request).await
    }

    pub async fn list(&self, params: CardholderListParams) -> Result<CardholderList, Error> {
        let mut request = Request::get("/open-api/v3/cardholders").authenticated();
        if let Some(account_id) = &params.account_id {
            request = request.query("accountId", account_id);
        }
        if let Some(page) = params.page {
            request = request.query("page", page);
        }
        if let Some(limit) = params.limit {
            request = request.query("limit", limit);
        }
        self.http.execute(request).await
    }

    pub async fn get(&self, cardholder_id: &str) -> Result<Cardholder, Error> {
        if cardholder_id.is_empty() {
            return Err(Error::validation("cardholder_id must not be empty"));
        }
        let request =
            Request::get(format!("/open-api/v3/cardholders/{cardholder_id}")).authenticated();
        self.http.execute(request).await
    }

    pub async fn update(
        &self,
        cardholder_id: &str,
        request: &UpdateCardholderRequest,
    ) -> Result<Cardholder, Error> {
        if cardholder_id.is_empty() {
            return Err(Error::validation("cardholder_id must not be empty"));
        }
        let request = Request::patch(format!("/open-api/v3/cardholders/{cardholder_id}"))
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
    async fn create_rejects_missing_bin() {
        let api = CardholdersApi::new(Arc::new(HttpClient::new(&Config::sandbox()).unwrap()));
        let request = CreateCardholderRequest {
            account_id: "acc_1".into(),
            bin_id: String::new(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            phone_number: "15900000031".into(),
            phone_country_code: "44".into(),
            date_of_birth: "1990-01-01".into(),
            nationality: "GB".into(),
            gender: None,
            occupation: None,
            address: None,
            identity_document: None,
            idempotency_key: None,
        };
        let err = api.create(&request).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn update_skips_unset_fields() {
        let body = serde_json::to_value(UpdateCardholderRequest {
            email: Some("new@example.com".into()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(body.as_object().unwrap().len(), 1);
        assert_eq!(body["email"], "new@example.com");
    }
}
