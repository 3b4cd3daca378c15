//! Card security operations.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::client::{HttpClient, Request};
use crate::error::Error;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePinRequest {
    pub card_id: String,
    pub new_pin: String,
    pub confirm_pin: String,
}

impl UpdatePinRequest {
    fn validate(&self) -> Result<(), Error> {
        if self.card_id.is_empty() {
            return Err(Error::validation("card_id is required"));
        }
        if self.new_pin.is_empty() || self.confirm_pin.is_empty() {
            return Err(Error::validation("new_pin and confirm_pin are required"));
        }
        if self.new_pin != self.confirm_pin {
            return Err(Error::validation("new_pin and confirm_pin must match"));
        }
        if self.new_pin.len() < 4 || self.new_pin.len() > 6 {
            return Err(Error::validation("pin must be 4-6 digits"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePinResult {
    pub card_id: String,
    pub status: String,
    #[serde(default)]
    pub updated_at: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug)]
pub struct SecurityApi {
    http: Arc<HttpClient>,
}

impl SecurityApi {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Change a card's PIN. The PIN never appears in logs; the request body
    /// is serialized once and handed straight to the transport.
    pub async fn update_pin(&self, request: &UpdatePinRequest) -> Result<UpdatePinResult, Error> {
        request.validate()?;
        let request = Request::post("/open-api/v3/card/update-pin")
            .json(request)?
            .authenticated();
        self.http.execute(request).await
    }
}
