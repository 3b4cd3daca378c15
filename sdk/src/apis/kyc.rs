//! KYC submission, status polling, and customer due diligence detail.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::client::{HttpClient, Request};
use crate::error::Error;
use crate::response::Envelope;

pub const KYC_STATUS_PENDING: &str = "PENDING";
pub const KYC_STATUS_APPROVED: &str = "APPROVED";
pub const KYC_STATUS_REJECTED: &str = "REJECTED";
pub const KYC_STATUS_EXPIRED: &str = "EXPIRED";

/// Identity submission for an individual account. Dates are `YYYY-MM-DD`;
/// countries are ISO 3166-1 alpha-2 codes; file ids come from
/// [`FilesApi::upload`](super::FilesApi::upload).
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitKycRequest {
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    pub date_of_birth: String,
    /// `M` or `F`.
    pub gender: String,
    pub nationality: String,
    pub country_of_residence: String,
    pub address: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub postal_code: String,
    pub country: String,
    pub id_type: String,
    pub id_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_expiry_date: Option<String>,
    pub occupation: String,
    pub source_of_income: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annual_income: Option<String>,
    pub purpose_of_account: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_txn_volume: Option<String>,
    pub id_front_image_file_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_back_image_file_id: Option<String>,
    pub selfie_image_file_id: String,
}

impl SubmitKycRequest {
    /// Checks that every field the endpoint requires is populated, so a
    /// half-built submission fails before leaving the process.
    pub fn validate(&self) -> Result<(), Error> {
        let required = [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("date_of_birth", &self.date_of_birth),
            ("gender", &self.gender),
            ("nationality", &self.nationality),
            ("country_of_residence", &self.country_of_residence),
            ("address", &self.address),
            ("city", &self.city),
            ("postal_code", &self.postal_code),
            ("country", &self.country),
            ("id_type", &self.id_type),
            ("id_number", &self.id_number),
            ("occupation", &self.occupation),
            ("source_of_income", &self.source_of_income),
            ("purpose_of_account", &self.purpose_of_account),
            ("id_front_image_file_id", &self.id_front_image_file_id),
            ("selfie_image_file_id", &self.selfie_image_file_id),
        ];
        for (name, value) in required {
            if value.is_empty() {
                return Err(Error::validation(format!("{name} is required")));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycSubmission {
    pub kyc_application_id: String,
    pub status: String,
    #[serde(default)]
    pub submitted_time: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KycStatus {
    pub account_id: String,
    #[serde(default)]
    pub kyc_application_id: String,
    pub status: String,
    #[serde(default)]
    pub submitted_time: Option<String>,
    #[serde(default)]
    pub reviewed_time: Option<String>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub expiry_time: Option<String>,
}

impl KycStatus {
    pub fn is_approved(&self) -> bool {
        self.status == KYC_STATUS_APPROVED
    }

    pub fn is_pending(&self) -> bool {
        self.status == KYC_STATUS_PENDING
    }
}

/// Summary of one verification track (KYC or KYB) inside a CDD report.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationDetail {
    pub application_id: String,
    pub status: String,
    #[serde(default)]
    pub submitted_time: String,
    #[serde(default)]
    pub reviewed_time: Option<String>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub risk_assessment: Option<RiskAssessment>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    /// LOW, MEDIUM, or HIGH.
    pub risk_level: String,
    #[serde(default)]
    pub risk_score: i32,
    #[serde(default)]
    pub factors: Vec<String>,
}

/// Customer due diligence report covering both the individual (KYC) and
/// business (KYB) verification tracks.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CddDetail {
    pub account_id: String,
    #[serde(default)]
    pub kyc_verification: Option<VerificationDetail>,
    #[serde(default)]
    pub kyb_verification: Option<VerificationDetail>,
    pub overall_status: String,
    #[serde(default)]
    pub last_updated: String,
}

impl CddDetail {
    /// Risk assessment from whichever track carries one, KYC first.
    pub fn risk_assessment(&self) -> Option<&RiskAssessment> {
        self.kyc_verification
            .as_ref()
            .and_then(|detail| detail.risk_assessment.as_ref())
            .or_else(|| {
                self.kyb_verification
                    .as_ref()
                    .and_then(|detail| detail.risk_assessment.as_ref())
            })
    }
}

#[derive(Debug)]
pub struct KycApi {
    http: Arc<HttpClient>,
}

impl KycApi {
    pub(crate) fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    /// Submit KYC information for an account.
    pub async fn submit(
        &self,
        account_id: &str,
        request: &SubmitKycRequest,
    ) -> Result<KycSubmission, Error> {
        if account_id.is_empty() {
            return Err(Error::validation("account_id must not be empty"));
        }
        request.validate()?;
        let request = Request::post(format!("/open-api/v3/accounts/{account_id}/kyc"))
            .json(request)?
            .authenticated();
        let envelope: Envelope<KycSubmission> = self.http.execute(request).await?;
        envelope.into_data()
    }

    /// Fetch the current KYC status of an account.
    pub async fn status(&self, account_id: &str) -> Result<KycStatus, Error> {
        if account_id.is_empty() {
            return Err(Error::validation("account_id must not be empty"));
        }
        let request =
            Request::get(format!("/open-api/v3/accounts/{account_id}/kyc")).authenticated();
        let envelope: Envelope<KycStatus> = self.http.execute(request).await?;
        envelope.into_data()
    }

    pub async fn is_approved(&self, account_id: &str) -> Result<bool, Error> {
        Ok(self.status(account_id).await?.is_approved())
    }

    /// Fetch the full customer due diligence report for an account.
    pub async fn cdd_detail(&self, account_id: &str) -> Result<CddDetail, Error> {
        if account_id.is_empty() {
            return Err(Error::validation("account_id must not be empty"));
        }
        let request = Request::get(format!("/open-api/v3/accounts/cdd/detail/{account_id}"))
            .authenticated();
        let envelope: Envelope<CddDetail> = self.http.execute(request).await?;
        envelope.into_data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> SubmitKycRequest {
        SubmitKycRequest {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            date_of_birth: "1990-01-01".into(),
            gender: "F".into(),
            nationality: "GB".into(),
            country_of_residence: "GB".into(),
            address: "1 Example St".into(),
            city: "London".into(),
            postal_code: "E1 1AA".into(),
            country: "GB".into(),
            id_type: "PASSPORT".into(),
            id_number: "X1234567".into(),
            occupation: "ENGINEER".into(),
            source_of_income: "SALARY".into(),
            purpose_of_account: "PERSONAL".into(),
            id_front_image_file_id: "file_front".into(),
            selfie_image_file_id: "file_selfie".into(),
            ..Default::default()
        }
    }

    #[test]
    fn complete_submission_validates() {
        assert!(filled().validate().is_ok());
    }

    #[test]
    fn missing_selfie_is_rejected() {
        let mut request = filled();
        request.selfie_image_file_id.clear();
        let err = request.validate().unwrap_err();
        assert!(err.to_string().contains("selfie_image_file_id"));
    }

    #[test]
    fn optional_fields_are_omitted_from_json() {
        let body = serde_json::to_value(filled()).unwrap();
        assert!(body.get("middleName").is_none());
        assert_eq!(body["idFrontImageFileId"], "file_front");
    }

    #[test]
    fn risk_assessment_prefers_kyc_track() {
        let detail: CddDetail = serde_json::from_str(
            r#"{
                "accountId": "acc_1",
                "overallStatus": "APPROVED",
                "kycVerification": {
                    "applicationId": "kyc_1",
                    "status": "APPROVED",
                    "riskAssessment": {"riskLevel": "LOW", "riskScore": 10}
                },
                "kybVerification": {
                    "applicationId": "kyb_1",
                    "status": "APPROVED",
                    "riskAssessment": {"riskLevel": "HIGH", "riskScore": 90}
                }
            }"#,
        )
        .unwrap();
        assert_eq!(detail.risk_assessment().unwrap().risk_level, "LOW");
    }
}
