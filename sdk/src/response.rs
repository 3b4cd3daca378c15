//! The generic response envelope.
//!
//! Most v3 endpoints wrap their payload in `{code, message, data}` and signal
//! business-level failure through `code` rather than the HTTP status. The
//! payload type is a parameter bound at the call site, so each endpoint keeps
//! its concrete shape at compile time.

use serde::Deserialize;

use crate::error::{ApiError, Error};

/// Code the API uses for a successful envelope.
pub const SUCCESS_CODE: &str = "000000";

/// A `{code, message, data}` response wrapper.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    /// `"000000"` on success, a failure code otherwise.
    pub code: String,
    /// Human-readable companion to `code`.
    #[serde(default)]
    pub message: String,
    /// The endpoint-specific payload.
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Whether the envelope carries the success code.
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// Unwraps the payload, converting a failure code into [`Error::Api`].
    ///
    /// ## Errors
    ///
    /// [`Error::Api`] when `code` is not `"000000"`, and
    /// [`Error::EmptyEnvelope`] when the server claims success but sent no
    /// `data`.
    pub fn into_data(self) -> Result<T, Error> {
        if !self.is_success() {
            return Err(ApiError {
                code: self.code,
                message: self.message,
            }
            .into());
        }
        self.data.ok_or(Error::EmptyEnvelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Payload {
        id: String,
    }

    #[test]
    fn success_envelope_yields_data() {
        let envelope: Envelope<Payload> =
            serde_json::from_str(r#"{"code":"000000","message":"ok","data":{"id":"acc_1"}}"#).unwrap();
        assert!(envelope.is_success());
        assert_eq!(envelope.into_data().unwrap(), Payload { id: "acc_1".into() });
    }

    #[test]
    fn failure_code_becomes_api_error() {
        let envelope: Envelope<Payload> =
            serde_json::from_str(r#"{"code":"400001","message":"duplicate phone","data":null}"#).unwrap();
        match envelope.into_data() {
            Err(Error::Api(api)) => {
                assert_eq!(api.code, "400001");
                assert_eq!(api.message, "duplicate phone");
            }
            other => panic!("expected ApiError, got {other:?}"),
        }
    }

    #[test]
    fn success_without_data_is_empty_envelope() {
        let envelope: Envelope<Payload> =
            serde_json::from_str(r#"{"code":"000000","message":"ok"}"#).unwrap();
        assert!(matches!(envelope.into_data(), Err(Error::EmptyEnvelope)));
    }

    #[test]
    fn missing_message_defaults_to_empty() {
        let envelope: Envelope<Payload> = serde_json::from_str(r#"{"code":"500000"}"#).unwrap();
        assert_eq!(envelope.message, "");
    }
}
