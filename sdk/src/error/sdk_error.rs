use thiserror::Error;

use super::ApiError;

/// All failure modes of the SDK.
///
/// Callers typically branch on [`Error::Api`] (the server explicitly rejected
/// the request and supplied a code) versus everything else (the request never
/// completed, or its payload did not match the expected shape).
#[derive(Debug, Error)]
pub enum Error {
    /// The base URL or endpoint path could not be composed into a valid URL.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A request body failed local JSON serialization.
    #[error("failed to encode request body: {0}")]
    Encoding(#[source] serde_json::Error),

    /// The request could not be delivered: connection, TLS, or timeout.
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server rejected the request with a structured error payload.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A response body did not match the expected shape.
    #[error("failed to decode response body: {0}")]
    Decoding(#[source] serde_json::Error),

    /// The server reported success but the envelope carried no `data` field.
    #[error("response envelope is missing its data field")]
    EmptyEnvelope,

    /// A webhook payload failed signature verification.
    #[error("webhook signature mismatch")]
    Signature,

    /// A local precondition check failed before any request was sent.
    #[error("{0}")]
    Validation(String),
}

impl Error {
    /// Shorthand used by resource clients for precondition failures.
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Returns the API error code when the failure came from the server.
    pub fn api_code(&self) -> Option<&str> {
        match self {
            Self::Api(api) => Some(&api.code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_code_only_for_api_errors() {
        let err: Error = ApiError {
            code: "400001".into(),
            message: "duplicate phone".into(),
        }
        .into();
        assert_eq!(err.api_code(), Some("400001"));
        assert_eq!(Error::validation("bad input").api_code(), None);
    }

    #[test]
    fn validation_displays_message_verbatim() {
        assert_eq!(Error::validation("card ID is required").to_string(), "card ID is required");
    }
}
