use serde::Deserialize;
use thiserror::Error;

/// Code substituted when an error response body cannot be parsed.
pub const PARSE_ERROR_CODE: &str = "PARSE_ERROR";

/// A structured rejection returned by the remote server.
///
/// Produced whenever the HTTP status is 400 or above, regardless of the exact
/// status value: the API communicates the real failure through the `code`
/// field of its JSON body, not the status line. Business-level rejections
/// inside a 2xx envelope (non-`"000000"` codes) are converted to the same
/// type by [`Envelope::into_data`](crate::response::Envelope::into_data).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Error)]
#[error("api error {code}: {message}")]
pub struct ApiError {
    /// Machine-readable error code, e.g. `"400001"`.
    pub code: String,
    /// Human-readable description.
    pub message: String,
}

impl ApiError {
    /// Parses an error response body of the shape `{"code", "message", ...}`.
    ///
    /// A body that is not valid JSON of that shape yields a sentinel error
    /// with [`PARSE_ERROR_CODE`] so callers always receive an `ApiError` for
    /// a failed request, never a decoding failure.
    pub(crate) fn from_body(body: &[u8]) -> Self {
        #[derive(Deserialize)]
        struct ErrorBody {
            #[serde(default)]
            code: String,
            #[serde(default)]
            message: String,
        }

        match serde_json::from_slice::<ErrorBody>(body) {
            Ok(parsed) => Self {
                code: parsed.code,
                message: parsed.message,
            },
            Err(_) => Self {
                code: PARSE_ERROR_CODE.to_string(),
                message: "Failed to parse error response".to_string(),
            },
        }
    }
}
