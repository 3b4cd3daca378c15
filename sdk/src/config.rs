//! SDK configuration.
//!
//! A [`Config`] describes everything the HTTP layer needs before the first
//! request goes out: base URL, user agent, per-call timeout, and the name of
//! the provider-specific header that carries the access token. The header
//! name is configuration data, not a constant baked into the executor, so a
//! gateway or test double can rename it without touching request code.

use std::time::Duration;

/// Base URL of the sandbox environment.
pub const SANDBOX_BASE_URL: &str = "https://api-sandbox.interlace.money";

/// Base URL of the production environment.
pub const PRODUCTION_BASE_URL: &str = "https://api.interlace.money";

/// Header the API expects the access token in. Not the standard
/// `Authorization` header.
pub const DEFAULT_AUTH_HEADER: &str = "x-access-token";

/// Default per-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent sent with every request.
const DEFAULT_USER_AGENT: &str = concat!("interlace-rust-sdk/", env!("CARGO_PKG_VERSION"));

/// Connection settings shared by every resource client.
///
/// ## Examples
///
/// ```rust,ignore
/// use interlace_sdk::Config;
/// use std::time::Duration;
///
/// let config = Config::sandbox()
///     .with_client_id("my-client-id")
///     .with_timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Absolute base URL all endpoint paths are joined onto.
    pub base_url: String,
    /// OAuth client id, required only for the token flow.
    pub client_id: Option<String>,
    /// Value of the `User-Agent` header.
    pub user_agent: String,
    /// Timeout applied to each HTTP call.
    pub timeout: Duration,
    /// Name of the header carrying the access token.
    pub auth_header: String,
}

impl Config {
    /// Configuration pointing at the sandbox environment.
    pub fn sandbox() -> Self {
        Self::with_base_url(SANDBOX_BASE_URL)
    }

    /// Configuration pointing at the production environment.
    pub fn production() -> Self {
        Self::with_base_url(PRODUCTION_BASE_URL)
    }

    /// Configuration for an arbitrary base URL, e.g. a mock server in tests
    /// or a gateway. A path prefix in the URL is kept: endpoint paths are
    /// appended under it rather than replacing it.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client_id: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            auth_header: DEFAULT_AUTH_HEADER.to_string(),
        }
    }

    /// Sets the OAuth client id used by [`Client::authenticate`].
    ///
    /// [`Client::authenticate`]: crate::Client::authenticate
    pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Overrides the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Overrides the `User-Agent` header value.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Overrides the name of the access token header.
    pub fn with_auth_header(mut self, auth_header: impl Into<String>) -> Self {
        self.auth_header = auth_header.into();
        self
    }
}

impl Default for Config {
    /// Defaults to the sandbox environment, matching the remote provider's
    /// own client libraries.
    fn default() -> Self {
        Self::sandbox()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sandbox_defaults() {
        let config = Config::sandbox();
        assert_eq!(config.base_url, SANDBOX_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.auth_header, "x-access-token");
        assert!(config.client_id.is_none());
        assert!(config.user_agent.starts_with("interlace-rust-sdk/"));
    }

    #[test]
    fn builder_overrides() {
        let config = Config::production()
            .with_client_id("cid_123")
            .with_timeout(Duration::from_secs(5))
            .with_auth_header("x-test-token");
        assert_eq!(config.base_url, PRODUCTION_BASE_URL);
        assert_eq!(config.client_id.as_deref(), Some("cid_123"));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.auth_header, "x-test-token");
    }

    #[test]
    fn default_is_sandbox() {
        assert_eq!(Config::default().base_url, Config::sandbox().base_url);
    }
}
