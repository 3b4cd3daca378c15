//! Top-level client and the request execution layer.

mod executor;
mod request;

pub use executor::HttpClient;
pub use request::Request;

use std::sync::Arc;

use crate::apis::{
    AccountsApi, BudgetsApi, CardTransactionsApi, CardholdersApi, CardsApi, FilesApi, KycApi,
    OAuthApi, OAuthToken, PaymentsApi, PayoutsApi, SecurityApi, TransfersApi, WalletsApi,
};
use crate::config::Config;
use crate::error::Error;

/// Entry point of the SDK.
///
/// Owns one [`HttpClient`] and hands out resource clients that share it, so
/// an access token stored through any handle is used by all of them.
///
/// ## Examples
///
/// ```rust,ignore
/// use interlace_sdk::{Client, Config};
///
/// # async fn run() -> Result<(), interlace_sdk::Error> {
/// let client = Client::new(Config::sandbox().with_client_id("my-client-id"))?;
/// let token = client.authenticate("my-client-id").await?;
/// let accounts = client.accounts().list(Default::default()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    http: Arc<HttpClient>,
    client_id: Option<String>,
}

impl Client {
    /// Creates a client from a [`Config`].
    pub fn new(config: Config) -> Result<Self, Error> {
        Ok(Self {
            http: Arc::new(HttpClient::new(&config)?),
            client_id: config.client_id,
        })
    }

    /// Creates a sandbox client with default settings.
    pub fn sandbox() -> Result<Self, Error> {
        Self::new(Config::sandbox())
    }

    /// Creates a client with an access token already in place.
    pub fn with_token(config: Config, token: impl Into<String>) -> Result<Self, Error> {
        let client = Self::new(config)?;
        client.set_access_token(token);
        Ok(client)
    }

    /// The shared HTTP executor, for callers that need raw requests.
    pub fn http(&self) -> &Arc<HttpClient> {
        &self.http
    }

    /// The OAuth client id from the configuration, if one was set.
    pub fn client_id(&self) -> Option<&str> {
        self.client_id.as_deref()
    }

    /// Stores an access token for all subsequent authenticated requests.
    pub fn set_access_token(&self, token: impl Into<String>) {
        self.http.set_access_token(token);
    }

    /// Returns the current access token, if any.
    pub fn access_token(&self) -> Option<String> {
        self.http.access_token()
    }

    /// Whether an access token is currently stored.
    pub fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }

    /// Runs the full OAuth flow (authorize, then token exchange) and stores
    /// the resulting access token.
    pub async fn authenticate(&self, client_id: &str) -> Result<OAuthToken, Error> {
        let token = self.oauth().authorize_and_token(client_id).await?;
        self.set_access_token(token.access_token.clone());
        Ok(token)
    }

    /// OAuth authorization and token endpoints.
    pub fn oauth(&self) -> OAuthApi {
        OAuthApi::new(Arc::clone(&self.http))
    }

    /// Account registration and listing.
    pub fn accounts(&self) -> AccountsApi {
        AccountsApi::new(Arc::clone(&self.http))
    }

    /// Document upload.
    pub fn files(&self) -> FilesApi {
        FilesApi::new(Arc::clone(&self.http))
    }

    /// KYC submission, status, and CDD detail.
    pub fn kyc(&self) -> KycApi {
        KycApi::new(Arc::clone(&self.http))
    }

    /// Card lifecycle operations.
    pub fn cards(&self) -> CardsApi {
        CardsApi::new(Arc::clone(&self.http))
    }

    /// Card balance transfers and transaction history.
    pub fn card_transactions(&self) -> CardTransactionsApi {
        CardTransactionsApi::new(Arc::clone(&self.http))
    }

    /// Cardholder management.
    pub fn cardholders(&self) -> CardholdersApi {
        CardholdersApi::new(Arc::clone(&self.http))
    }

    /// Crypto wallet management.
    pub fn wallets(&self) -> WalletsApi {
        WalletsApi::new(Arc::clone(&self.http))
    }

    /// Blockchain transfers and KYT lookups.
    pub fn transfers(&self) -> TransfersApi {
        TransfersApi::new(Arc::clone(&self.http))
    }

    /// Acquiring payments and refunds.
    pub fn payments(&self) -> PaymentsApi {
        PaymentsApi::new(Arc::clone(&self.http))
    }

    /// Payees and exchange rates.
    pub fn payouts(&self) -> PayoutsApi {
        PayoutsApi::new(Arc::clone(&self.http))
    }

    /// Spend budgets.
    pub fn budgets(&self) -> BudgetsApi {
        BudgetsApi::new(Arc::clone(&self.http))
    }

    /// Card PIN management.
    pub fn security(&self) -> SecurityApi {
        SecurityApi::new(Arc::clone(&self.http))
    }
}
