//! End-to-end walkthrough: authorize, list accounts, create a wallet.
//!
//! ```sh
//! INTERLACE_CLIENT_ID=your-client-id cargo run --example basic_usage
//! ```

use interlace_sdk::apis::{AccountListParams, CreateWalletRequest};
use interlace_sdk::{Client, Config, Error};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let client_id = std::env::var("INTERLACE_CLIENT_ID")?;
    let client = Client::new(Config::sandbox().with_client_id(&client_id))?;

    let token = client.authenticate(&client_id).await?;
    println!("authenticated, token expires in {}s", token.expires_in);

    let accounts = client.accounts().list(AccountListParams::default()).await?;
    println!("{} account(s), total {}", accounts.list.len(), accounts.total);

    let Some(account) = accounts.list.first() else {
        println!("no accounts yet; register one first");
        return Ok(());
    };

    let wallet = client
        .wallets()
        .create(&CreateWalletRequest {
            account_id: account.id.clone(),
            nickname: Some("treasury".into()),
            idempotency_key: format!("demo-wallet-{}", account.id),
        })
        .await;

    match wallet {
        Ok(wallet) => println!("created wallet {}", wallet.id),
        Err(Error::Api(api)) => println!("wallet creation rejected: {api}"),
        Err(other) => return Err(other.into()),
    }

    Ok(())
}
