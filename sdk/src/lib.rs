//! Rust SDK for the Interlace open API.
//!
//! The crate is organized around one [`HttpClient`] that owns the HTTP
//! connection pool, base URL, and access token, with typed resource clients
//! layered on top of it. [`Client`] bundles the whole surface:
//!
//! ```rust,no_run
//! use interlace_sdk::{Client, Config};
//!
//! # async fn run() -> Result<(), interlace_sdk::Error> {
//! let client = Client::new(Config::sandbox())?;
//! let token = client.authenticate("my-client-id").await?;
//! let accounts = client.accounts().list(Default::default()).await?;
//! println!("token expires in {}s, {} accounts", token.expires_in, accounts.list.len());
//! # Ok(())
//! # }
//! ```
//!
//! Webhook consumers verify and dispatch notifications with the
//! [`webhook`] module, without touching the HTTP client at all.

#![forbid(unsafe_code)]
#![deny(missing_debug_implementations)]

pub mod apis;
pub mod client;
pub mod config;
pub mod error;
pub mod response;
pub mod webhook;

pub use client::{Client, HttpClient, Request};
pub use config::Config;
pub use error::{ApiError, Error};
pub use response::Envelope;
