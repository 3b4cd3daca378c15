//! Layered error types for the SDK.
//!
//! The taxonomy separates "the remote rejected the business request"
//! ([`ApiError`], which carries a machine-readable code for caller branching)
//! from failures of the local transport and codec layers, which live on the
//! top-level [`Error`] enum. Nothing is retried or recovered inside the SDK;
//! every failure is returned to the immediate caller.

mod api_error;
mod sdk_error;

pub use api_error::{ApiError, PARSE_ERROR_CODE};
pub use sdk_error::Error;
