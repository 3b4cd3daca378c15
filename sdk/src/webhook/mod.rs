//! Inbound webhook verification and dispatch.
//!
//! The API signs every webhook delivery with HMAC-SHA256 over the raw body,
//! hex-encoded, in the [`SIGNATURE_HEADER`] header. This module is
//! framework-agnostic: hand [`WebhookRouter::handle`] the raw body bytes and
//! the signature header value from whatever HTTP server receives the POST.

mod event;
mod router;
mod signature;

pub use event::{EventKind, WebhookEvent};
pub use router::{Ack, WebhookRouter};
pub use signature::{sign, verify};

/// Header carrying the hex-encoded HMAC-SHA256 signature.
pub const SIGNATURE_HEADER: &str = "X-Interlace-Signature";
