//! Verified dispatch of webhook deliveries to registered handlers.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use super::event::{EventKind, WebhookEvent};
use super::signature;
use crate::error::Error;

/// Handler invoked for a matching event type.
pub type Handler = Box<dyn Fn(&WebhookEvent) -> Result<(), Error> + Send + Sync>;

/// Acknowledgment the receiving endpoint should answer with.
///
/// Serializes to the body the API expects: `{"status":"success"}` or
/// `{"status":"ignored"}`. An event type with no registered handler is
/// acknowledged as [`Ack::Ignored`] rather than failed, so the provider does
/// not redeliver events the application does not care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Ack {
    /// A handler ran successfully.
    #[serde(rename = "success")]
    Handled,
    /// No handler is registered for this event type.
    Ignored,
}

/// Routes verified webhook deliveries to per-event-type handlers.
///
/// ## Examples
///
/// ```rust,ignore
/// use interlace_sdk::webhook::{EventKind, WebhookRouter};
///
/// let router = WebhookRouter::new("whsec_...")
///     .on_kind(EventKind::CardCreated, |event| {
///         println!("card created: {}", event.data["cardId"]);
///         Ok(())
///     });
///
/// let ack = router.handle(&body_bytes, signature_header)?;
/// ```
pub struct WebhookRouter {
    secret: String,
    handlers: HashMap<String, Handler>,
}

impl fmt::Debug for WebhookRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut registered: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        registered.sort_unstable();
        f.debug_struct("WebhookRouter")
            .field("registered", &registered)
            .finish()
    }
}

impl WebhookRouter {
    /// Creates a router with the shared webhook secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            handlers: HashMap::new(),
        }
    }

    /// Registers a handler for an event type given as a string.
    pub fn on(
        mut self,
        event_type: impl Into<String>,
        handler: impl Fn(&WebhookEvent) -> Result<(), Error> + Send + Sync + 'static,
    ) -> Self {
        self.handlers.insert(event_type.into(), Box::new(handler));
        self
    }

    /// Registers a handler for a documented [`EventKind`].
    pub fn on_kind(
        self,
        kind: EventKind,
        handler: impl Fn(&WebhookEvent) -> Result<(), Error> + Send + Sync + 'static,
    ) -> Self {
        self.on(kind.to_string(), handler)
    }

    /// Verifies the signature and parses the event, without dispatching.
    ///
    /// ## Errors
    ///
    /// [`Error::Signature`] when verification fails (including an empty
    /// secret, which always fails closed) and [`Error::Decoding`] when the
    /// body is not a valid event envelope.
    pub fn parse(&self, payload: &[u8], signature: &str) -> Result<WebhookEvent, Error> {
        if !signature::verify(payload, &self.secret, signature) {
            return Err(Error::Signature);
        }
        serde_json::from_slice(payload).map_err(Error::Decoding)
    }

    /// Verifies, parses, and dispatches one delivery.
    ///
    /// Handler failures propagate to the caller (who should answer with a
    /// 5xx so the provider redelivers); an unrouted event type is the one
    /// designed non-failure, acknowledged as [`Ack::Ignored`].
    pub fn handle(&self, payload: &[u8], signature: &str) -> Result<Ack, Error> {
        let event = self.parse(payload, signature)?;
        match self.handlers.get(&event.event_type) {
            Some(handler) => {
                handler(&event)?;
                Ok(Ack::Handled)
            }
            None => Ok(Ack::Ignored),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const SECRET: &str = "whsec_router";

    fn delivery(event_type: &str) -> (Vec<u8>, String) {
        let payload = format!(
            r#"{{"eventId":"evt_1","eventType":"{event_type}","timestamp":"2026-01-01T00:00:00Z","data":{{"id":"x_1"}}}}"#
        )
        .into_bytes();
        let signature = signature::sign(&payload, SECRET);
        (payload, signature)
    }

    #[test]
    fn dispatches_to_registered_handler() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let router = WebhookRouter::new(SECRET).on_kind(EventKind::CardCreated, move |event| {
            assert_eq!(event.data["id"], "x_1");
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        let (payload, signature) = delivery("card.created");
        assert_eq!(router.handle(&payload, &signature).unwrap(), Ack::Handled);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unrouted_event_is_acknowledged_as_ignored() {
        let router = WebhookRouter::new(SECRET);
        let (payload, signature) = delivery("transfer.completed");
        assert_eq!(router.handle(&payload, &signature).unwrap(), Ack::Ignored);
    }

    #[test]
    fn bad_signature_is_rejected() {
        let router = WebhookRouter::new(SECRET);
        let (payload, _) = delivery("card.created");
        assert!(matches!(
            router.handle(&payload, "deadbeef"),
            Err(Error::Signature)
        ));
    }

    #[test]
    fn empty_secret_rejects_everything() {
        let router = WebhookRouter::new("");
        let (payload, signature) = delivery("card.created");
        assert!(matches!(
            router.handle(&payload, &signature),
            Err(Error::Signature)
        ));
    }

    #[test]
    fn handler_failure_propagates() {
        let router = WebhookRouter::new(SECRET)
            .on("card.created", |_| Err(Error::validation("handler exploded")));
        let (payload, signature) = delivery("card.created");
        assert!(matches!(
            router.handle(&payload, &signature),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn valid_signature_with_garbage_body_is_a_decoding_error() {
        let router = WebhookRouter::new(SECRET);
        let payload = b"not json";
        let signature = signature::sign(payload, SECRET);
        assert!(matches!(
            router.handle(payload, &signature),
            Err(Error::Decoding(_))
        ));
    }

    #[test]
    fn ack_serializes_to_expected_bodies() {
        assert_eq!(serde_json::to_string(&Ack::Handled).unwrap(), r#"{"status":"success"}"#);
        assert_eq!(serde_json::to_string(&Ack::Ignored).unwrap(), r#"{"status":"ignored"}"#);
    }
}
