//! Verifying and routing webhook deliveries.
//!
//! There is no HTTP server here on purpose: the router only needs the raw
//! body bytes and the value of the `X-Interlace-Signature` header, so it
//! plugs into any framework. This demo fabricates a signed delivery with the
//! same HMAC the provider uses and runs it through a router.
//!
//! ```sh
//! cargo run --example webhook_receiver
//! ```

use interlace_sdk::webhook::{sign, EventKind, WebhookRouter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let secret = std::env::var("INTERLACE_WEBHOOK_SECRET").unwrap_or_else(|_| "demo-secret".into());

    let router = WebhookRouter::new(&secret)
        .on_kind(EventKind::CardCreated, |event| {
            println!("card created: {}", event.data["cardId"]);
            Ok(())
        })
        .on_kind(EventKind::TransferCompleted, |event| {
            println!("transfer {} settled", event.data["transactionId"]);
            Ok(())
        });

    // Stand-in for a real delivery: body bytes plus the signature header.
    let body = br#"{"eventId":"evt_42","eventType":"card.created","timestamp":"2026-08-30T12:00:00Z","data":{"cardId":"card_9f3"}}"#;
    let signature = sign(body, &secret);

    let ack = router.handle(body, &signature)?;
    println!("responding with {}", serde_json::to_string(&ack)?);

    // A tampered body fails verification; answer 401 and do not dispatch.
    let tampered = br#"{"eventId":"evt_42","eventType":"card.created","timestamp":"2026-08-30T12:00:00Z","data":{"cardId":"card_EVIL"}}"#;
    match router.handle(tampered, &signature) {
        Err(err) => println!("tampered delivery rejected: {err}"),
        Ok(_) => unreachable!("signature no longer matches"),
    }

    Ok(())
}
