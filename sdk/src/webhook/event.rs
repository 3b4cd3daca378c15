//! Webhook event envelope and the documented event types.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The JSON envelope delivered with every webhook POST.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebhookEvent {
    /// Unique id of this delivery.
    pub event_id: String,
    /// Dotted event type, e.g. `"card.created"`.
    pub event_type: String,
    /// When the event occurred, as reported by the API.
    pub timestamp: String,
    /// Event-specific payload; shape varies per event type.
    #[serde(default)]
    pub data: serde_json::Value,
}

impl WebhookEvent {
    /// The event type as an [`EventKind`], when it is one of the documented
    /// types. Unknown types are not an error — providers add event types
    /// without notice — they simply return `None`.
    pub fn kind(&self) -> Option<EventKind> {
        self.event_type.parse().ok()
    }
}

/// Documented webhook event types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum EventKind {
    /// A card was issued.
    #[strum(serialize = "card.created")]
    CardCreated,
    /// A card was activated.
    #[strum(serialize = "card.activated")]
    CardActivated,
    /// A card was suspended.
    #[strum(serialize = "card.suspended")]
    CardSuspended,
    /// A card was deleted.
    #[strum(serialize = "card.deleted")]
    CardDeleted,

    /// A card authorization was approved.
    #[strum(serialize = "transaction.authorized")]
    TransactionAuthorized,
    /// A card authorization was declined.
    #[strum(serialize = "transaction.declined")]
    TransactionDeclined,
    /// A transaction cleared.
    #[strum(serialize = "transaction.cleared")]
    TransactionCleared,

    /// A transfer was created.
    #[strum(serialize = "transfer.created")]
    TransferCreated,
    /// A transfer completed.
    #[strum(serialize = "transfer.completed")]
    TransferCompleted,
    /// A transfer failed.
    #[strum(serialize = "transfer.failed")]
    TransferFailed,

    /// A refund was created.
    #[strum(serialize = "refund.created")]
    RefundCreated,
    /// A refund completed.
    #[strum(serialize = "refund.completed")]
    RefundCompleted,
    /// A refund failed.
    #[strum(serialize = "refund.failed")]
    RefundFailed,

    /// An account was created.
    #[strum(serialize = "account.created")]
    AccountCreated,
    /// An account was updated.
    #[strum(serialize = "account.updated")]
    AccountUpdated,
    /// An account was suspended.
    #[strum(serialize = "account.suspended")]
    AccountSuspended,

    /// A budget was created.
    #[strum(serialize = "budget.created")]
    BudgetCreated,
    /// A budget was updated.
    #[strum(serialize = "budget.updated")]
    BudgetUpdated,
    /// A budget limit was exceeded.
    #[strum(serialize = "budget.exceeded")]
    BudgetExceeded,

    /// A payout was created.
    #[strum(serialize = "payout.created")]
    PayoutCreated,
    /// A payout completed.
    #[strum(serialize = "payout.completed")]
    PayoutCompleted,
    /// A payout failed.
    #[strum(serialize = "payout.failed")]
    PayoutFailed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn event_parses_from_camel_case_json() {
        let event: WebhookEvent = serde_json::from_str(
            r#"{"eventId":"evt_1","eventType":"card.created","timestamp":"2026-01-01T00:00:00Z","data":{"cardId":"card_9"}}"#,
        )
        .unwrap();
        assert_eq!(event.event_id, "evt_1");
        assert_eq!(event.kind(), Some(EventKind::CardCreated));
        assert_eq!(event.data["cardId"], "card_9");
    }

    #[test]
    fn missing_data_defaults_to_null() {
        let event: WebhookEvent = serde_json::from_str(
            r#"{"eventId":"evt_2","eventType":"account.updated","timestamp":"2026-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert!(event.data.is_null());
    }

    #[test]
    fn unknown_event_type_has_no_kind() {
        let event: WebhookEvent = serde_json::from_str(
            r#"{"eventId":"evt_3","eventType":"kyc.reviewed","timestamp":"2026-01-01T00:00:00Z","data":{}}"#,
        )
        .unwrap();
        assert_eq!(event.kind(), None);
    }

    #[test]
    fn kind_display_matches_wire_names() {
        assert_eq!(EventKind::TransactionDeclined.to_string(), "transaction.declined");
        for kind in EventKind::iter() {
            // Display and FromStr must agree for router registration by kind.
            assert_eq!(kind.to_string().parse::<EventKind>().unwrap(), kind);
        }
    }
}
