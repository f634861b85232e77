use serde::Serialize;
use strum::{AsRefStr, Display};

use super::{business_subscription::BusinessId, payment_provider::PaymentProvider, plan::Plan};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, AsRefStr, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    /// Hosted checkout finished and was paid
    SessionCompleted,
    /// Provider confirmed or received a payment
    PaymentConfirmed,
    /// Any other provider event; acknowledged and dropped
    Ignored,
}

impl EventKind {
    pub fn is_relevant(&self) -> bool {
        !matches!(self, EventKind::Ignored)
    }
}

/// Provider-agnostic payment notification.
///
/// `business_id` and `plan` stay optional until the reconciler validates
/// them, so a relevant event with missing data can still be audited.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentEvent {
    pub provider: PaymentProvider,
    pub provider_payment_id: String,
    pub provider_event_type: String,
    pub business_id: Option<BusinessId>,
    pub plan: Option<Plan>,
    pub event_kind: EventKind,
    pub raw_payload: serde_json::Value,
}

impl PaymentEvent {
    pub fn ignored(
        provider: PaymentProvider,
        provider_event_type: impl Into<String>,
        provider_payment_id: impl Into<String>,
        raw_payload: serde_json::Value,
    ) -> Self {
        Self {
            provider,
            provider_payment_id: provider_payment_id.into(),
            provider_event_type: provider_event_type.into(),
            business_id: None,
            plan: None,
            event_kind: EventKind::Ignored,
            raw_payload,
        }
    }
}
