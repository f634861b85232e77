use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    app_error::AppResult,
    domain::entities::{
        business_subscription::{BusinessId, BusinessSubscription, SubscriptionPatch},
        payment_event::{EventKind, PaymentEvent},
        payment_provider::PaymentProvider,
        plan::Plan,
    },
};

/// The slice of a directory business record this service reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessRecord {
    pub id: BusinessId,
    pub name: Option<String>,
    pub subscription: BusinessSubscription,
}

/// Business directory collaborator. This service never creates or deletes
/// businesses; it only reads them and writes subscription state.
#[async_trait]
pub trait BusinessDirectory: Send + Sync {
    async fn get_business(&self, business_id: &BusinessId) -> AppResult<Option<BusinessRecord>>;

    /// Whether `(provider, payment_id)` is in the applied-payments ledger.
    async fn is_payment_applied(
        &self,
        provider: PaymentProvider,
        payment_id: &str,
    ) -> AppResult<bool>;

    /// Apply an activation and record `(patch.provider, patch.last_payment_id)`
    /// in the applied-payments ledger, atomically.
    ///
    /// Returns `false` and writes nothing when the business is missing or the
    /// payment is already in the ledger, including when a concurrent delivery
    /// recorded it first.
    async fn update_subscription(
        &self,
        business_id: &BusinessId,
        patch: &SubscriptionPatch,
    ) -> AppResult<bool>;
}

// ============================================================================
// Payment event audit log
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct PaymentEventLogEntry {
    pub provider: PaymentProvider,
    pub provider_payment_id: String,
    pub provider_event_type: String,
    pub event_kind: EventKind,
    pub business_id: Option<BusinessId>,
    pub plan: Option<Plan>,
    /// Short label of what happened (`processed`, `already_applied`, `ignored`, or an error code)
    pub outcome: String,
    pub raw_payload: serde_json::Value,
    pub received_at: DateTime<Utc>,
}

impl PaymentEventLogEntry {
    pub fn from_event(event: &PaymentEvent, outcome: impl Into<String>) -> Self {
        Self {
            provider: event.provider,
            provider_payment_id: event.provider_payment_id.clone(),
            provider_event_type: event.provider_event_type.clone(),
            event_kind: event.event_kind,
            business_id: event.business_id.clone(),
            plan: event.plan,
            outcome: outcome.into(),
            raw_payload: event.raw_payload.clone(),
            received_at: Utc::now(),
        }
    }
}

#[async_trait]
pub trait PaymentEventLogRepo: Send + Sync {
    async fn record(&self, entry: &PaymentEventLogEntry) -> AppResult<()>;
}
