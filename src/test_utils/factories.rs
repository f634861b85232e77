//! Test data factories for creating valid test fixtures.
//!
//! Each factory function creates a complete, valid object with sensible defaults.
//! Use the closure parameter to override specific fields as needed.

use serde_json::json;

use crate::{
    application::ports::business_directory::BusinessRecord,
    domain::entities::{
        business_subscription::{BusinessId, BusinessSubscription},
        payment_event::{EventKind, PaymentEvent},
        payment_provider::PaymentProvider,
        plan::Plan,
    },
};

/// Create a directory business with an inactive subscription.
pub fn create_test_business(
    id: &str,
    overrides: impl FnOnce(&mut BusinessRecord),
) -> BusinessRecord {
    let business_id = BusinessId::new(id);
    let mut record = BusinessRecord {
        id: business_id.clone(),
        name: Some(format!("Empresa {}", id)),
        subscription: BusinessSubscription::inactive(business_id),
    };
    overrides(&mut record);
    record
}

/// Create a confirmed Asaas premium payment for `biz123`.
pub fn create_test_payment_event(overrides: impl FnOnce(&mut PaymentEvent)) -> PaymentEvent {
    let mut event = PaymentEvent {
        provider: PaymentProvider::Asaas,
        provider_payment_id: "pay_1".to_string(),
        provider_event_type: "PAYMENT_CONFIRMED".to_string(),
        business_id: Some(BusinessId::new("biz123")),
        plan: Some(Plan::Premium),
        event_kind: EventKind::PaymentConfirmed,
        raw_payload: json!({}),
    };
    overrides(&mut event);
    event
}
