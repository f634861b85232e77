//! Asaas webhook verification and event extraction.

use axum::http::HeaderMap;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::{
    app_error::{AppError, AppResult},
    application::ports::payment_provider::PaymentProviderAdapter,
    domain::entities::{
        business_subscription::BusinessId,
        payment_event::{EventKind, PaymentEvent},
        payment_provider::PaymentProvider,
        plan::Plan,
    },
    infra::{asaas_client::AsaasWebhookEvent, stripe_client::constant_time_compare},
};

/// Shared token Asaas sends on every webhook delivery
pub const TOKEN_HEADER: &str = "asaas-access-token";

pub struct AsaasWebhookAdapter {
    token: SecretString,
}

impl AsaasWebhookAdapter {
    pub fn new(token: String) -> Self {
        Self {
            token: SecretString::new(token.into()),
        }
    }
}

impl PaymentProviderAdapter for AsaasWebhookAdapter {
    fn provider(&self) -> PaymentProvider {
        PaymentProvider::Asaas
    }

    fn verify(&self, _raw_body: &[u8], headers: &HeaderMap) -> AppResult<()> {
        let presented = headers
            .get(TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Authenticity("missing asaas-access-token header".into()))?;

        if !constant_time_compare(presented, self.token.expose_secret()) {
            return Err(AppError::Authenticity("asaas-access-token mismatch".into()));
        }

        Ok(())
    }

    fn extract_event(&self, raw_body: &[u8]) -> AppResult<PaymentEvent> {
        let raw_payload: serde_json::Value = serde_json::from_slice(raw_body)
            .map_err(|e| AppError::Validation(format!("invalid Asaas payload: {}", e)))?;
        let event: AsaasWebhookEvent = serde_json::from_value(raw_payload.clone())
            .map_err(|e| AppError::Validation(format!("invalid Asaas event: {}", e)))?;

        let relevant = matches!(event.event.as_str(), "PAYMENT_RECEIVED" | "PAYMENT_CONFIRMED");

        let Some(payment) = event.payment else {
            if relevant {
                return Err(AppError::Validation(format!(
                    "{} event without payment object",
                    event.event
                )));
            }
            let id = event.id.unwrap_or_default();
            return Ok(PaymentEvent::ignored(
                PaymentProvider::Asaas,
                event.event,
                id,
                raw_payload,
            ));
        };

        if !relevant {
            return Ok(PaymentEvent::ignored(
                PaymentProvider::Asaas,
                event.event,
                payment.id,
                raw_payload,
            ));
        }

        let business_id = payment
            .external_reference
            .filter(|id| !id.trim().is_empty())
            .map(BusinessId::new);

        // Payment links carry no structured plan field; the checkout writes
        // the plan name into the description.
        let plan = payment.description.as_deref().and_then(Plan::from_description);
        debug!(
            payment_id = %payment.id,
            description = ?payment.description,
            plan = ?plan,
            "Plan inferred from Asaas payment description"
        );

        Ok(PaymentEvent {
            provider: PaymentProvider::Asaas,
            provider_payment_id: payment.id,
            provider_event_type: event.event,
            business_id,
            plan,
            event_kind: EventKind::PaymentConfirmed,
            raw_payload,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{asaas_headers, asaas_payment_payload};
    use serde_json::json;

    const TOKEN: &str = "asaas_token_test";

    fn adapter() -> AsaasWebhookAdapter {
        AsaasWebhookAdapter::new(TOKEN.into())
    }

    #[test]
    fn test_verify_token() {
        assert!(adapter().verify(b"{}", &asaas_headers(TOKEN)).is_ok());
        assert!(matches!(
            adapter().verify(b"{}", &asaas_headers("other")),
            Err(AppError::Authenticity(_))
        ));
        assert!(matches!(
            adapter().verify(b"{}", &HeaderMap::new()),
            Err(AppError::Authenticity(_))
        ));
    }

    #[test]
    fn test_extract_received_payment() {
        let body = asaas_payment_payload(
            "PAYMENT_RECEIVED",
            "pay_1",
            "biz123",
            "Plano Intermediário - Guia Comercial BR277",
        );

        let event = adapter().extract_event(body.as_bytes()).unwrap();
        assert_eq!(event.event_kind, EventKind::PaymentConfirmed);
        assert_eq!(event.provider_payment_id, "pay_1");
        assert_eq!(event.business_id, Some(BusinessId::new("biz123")));
        assert_eq!(event.plan, Some(Plan::Intermediate));
        assert_eq!(event.provider_event_type, "PAYMENT_RECEIVED");
    }

    #[test]
    fn test_confirmed_is_relevant() {
        let body = asaas_payment_payload("PAYMENT_CONFIRMED", "pay_2", "biz123", "Plano Premium");
        let event = adapter().extract_event(body.as_bytes()).unwrap();
        assert_eq!(event.event_kind, EventKind::PaymentConfirmed);
        assert_eq!(event.plan, Some(Plan::Premium));
    }

    #[test]
    fn test_unknown_description_leaves_plan_empty() {
        let body = asaas_payment_payload("PAYMENT_CONFIRMED", "pay_3", "biz123", "Assinatura");
        let event = adapter().extract_event(body.as_bytes()).unwrap();
        assert_eq!(event.event_kind, EventKind::PaymentConfirmed);
        assert!(event.plan.is_none());
    }

    #[test]
    fn test_blank_external_reference_is_missing() {
        let body = asaas_payment_payload("PAYMENT_CONFIRMED", "pay_4", "  ", "Plano Premium");
        let event = adapter().extract_event(body.as_bytes()).unwrap();
        assert!(event.business_id.is_none());
    }

    #[test]
    fn test_other_events_are_ignored() {
        for name in ["PAYMENT_CREATED", "PAYMENT_OVERDUE", "PAYMENT_REFUNDED"] {
            let body = asaas_payment_payload(name, "pay_5", "biz123", "Plano Premium");
            let event = adapter().extract_event(body.as_bytes()).unwrap();
            assert_eq!(event.event_kind, EventKind::Ignored, "{}", name);
            assert_eq!(event.provider_payment_id, "pay_5");
        }
    }

    #[test]
    fn test_relevant_event_without_payment_is_validation_error() {
        let body = json!({"event": "PAYMENT_RECEIVED"}).to_string();
        assert!(matches!(
            adapter().extract_event(body.as_bytes()),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_irrelevant_event_without_payment_is_ignored() {
        let body = json!({"id": "evt_1", "event": "ACCOUNT_STATUS_UPDATED"}).to_string();
        let event = adapter().extract_event(body.as_bytes()).unwrap();
        assert_eq!(event.event_kind, EventKind::Ignored);
        assert_eq!(event.provider_payment_id, "evt_1");
    }

    #[test]
    fn test_garbage_is_validation_error() {
        assert!(matches!(
            adapter().extract_event(b"not json"),
            Err(AppError::Validation(_))
        ));
    }
}
