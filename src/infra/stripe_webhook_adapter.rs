//! Stripe webhook verification and event extraction.

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
    infra::stripe_client::{StripeClient, StripeWebhookEvent},
};

pub const SIGNATURE_HEADER: &str = "stripe-signature";

/// Metadata keys written at checkout and read back here
pub const METADATA_BUSINESS_ID: &str = "businessId";
pub const METADATA_PLAN: &str = "plano";

pub struct StripeWebhookAdapter {
    webhook_secret: SecretString,
}

impl StripeWebhookAdapter {
    pub fn new(webhook_secret: String) -> Self {
        Self {
            webhook_secret: SecretString::new(webhook_secret.into()),
        }
    }
}

impl PaymentProviderAdapter for StripeWebhookAdapter {
    fn provider(&self) -> PaymentProvider {
        PaymentProvider::Stripe
    }

    fn verify(&self, raw_body: &[u8], headers: &HeaderMap) -> AppResult<()> {
        let signature = headers
            .get(SIGNATURE_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Authenticity("missing Stripe-Signature header".into()))?;

        StripeClient::verify_webhook_signature(
            raw_body,
            signature,
            self.webhook_secret.expose_secret(),
        )
    }

    fn extract_event(&self, raw_body: &[u8]) -> AppResult<PaymentEvent> {
        let raw_payload: serde_json::Value = serde_json::from_slice(raw_body)
            .map_err(|e| AppError::Validation(format!("invalid Stripe payload: {}", e)))?;
        let event: StripeWebhookEvent = serde_json::from_value(raw_payload.clone())
            .map_err(|e| AppError::Validation(format!("invalid Stripe event: {}", e)))?;

        match event.event_type.as_str() {
            "checkout.session.completed" | "checkout.session.async_payment_succeeded" => {}
            _ => {
                return Ok(PaymentEvent::ignored(
                    PaymentProvider::Stripe,
                    event.event_type,
                    event.id,
                    raw_payload,
                ));
            }
        }

        let session = event.get_checkout_session().ok_or_else(|| {
            AppError::Validation(format!("event {} has no checkout session", event.id))
        })?;

        // Delayed methods (boleto) complete the session before money arrives;
        // async_payment_succeeded follows once it does.
        if event.event_type == "checkout.session.completed"
            && session.payment_status.as_deref() == Some("unpaid")
        {
            debug!(
                session_id = %session.id,
                "Checkout completed but unpaid, waiting for async payment"
            );
            return Ok(PaymentEvent::ignored(
                PaymentProvider::Stripe,
                event.event_type,
                session.id,
                raw_payload,
            ));
        }

        let business_id = session
            .metadata
            .get(METADATA_BUSINESS_ID)
            .filter(|id| !id.trim().is_empty())
            .or(session
                .client_reference_id
                .as_ref()
                .filter(|id| !id.trim().is_empty()))
            .map(|id| BusinessId::new(id.as_str()));

        let plan = session
            .metadata
            .get(METADATA_PLAN)
            .and_then(|p| p.parse::<Plan>().ok());

        Ok(PaymentEvent {
            provider: PaymentProvider::Stripe,
            provider_payment_id: session.id,
            provider_event_type: event.event_type,
            business_id,
            plan,
            event_kind: EventKind::SessionCompleted,
            raw_payload,
        })
    }
}
