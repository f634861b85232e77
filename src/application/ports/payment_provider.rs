use async_trait::async_trait;
use axum::http::HeaderMap;
use serde::Serialize;

use crate::{
    app_error::AppResult,
    domain::entities::{
        business_subscription::BusinessId, payment_event::PaymentEvent,
        payment_provider::PaymentProvider, plan::Plan,
    },
};

// ============================================================================
// Port Types - Provider-agnostic checkout types
// ============================================================================

/// URLs for checkout redirects
#[derive(Debug, Clone)]
pub struct CheckoutUrls {
    pub success_url: String,
    pub cancel_url: String,
}

/// Result of creating a hosted checkout
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSession {
    /// Provider session/link id for tracking
    pub session_id: String,
    /// Where the payer is sent to pay
    pub url: String,
    pub provider: PaymentProvider,
}

/// What a checkout request carries through the provider and back on the webhook
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub plan: Plan,
    pub business_id: BusinessId,
    pub urls: CheckoutUrls,
}

// ============================================================================
// Payment Provider Port - hosted checkout
// ============================================================================

/// Creates hosted checkout sessions with a payment provider.
#[async_trait]
pub trait PaymentProviderPort: Send + Sync {
    /// Get the provider type
    fn provider(&self) -> PaymentProvider;

    /// Create a hosted checkout for a paid plan.
    ///
    /// The business id and plan must be attached so the provider echoes them
    /// back on the confirming webhook.
    async fn create_checkout(&self, request: &CheckoutRequest) -> AppResult<CheckoutSession>;
}

// ============================================================================
// Payment Provider Adapter - webhook verification and extraction
// ============================================================================

/// Per-provider webhook handling. The only place that knows a provider's
/// payload shape and signature scheme.
pub trait PaymentProviderAdapter: Send + Sync {
    fn provider(&self) -> PaymentProvider;

    /// Check the delivery came from the provider.
    /// Fails with `AppError::Authenticity` on any mismatch.
    fn verify(&self, raw_body: &[u8], headers: &HeaderMap) -> AppResult<()>;

    /// Normalize a verified payload. Irrelevant event types come back as
    /// `EventKind::Ignored`; missing references are left as `None`.
    fn extract_event(&self, raw_body: &[u8]) -> AppResult<PaymentEvent>;
}
