//! Payment provider webhook handlers.
//!
//! The raw body is handed to the ingestor untouched; Stripe signs the exact
//! bytes it sent.

use super::common::*;

#[derive(Debug, Serialize)]
struct WebhookAck {
    status: &'static str,
}

async fn ingest(
    app_state: &AppState,
    provider: PaymentProvider,
    headers: &HeaderMap,
    body: &Bytes,
) -> AppResult<Json<WebhookAck>> {
    let outcome = app_state
        .webhook_ingestor
        .ingest(provider, body, headers)
        .await?;

    info!(provider = %provider, status = outcome.status_label(), "Webhook acknowledged");

    Ok(Json(WebhookAck {
        status: outcome.status_label(),
    }))
}

/// POST /api/billing/webhooks/stripe
async fn stripe_webhook(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<WebhookAck>> {
    ingest(&app_state, PaymentProvider::Stripe, &headers, &body).await
}

/// POST /api/billing/webhooks/asaas
async fn asaas_webhook(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<WebhookAck>> {
    ingest(&app_state, PaymentProvider::Asaas, &headers, &body).await
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/webhooks/stripe", post(stripe_webhook))
        .route("/webhooks/asaas", post(asaas_webhook))
}
