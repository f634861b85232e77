//! Hosted checkout handler.

use super::common::*;
use crate::application::ports::payment_provider::CheckoutSession;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutPayload {
    pub plano: Plan,
    pub business_id: String,
    pub provider: Option<PaymentProvider>,
}

/// POST /api/billing/checkout
async fn create_checkout(
    State(app_state): State<AppState>,
    payload: Result<Json<CheckoutPayload>, JsonRejection>,
) -> AppResult<Json<CheckoutSession>> {
    let Json(payload) = payload.map_err(|rejection| AppError::Validation(rejection.body_text()))?;

    let session = app_state
        .checkout_use_cases
        .create_checkout_session(payload.plano, &payload.business_id, payload.provider)
        .await?;

    Ok(Json(session))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/checkout", post(create_checkout))
}
