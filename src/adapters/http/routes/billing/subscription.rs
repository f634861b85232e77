use super::common::*;
use crate::application::use_cases::subscription::SubscriptionView;

/// GET /api/billing/businesses/{business_id}/subscription
async fn get_subscription(
    State(app_state): State<AppState>,
    Path(business_id): Path<String>,
) -> AppResult<Json<SubscriptionView>> {
    let view = app_state
        .subscription_use_cases
        .get_subscription(&business_id)
        .await?;
    Ok(Json(view))
}

pub fn router() -> Router<AppState> {
    Router::new().route(
        "/businesses/{business_id}/subscription",
        get(get_subscription),
    )
}
