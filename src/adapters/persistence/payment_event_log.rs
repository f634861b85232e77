use async_trait::async_trait;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    application::ports::business_directory::{PaymentEventLogEntry, PaymentEventLogRepo},
};

#[async_trait]
impl PaymentEventLogRepo for PostgresPersistence {
    async fn record(&self, entry: &PaymentEventLogEntry) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO payment_events (
                provider, provider_payment_id, provider_event_type, event_kind,
                business_id, plan, outcome, raw_payload, received_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(entry.provider.as_ref())
        .bind(&entry.provider_payment_id)
        .bind(&entry.provider_event_type)
        .bind(entry.event_kind.as_ref())
        .bind(entry.business_id.as_ref().map(|id| id.as_str()))
        .bind(entry.plan.map(|p| p.as_ref().to_string()))
        .bind(&entry.outcome)
        .bind(&entry.raw_payload)
        .bind(entry.received_at)
        .execute(&self.pool)
        .await
        .map_err(AppError::from)?;

        Ok(())
    }
}
