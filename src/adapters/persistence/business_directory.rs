use async_trait::async_trait;
use sqlx::Row;

use crate::{
    adapters::persistence::{PostgresPersistence, parse_enum_column},
    app_error::{AppError, AppResult},
    application::ports::business_directory::{BusinessDirectory, BusinessRecord},
    domain::entities::{
        business_subscription::{
            BusinessId, BusinessSubscription, PaymentStatus, SubscriptionPatch,
        },
        payment_provider::PaymentProvider,
    },
};

fn row_to_record(row: &sqlx::postgres::PgRow) -> BusinessRecord {
    let id: String = row.get("id");
    let subscription = BusinessSubscription {
        business_id: BusinessId::new(id.clone()),
        payment_status: parse_enum_column(row.get("payment_status"), "payment_status", &id)
            .unwrap_or(PaymentStatus::Inactive),
        plan: parse_enum_column(row.get("plan"), "plan", &id),
        start_date: row.get("start_date"),
        expiration_date: row.get("expiration_date"),
        last_payment_id: row.get("last_payment_id"),
    };
    BusinessRecord {
        id: BusinessId::new(id),
        name: row.get("name"),
        subscription,
    }
}

const SELECT_COLS: &str = r#"
    id, name, payment_status, plan, start_date, expiration_date, last_payment_id
"#;

#[async_trait]
impl BusinessDirectory for PostgresPersistence {
    async fn get_business(&self, business_id: &BusinessId) -> AppResult<Option<BusinessRecord>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM businesses WHERE id = $1",
            SELECT_COLS
        ))
        .bind(business_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(row.as_ref().map(row_to_record))
    }

    async fn is_payment_applied(
        &self,
        provider: PaymentProvider,
        payment_id: &str,
    ) -> AppResult<bool> {
        let applied: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM applied_payments
                WHERE provider = $1 AND provider_payment_id = $2
            )
            "#,
        )
        .bind(provider.as_ref())
        .bind(payment_id)
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::from)?;
        Ok(applied)
    }

    async fn update_subscription(
        &self,
        business_id: &BusinessId,
        patch: &SubscriptionPatch,
    ) -> AppResult<bool> {
        let mut tx = self.pool.begin().await.map_err(AppError::from)?;

        // The primary key on (provider, provider_payment_id) makes a concurrent
        // delivery of the same payment wait here, then claim nothing.
        let claimed = sqlx::query(
            r#"
            INSERT INTO applied_payments (provider, provider_payment_id, business_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (provider, provider_payment_id) DO NOTHING
            RETURNING provider_payment_id
            "#,
        )
        .bind(patch.provider.as_ref())
        .bind(&patch.last_payment_id)
        .bind(business_id.as_str())
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::from)?;

        if claimed.is_none() {
            tx.rollback().await.map_err(AppError::from)?;
            return Ok(false);
        }

        let row = sqlx::query(
            r#"
            UPDATE businesses
            SET payment_status = $2,
                plan = $3,
                start_date = $4,
                expiration_date = $5,
                last_payment_id = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(business_id.as_str())
        .bind(PaymentStatus::Active.as_ref())
        .bind(patch.plan.as_ref())
        .bind(patch.start_date)
        .bind(patch.expiration_date)
        .bind(&patch.last_payment_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::from)?;

        if row.is_none() {
            // Unknown business: release the claim so a later delivery can apply.
            tx.rollback().await.map_err(AppError::from)?;
            return Ok(false);
        }

        tx.commit().await.map_err(AppError::from)?;
        Ok(true)
    }
}
