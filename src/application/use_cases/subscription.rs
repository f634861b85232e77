use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    app_error::{AppError, AppResult},
    application::{ports::business_directory::BusinessDirectory, validators::is_valid_business_id},
    domain::entities::business_subscription::{BusinessId, BusinessSubscription},
};

/// Stored subscription plus the read-time active flag.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionView {
    #[serde(flatten)]
    pub subscription: BusinessSubscription,
    pub business_name: Option<String>,
    pub is_active: bool,
}

pub struct SubscriptionUseCases {
    directory: Arc<dyn BusinessDirectory>,
}

impl SubscriptionUseCases {
    pub fn new(directory: Arc<dyn BusinessDirectory>) -> Self {
        Self { directory }
    }

    pub async fn get_subscription(&self, business_id: &str) -> AppResult<SubscriptionView> {
        self.get_subscription_at(business_id, Utc::now()).await
    }

    pub async fn get_subscription_at(
        &self,
        business_id: &str,
        now: DateTime<Utc>,
    ) -> AppResult<SubscriptionView> {
        if !is_valid_business_id(business_id) {
            return Err(AppError::Validation("invalid businessId".into()));
        }

        let record = self
            .directory
            .get_business(&BusinessId::new(business_id))
            .await?
            .ok_or_else(|| AppError::BusinessNotFound(business_id.to_string()))?;

        Ok(SubscriptionView {
            is_active: record.subscription.is_active_at(now),
            business_name: record.name,
            subscription: record.subscription,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    use crate::{
        domain::entities::{business_subscription::PaymentStatus, plan::Plan},
        test_utils::{InMemoryBusinessDirectory, create_test_business},
    };

    fn activated(id: &str, expires: DateTime<Utc>) -> InMemoryBusinessDirectory {
        InMemoryBusinessDirectory::with_businesses(vec![create_test_business(id, |b| {
            b.subscription.payment_status = PaymentStatus::Active;
            b.subscription.plan = Some(Plan::Premium);
            b.subscription.start_date = Some(expires - Duration::days(365));
            b.subscription.expiration_date = Some(expires);
            b.subscription.last_payment_id = Some("pay_1".into());
        })])
    }

    #[tokio::test]
    async fn test_active_before_expiration() {
        let expires = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let use_cases = SubscriptionUseCases::new(Arc::new(activated("biz123", expires)));

        let view = use_cases
            .get_subscription_at("biz123", expires - Duration::days(1))
            .await
            .unwrap();

        assert!(view.is_active);
        assert_eq!(view.subscription.plan, Some(Plan::Premium));
    }

    #[tokio::test]
    async fn test_expired_row_reads_inactive() {
        let expires = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let use_cases = SubscriptionUseCases::new(Arc::new(activated("biz123", expires)));

        let view = use_cases
            .get_subscription_at("biz123", expires + Duration::seconds(1))
            .await
            .unwrap();

        assert!(!view.is_active);
        assert_eq!(view.subscription.payment_status, PaymentStatus::Active);
    }

    #[tokio::test]
    async fn test_unknown_business_is_not_found() {
        let use_cases = SubscriptionUseCases::new(Arc::new(InMemoryBusinessDirectory::new()));

        let err = use_cases.get_subscription("ghost").await.unwrap_err();
        assert!(matches!(err, AppError::BusinessNotFound(_)));
    }

    #[tokio::test]
    async fn test_invalid_id_is_validation_error() {
        let use_cases = SubscriptionUseCases::new(Arc::new(InMemoryBusinessDirectory::new()));

        let err = use_cases.get_subscription("a/b").await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
