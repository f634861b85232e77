use std::{future::Future, sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::{
    app_error::{AppError, AppResult},
    application::ports::business_directory::BusinessDirectory,
    domain::entities::{
        business_subscription::{BusinessId, SubscriptionPatch},
        payment_event::PaymentEvent,
        plan::Plan,
    },
};

/// Default bound on a single directory round trip
pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ReconcileResult {
    /// The subscription was activated by this payment
    Applied {
        business_id: BusinessId,
        plan: Plan,
        payment_id: String,
        start_date: DateTime<Utc>,
        expiration_date: DateTime<Utc>,
    },
    /// This payment had already activated the subscription; nothing written
    AlreadyApplied {
        business_id: BusinessId,
        payment_id: String,
    },
}

impl ReconcileResult {
    pub fn status_label(&self) -> &'static str {
        match self {
            ReconcileResult::Applied { .. } => "processed",
            ReconcileResult::AlreadyApplied { .. } => "already_applied",
        }
    }
}

/// Applies confirmed payments to business subscriptions.
pub struct PlanReconciler {
    directory: Arc<dyn BusinessDirectory>,
    write_timeout: Duration,
}

impl PlanReconciler {
    pub fn new(directory: Arc<dyn BusinessDirectory>, write_timeout: Duration) -> Self {
        Self {
            directory,
            write_timeout,
        }
    }

    pub async fn reconcile(&self, event: &PaymentEvent) -> AppResult<ReconcileResult> {
        self.reconcile_at(event, Utc::now()).await
    }

    /// Reconcile with an explicit activation instant.
    #[instrument(
        skip_all,
        fields(provider = %event.provider, payment_id = %event.provider_payment_id)
    )]
    pub async fn reconcile_at(
        &self,
        event: &PaymentEvent,
        now: DateTime<Utc>,
    ) -> AppResult<ReconcileResult> {
        if !event.event_kind.is_relevant() {
            return Err(AppError::Validation(format!(
                "event {} is not a payment confirmation",
                event.provider_event_type
            )));
        }

        let business_id = event.business_id.clone().ok_or_else(|| {
            AppError::MissingReference(format!(
                "{} payment {} carries no business reference",
                event.provider, event.provider_payment_id
            ))
        })?;

        let plan = event.plan.filter(Plan::is_paid).ok_or_else(|| {
            AppError::UnidentifiablePlan(format!(
                "{} payment {} for business {} names no paid plan",
                event.provider, event.provider_payment_id, business_id
            ))
        })?;

        let record = self
            .bounded("get_business", self.directory.get_business(&business_id))
            .await?
            .ok_or_else(|| AppError::BusinessNotFound(business_id.to_string()))?;

        let already_applied = record
            .subscription
            .was_activated_by(&event.provider_payment_id)
            || self
                .bounded(
                    "is_payment_applied",
                    self.directory
                        .is_payment_applied(event.provider, &event.provider_payment_id),
                )
                .await?;

        if already_applied {
            info!(business_id = %business_id, "Payment already applied, skipping");
            return Ok(ReconcileResult::AlreadyApplied {
                business_id,
                payment_id: event.provider_payment_id.clone(),
            });
        }

        let expiration_date = plan.expiration_from(now).ok_or_else(|| {
            AppError::Internal(format!("expiration overflow for plan {} from {}", plan, now))
        })?;

        let patch = SubscriptionPatch {
            provider: event.provider,
            plan,
            start_date: now,
            expiration_date,
            last_payment_id: event.provider_payment_id.clone(),
        };

        let written = self
            .bounded(
                "update_subscription",
                self.directory.update_subscription(&business_id, &patch),
            )
            .await?;

        if !written {
            // Guarded update touched nothing: the business vanished or a
            // concurrent delivery of the same payment won the race.
            if self
                .bounded("get_business", self.directory.get_business(&business_id))
                .await?
                .is_none()
            {
                return Err(AppError::BusinessNotFound(business_id.to_string()));
            }
            if self
                .bounded(
                    "is_payment_applied",
                    self.directory
                        .is_payment_applied(patch.provider, &patch.last_payment_id),
                )
                .await?
            {
                info!(business_id = %business_id, "Concurrent delivery applied payment first");
                return Ok(ReconcileResult::AlreadyApplied {
                    business_id,
                    payment_id: patch.last_payment_id,
                });
            }
            warn!(business_id = %business_id, "Guarded subscription update wrote no row");
            return Err(AppError::Database(
                "subscription update was not applied".into(),
            ));
        }

        info!(
            business_id = %business_id,
            plan = %plan,
            expiration_date = %expiration_date,
            "Subscription activated"
        );

        Ok(ReconcileResult::Applied {
            business_id,
            plan,
            payment_id: patch.last_payment_id,
            start_date: patch.start_date,
            expiration_date: patch.expiration_date,
        })
    }

    async fn bounded<T>(
        &self,
        operation: &str,
        fut: impl Future<Output = AppResult<T>>,
    ) -> AppResult<T> {
        tokio::time::timeout(self.write_timeout, fut)
            .await
            .map_err(|_| {
                AppError::Timeout(format!(
                    "{} exceeded {}ms",
                    operation,
                    self.write_timeout.as_millis()
                ))
            })?
    }
}
