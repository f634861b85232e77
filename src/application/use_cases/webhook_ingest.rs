use std::{collections::HashMap, sync::Arc};

use axum::http::HeaderMap;
use serde::Serialize;
use tracing::{debug, error, instrument, warn};

use crate::{
    app_error::{AppError, AppResult},
    application::{
        ports::{
            business_directory::{PaymentEventLogEntry, PaymentEventLogRepo},
            payment_provider::PaymentProviderAdapter,
        },
        use_cases::plan_reconciler::{PlanReconciler, ReconcileResult},
    },
    domain::entities::{payment_event::PaymentEvent, payment_provider::PaymentProvider},
};

/// What happened to an authentic webhook delivery. Every variant is
/// acknowledged to the provider with 200.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IngestOutcome {
    /// Event type this service does not act on
    Ignored { event_type: String },
    /// Forwarded to the reconciler
    Reconciled(ReconcileResult),
    /// Authentic but unusable; logged for manual reconciliation
    Unprocessable { code: String, reason: String },
}

impl IngestOutcome {
    pub fn status_label(&self) -> &'static str {
        match self {
            IngestOutcome::Ignored { .. } => "ignored",
            IngestOutcome::Reconciled(result) => result.status_label(),
            IngestOutcome::Unprocessable { .. } => "unprocessable",
        }
    }

    fn unprocessable(err: &AppError) -> Self {
        IngestOutcome::Unprocessable {
            code: err.code().as_str().to_string(),
            reason: err.to_string(),
        }
    }
}

/// Receives provider webhooks, verifies them and hands confirmed payments to
/// the reconciler within the same request.
pub struct WebhookIngestor {
    adapters: HashMap<PaymentProvider, Arc<dyn PaymentProviderAdapter>>,
    reconciler: Arc<PlanReconciler>,
    event_log: Arc<dyn PaymentEventLogRepo>,
}

impl WebhookIngestor {
    pub fn new(
        adapters: Vec<Arc<dyn PaymentProviderAdapter>>,
        reconciler: Arc<PlanReconciler>,
        event_log: Arc<dyn PaymentEventLogRepo>,
    ) -> Self {
        let adapters = adapters
            .into_iter()
            .map(|adapter| (adapter.provider(), adapter))
            .collect();
        Self {
            adapters,
            reconciler,
            event_log,
        }
    }

    /// Returns `Err` only for authenticity failures, missing configuration
    /// and transient errors worth a provider retry.
    #[instrument(skip_all, fields(provider = %provider, body_len = raw_body.len()))]
    pub async fn ingest(
        &self,
        provider: PaymentProvider,
        raw_body: &[u8],
        headers: &HeaderMap,
    ) -> AppResult<IngestOutcome> {
        let adapter = self.adapters.get(&provider).ok_or_else(|| {
            AppError::Configuration(format!(
                "no webhook secret configured for {}",
                provider.display_name()
            ))
        })?;

        match adapter.verify(raw_body, headers) {
            Ok(()) => {}
            Err(err @ AppError::Authenticity(_)) => {
                warn!(
                    target: "security",
                    provider = %provider,
                    error = %err,
                    "Rejected webhook delivery with invalid credentials"
                );
                return Err(err);
            }
            Err(err) => return Err(err),
        }

        let event = match adapter.extract_event(raw_body) {
            Ok(event) => event,
            Err(err) if err.is_retryable() => return Err(err),
            Err(err) => {
                error!(
                    provider = %provider,
                    error = %err,
                    retryable = false,
                    "Authentic webhook payload could not be read"
                );
                return Ok(IngestOutcome::unprocessable(&err));
            }
        };

        if !event.event_kind.is_relevant() {
            debug!(event_type = %event.provider_event_type, "Ignoring webhook event type");
            self.audit(&event, "ignored").await;
            return Ok(IngestOutcome::Ignored {
                event_type: event.provider_event_type,
            });
        }

        match self.reconciler.reconcile(&event).await {
            Ok(result) => {
                self.audit(&event, result.status_label()).await;
                Ok(IngestOutcome::Reconciled(result))
            }
            Err(err) if err.is_retryable() => {
                error!(
                    error = %err,
                    event_type = %event.provider_event_type,
                    payment_id = %event.provider_payment_id,
                    retryable = true,
                    "Webhook processing failed, returning 500 for provider retry"
                );
                self.audit(&event, err.code().as_str()).await;
                Err(err)
            }
            Err(err) => {
                error!(
                    error = %err,
                    code = err.code().as_str(),
                    event_type = %event.provider_event_type,
                    payment_id = %event.provider_payment_id,
                    business_id = ?event.business_id,
                    retryable = false,
                    "Payment needs manual reconciliation"
                );
                self.audit(&event, err.code().as_str()).await;
                Ok(IngestOutcome::unprocessable(&err))
            }
        }
    }

    async fn audit(&self, event: &PaymentEvent, outcome: &str) {
        let entry = PaymentEventLogEntry::from_event(event, outcome);
        if let Err(err) = self.event_log.record(&entry).await {
            warn!(
                error = %err,
                payment_id = %event.provider_payment_id,
                "Failed to record payment event"
            );
        }
    }
}
