//! Test app state builder for HTTP-level integration testing.
//!
//! Creates a minimal `AppState` wired to in-memory mocks. Real webhook
//! adapters are used so route tests exercise signature checks end to end.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use url::Url;

use crate::{
    adapters::http::app_state::AppState,
    application::{
        ports::payment_provider::{PaymentProviderAdapter, PaymentProviderPort},
        use_cases::{
            checkout::CheckoutUseCases, plan_reconciler::PlanReconciler,
            subscription::SubscriptionUseCases, webhook_ingest::WebhookIngestor,
        },
    },
    infra::{
        asaas_client::ASAAS_API_BASE,
        asaas_webhook_adapter::AsaasWebhookAdapter,
        config::{AppConfig, AsaasConfig, StripeConfig},
        stripe_webhook_adapter::StripeWebhookAdapter,
    },
    test_utils::{InMemoryBusinessDirectory, InMemoryPaymentEventLog},
};

/// Config with no provider credentials and a short write timeout.
pub fn test_config() -> AppConfig {
    AppConfig {
        bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        database_url: "postgres://localhost/br277_test".to_string(),
        app_origin: Url::parse("https://br277.test/").unwrap(),
        cors_origin: HeaderValue::from_static("https://br277.test"),
        db_write_timeout: Duration::from_secs(2),
        stripe: StripeConfig {
            secret_key: None,
            webhook_secret: None,
            price_intermediate: None,
            price_premium: None,
        },
        asaas: AsaasConfig {
            api_key: None,
            api_base: ASAAS_API_BASE.to_string(),
            webhook_token: None,
            price_intermediate_cents: 14_990,
            price_premium_cents: 24_990,
        },
    }
}

#[derive(Default)]
pub struct TestAppStateBuilder {
    directory: Option<Arc<InMemoryBusinessDirectory>>,
    event_log: Option<Arc<InMemoryPaymentEventLog>>,
    checkout_providers: Vec<Arc<dyn PaymentProviderPort>>,
    stripe_webhook_secret: Option<String>,
    asaas_webhook_token: Option<String>,
}

impl TestAppStateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_directory(mut self, directory: Arc<InMemoryBusinessDirectory>) -> Self {
        self.directory = Some(directory);
        self
    }

    pub fn with_event_log(mut self, event_log: Arc<InMemoryPaymentEventLog>) -> Self {
        self.event_log = Some(event_log);
        self
    }

    pub fn with_checkout_provider(mut self, provider: Arc<dyn PaymentProviderPort>) -> Self {
        self.checkout_providers.push(provider);
        self
    }

    pub fn with_stripe_webhook_secret(mut self, secret: &str) -> Self {
        self.stripe_webhook_secret = Some(secret.to_string());
        self
    }

    pub fn with_asaas_webhook_token(mut self, token: &str) -> Self {
        self.asaas_webhook_token = Some(token.to_string());
        self
    }

    pub fn build(self) -> AppState {
        let config = test_config();
        let directory = self
            .directory
            .unwrap_or_else(|| Arc::new(InMemoryBusinessDirectory::new()));
        let event_log = self
            .event_log
            .unwrap_or_else(|| Arc::new(InMemoryPaymentEventLog::new()));

        let mut adapters: Vec<Arc<dyn PaymentProviderAdapter>> = Vec::new();
        if let Some(secret) = self.stripe_webhook_secret {
            adapters.push(Arc::new(StripeWebhookAdapter::new(secret)));
        }
        if let Some(token) = self.asaas_webhook_token {
            adapters.push(Arc::new(AsaasWebhookAdapter::new(token)));
        }

        let reconciler = Arc::new(PlanReconciler::new(
            directory.clone(),
            config.db_write_timeout,
        ));

        AppState {
            checkout_use_cases: Arc::new(CheckoutUseCases::new(
                self.checkout_providers,
                config.checkout_urls(),
            )),
            webhook_ingestor: Arc::new(WebhookIngestor::new(adapters, reconciler, event_log)),
            subscription_use_cases: Arc::new(SubscriptionUseCases::new(directory)),
            config: Arc::new(config),
        }
    }
}
