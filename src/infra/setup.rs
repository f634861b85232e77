use crate::{
    adapters::http::app_state::AppState,
    application::{
        ports::{
            business_directory::{BusinessDirectory, PaymentEventLogRepo},
            payment_provider::{PaymentProviderAdapter, PaymentProviderPort},
        },
        use_cases::{
            checkout::CheckoutUseCases, plan_reconciler::PlanReconciler,
            subscription::SubscriptionUseCases, webhook_ingest::WebhookIngestor,
        },
    },
    infra::{
        asaas_client::AsaasClient,
        asaas_payment_adapter::{AsaasPaymentAdapter, AsaasPriceTable},
        asaas_webhook_adapter::AsaasWebhookAdapter,
        config::{AppConfig, LogFormat},
        postgres_persistence,
        stripe_client::StripeClient,
        stripe_payment_adapter::{StripePaymentAdapter, StripePriceTable},
        stripe_webhook_adapter::StripeWebhookAdapter,
    },
};
use secrecy::ExposeSecret;
use std::{sync::Arc, time::Duration};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub async fn init_app_state() -> anyhow::Result<AppState> {
    let config = AppConfig::from_env()?;

    let postgres_arc = Arc::new(postgres_persistence(&config.database_url).await?);
    let directory_arc = postgres_arc.clone() as Arc<dyn BusinessDirectory>;
    let event_log_arc = postgres_arc.clone() as Arc<dyn PaymentEventLogRepo>;

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()?;

    let checkout_use_cases = CheckoutUseCases::new(
        checkout_providers(&config, &http),
        config.checkout_urls(),
    );

    let reconciler = Arc::new(PlanReconciler::new(
        directory_arc.clone(),
        config.db_write_timeout,
    ));
    let webhook_ingestor =
        WebhookIngestor::new(webhook_adapters(&config), reconciler, event_log_arc);

    let subscription_use_cases = SubscriptionUseCases::new(directory_arc);

    Ok(AppState {
        config: Arc::new(config),
        checkout_use_cases: Arc::new(checkout_use_cases),
        webhook_ingestor: Arc::new(webhook_ingestor),
        subscription_use_cases: Arc::new(subscription_use_cases),
    })
}

/// Providers with an API key configured. Missing ones are rejected per request.
fn checkout_providers(
    config: &AppConfig,
    http: &reqwest::Client,
) -> Vec<Arc<dyn PaymentProviderPort>> {
    let mut providers: Vec<Arc<dyn PaymentProviderPort>> = Vec::new();

    match &config.stripe.secret_key {
        Some(key) => {
            let client = StripeClient::new(http.clone(), key.expose_secret().to_string());
            let prices = StripePriceTable {
                intermediate: config.stripe.price_intermediate.clone(),
                premium: config.stripe.price_premium.clone(),
            };
            providers.push(Arc::new(StripePaymentAdapter::new(client, prices)));
        }
        None => warn!("STRIPE_SECRET_KEY not set, Stripe checkout disabled"),
    }

    match &config.asaas.api_key {
        Some(key) => {
            let client = AsaasClient::new(http.clone(), key.expose_secret().to_string())
                .with_api_base(config.asaas.api_base.clone());
            let prices = AsaasPriceTable {
                intermediate_cents: config.asaas.price_intermediate_cents,
                premium_cents: config.asaas.price_premium_cents,
            };
            providers.push(Arc::new(AsaasPaymentAdapter::new(client, prices)));
        }
        None => warn!("ASAAS_API_KEY not set, Asaas checkout disabled"),
    }

    providers
}

/// Webhook adapters with a verification secret configured.
fn webhook_adapters(config: &AppConfig) -> Vec<Arc<dyn PaymentProviderAdapter>> {
    let mut adapters: Vec<Arc<dyn PaymentProviderAdapter>> = Vec::new();

    match &config.stripe.webhook_secret {
        Some(secret) => adapters.push(Arc::new(StripeWebhookAdapter::new(
            secret.expose_secret().to_string(),
        ))),
        None => warn!("STRIPE_WEBHOOK_SECRET not set, Stripe webhooks will be refused"),
    }

    match &config.asaas.webhook_token {
        Some(token) => adapters.push(Arc::new(AsaasWebhookAdapter::new(
            token.expose_secret().to_string(),
        ))),
        None => warn!("ASAAS_WEBHOOK_TOKEN not set, Asaas webhooks will be refused"),
    }

    info!(count = adapters.len(), "Webhook adapters registered");
    adapters
}

pub fn init_tracing(log_format: LogFormat) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "br277_billing=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(filter);

    match log_format {
        LogFormat::Pretty => {
            let console_layer = fmt::layer()
                .with_target(false) // module path is noise on the console
                .with_level(true)
                .pretty();
            registry.with(console_layer).try_init().ok();
        }
        LogFormat::Json => {
            let json_layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true);
            registry.with(json_layer).try_init().ok();
        }
    }
}
