use std::sync::Arc;

use crate::{
    infra::config::AppConfig,
    use_cases::{
        checkout::CheckoutUseCases, subscription::SubscriptionUseCases,
        webhook_ingest::WebhookIngestor,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub checkout_use_cases: Arc<CheckoutUseCases>,
    pub webhook_ingestor: Arc<WebhookIngestor>,
    pub subscription_use_cases: Arc<SubscriptionUseCases>,
}
