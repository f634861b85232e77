use std::{collections::HashMap, sync::Arc};

use tracing::{error, info, instrument};

use crate::{
    app_error::{AppError, AppResult},
    application::{
        ports::payment_provider::{
            CheckoutRequest, CheckoutSession, CheckoutUrls, PaymentProviderPort,
        },
        validators::is_valid_business_id,
    },
    domain::entities::{
        business_subscription::BusinessId, payment_provider::PaymentProvider, plan::Plan,
    },
};

/// Starts provider-hosted checkouts for directory listings.
pub struct CheckoutUseCases {
    providers: HashMap<PaymentProvider, Arc<dyn PaymentProviderPort>>,
    urls: CheckoutUrls,
}

impl CheckoutUseCases {
    pub fn new(providers: Vec<Arc<dyn PaymentProviderPort>>, urls: CheckoutUrls) -> Self {
        let providers = providers
            .into_iter()
            .map(|provider| (provider.provider(), provider))
            .collect();
        Self { providers, urls }
    }

    /// Nothing is stored locally; the session only exists at the provider
    /// until a webhook confirms payment.
    #[instrument(skip(self))]
    pub async fn create_checkout_session(
        &self,
        plan: Plan,
        business_id: &str,
        provider: Option<PaymentProvider>,
    ) -> AppResult<CheckoutSession> {
        if !plan.is_paid() {
            return Err(AppError::Validation(format!(
                "plan {} cannot be purchased",
                plan
            )));
        }

        if !is_valid_business_id(business_id) {
            return Err(AppError::Validation("invalid businessId".into()));
        }

        let provider = provider.unwrap_or_default();
        let port = self.providers.get(&provider).ok_or_else(|| {
            AppError::Configuration(format!(
                "{} credentials are not configured",
                provider.display_name()
            ))
        })?;

        let request = CheckoutRequest {
            plan,
            business_id: BusinessId::new(business_id),
            urls: self.urls.clone(),
        };

        let session = port.create_checkout(&request).await.inspect_err(|err| {
            error!(
                provider = %provider,
                business_id,
                error = %err,
                "Checkout session creation failed"
            );
        })?;

        info!(
            provider = %provider,
            business_id,
            session_id = %session.session_id,
            "Checkout session created"
        );

        Ok(session)
    }
}
