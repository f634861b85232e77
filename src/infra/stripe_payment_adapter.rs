use async_trait::async_trait;

use crate::{
    app_error::{AppError, AppResult},
    application::ports::payment_provider::{CheckoutRequest, CheckoutSession, PaymentProviderPort},
    domain::entities::{payment_provider::PaymentProvider, plan::Plan},
    infra::{
        stripe_client::StripeClient,
        stripe_webhook_adapter::{METADATA_BUSINESS_ID, METADATA_PLAN},
    },
};

/// Static plan -> Stripe price id table
#[derive(Debug, Clone, Default)]
pub struct StripePriceTable {
    pub intermediate: Option<String>,
    pub premium: Option<String>,
}

impl StripePriceTable {
    pub fn price_for(&self, plan: Plan) -> Option<&str> {
        match plan {
            Plan::Free => None,
            Plan::Intermediate => self.intermediate.as_deref(),
            Plan::Premium => self.premium.as_deref(),
        }
    }
}

/// Adapter that wraps StripeClient to implement PaymentProviderPort.
#[derive(Clone)]
pub struct StripePaymentAdapter {
    client: StripeClient,
    prices: StripePriceTable,
}

impl StripePaymentAdapter {
    pub fn new(client: StripeClient, prices: StripePriceTable) -> Self {
        Self { client, prices }
    }
}

#[async_trait]
impl PaymentProviderPort for StripePaymentAdapter {
    fn provider(&self) -> PaymentProvider {
        PaymentProvider::Stripe
    }

    async fn create_checkout(&self, request: &CheckoutRequest) -> AppResult<CheckoutSession> {
        let price_id = self.prices.price_for(request.plan).ok_or_else(|| {
            AppError::Configuration(format!("no Stripe price configured for plan {}", request.plan))
        })?;

        let session = self
            .client
            .create_checkout_session(
                price_id,
                &request.urls.success_url,
                &request.urls.cancel_url,
                request.business_id.as_str(),
                &[
                    (METADATA_BUSINESS_ID, request.business_id.as_str()),
                    (METADATA_PLAN, request.plan.as_ref()),
                ],
            )
            .await?;

        let url = session.url.ok_or_else(|| {
            AppError::Provider(format!("Stripe session {} has no checkout url", session.id))
        })?;

        Ok(CheckoutSession {
            session_id: session.id,
            url,
            provider: PaymentProvider::Stripe,
        })
    }
}
