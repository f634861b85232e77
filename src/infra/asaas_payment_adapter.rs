use async_trait::async_trait;

use crate::{
    app_error::{AppError, AppResult},
    application::ports::payment_provider::{CheckoutRequest, CheckoutSession, PaymentProviderPort},
    domain::entities::{payment_provider::PaymentProvider, plan::Plan},
    infra::asaas_client::{AsaasClient, AsaasPaymentLinkRequest},
};

const LINK_SUFFIX: &str = "Guia Comercial BR277";

/// Plan prices in BRL cents
#[derive(Debug, Clone, Copy)]
pub struct AsaasPriceTable {
    pub intermediate_cents: u64,
    pub premium_cents: u64,
}

impl AsaasPriceTable {
    pub fn price_for(&self, plan: Plan) -> Option<u64> {
        match plan {
            Plan::Free => None,
            Plan::Intermediate => Some(self.intermediate_cents),
            Plan::Premium => Some(self.premium_cents),
        }
    }
}

/// Adapter that wraps AsaasClient to implement PaymentProviderPort.
#[derive(Clone)]
pub struct AsaasPaymentAdapter {
    client: AsaasClient,
    prices: AsaasPriceTable,
}

impl AsaasPaymentAdapter {
    pub fn new(client: AsaasClient, prices: AsaasPriceTable) -> Self {
        Self { client, prices }
    }
}

#[async_trait]
impl PaymentProviderPort for AsaasPaymentAdapter {
    fn provider(&self) -> PaymentProvider {
        PaymentProvider::Asaas
    }

    async fn create_checkout(&self, request: &CheckoutRequest) -> AppResult<CheckoutSession> {
        let value_cents = self.prices.price_for(request.plan).ok_or_else(|| {
            AppError::Validation(format!("plan {} cannot be purchased", request.plan))
        })?;

        // The webhook recovers the plan from this description
        let link = AsaasPaymentLinkRequest::detached(
            request.plan.display_name(),
            format!("{} - {}", request.plan.display_name(), LINK_SUFFIX),
            value_cents,
            request.business_id.as_str(),
            &request.urls.success_url,
        );

        let created = self.client.create_payment_link(&link).await?;

        Ok(CheckoutSession {
            session_id: created.id,
            url: created.url,
            provider: PaymentProvider::Asaas,
        })
    }
}
