use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::app_error::{AppError, AppResult};

pub const ASAAS_API_BASE: &str = "https://api.asaas.com/v3";

/// Days the payer has to settle a boleto/PIX generated from a link
const DUE_DATE_LIMIT_DAYS: u32 = 3;

#[derive(Clone)]
pub struct AsaasClient {
    client: Client,
    api_key: String,
    api_base: String,
}

impl AsaasClient {
    pub fn new(client: Client, api_key: String) -> Self {
        Self {
            client,
            api_key,
            api_base: ASAAS_API_BASE.to_string(),
        }
    }

    /// Point the client at another API root (sandbox, tests).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Create a single-use payment link. `external_reference` comes back as
    /// `payment.externalReference` on payment webhooks.
    pub async fn create_payment_link(
        &self,
        request: &AsaasPaymentLinkRequest,
    ) -> AppResult<AsaasPaymentLink> {
        let response = self
            .client
            .post(format!("{}/paymentLinks", self.api_base))
            .header("access_token", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::Provider(format!("Asaas request failed: {}", e)))?;

        self.handle_response(response).await
    }

    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> AppResult<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Provider(format!("Failed to read Asaas response: {}", e)))?;

        if !status.is_success() {
            tracing::error!(status = %status, body = %body, "Asaas API error");

            if let Ok(error) = serde_json::from_str::<AsaasErrorResponse>(&body) {
                let description = error
                    .errors
                    .into_iter()
                    .map(|e| e.description)
                    .collect::<Vec<_>>()
                    .join("; ");
                return Err(AppError::Provider(format!("Asaas error: {}", description)));
            }

            return Err(AppError::Provider(format!(
                "Asaas API error: {} - {}",
                status, body
            )));
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(body = %body, error = %e, "Failed to parse Asaas response");
            AppError::Provider(format!("Failed to parse Asaas response: {}", e))
        })
    }
}

// ============================================================================
// Asaas Types
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AsaasPaymentLinkRequest {
    pub name: String,
    pub description: String,
    /// In BRL, not cents
    pub value: f64,
    pub billing_type: String,
    pub charge_type: String,
    pub due_date_limit_days: u32,
    pub external_reference: String,
    pub callback: AsaasCallback,
}

impl AsaasPaymentLinkRequest {
    /// One-off link letting the payer pick PIX, boleto or card.
    pub fn detached(
        name: impl Into<String>,
        description: impl Into<String>,
        value_cents: u64,
        external_reference: impl Into<String>,
        success_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            value: value_cents as f64 / 100.0,
            billing_type: "UNDEFINED".to_string(),
            charge_type: "DETACHED".to_string(),
            due_date_limit_days: DUE_DATE_LIMIT_DAYS,
            external_reference: external_reference.into(),
            callback: AsaasCallback {
                success_url: success_url.into(),
                auto_redirect: true,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AsaasCallback {
    pub success_url: String,
    pub auto_redirect: bool,
}

#[derive(Debug, Deserialize)]
pub struct AsaasPaymentLink {
    pub id: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct AsaasErrorResponse {
    #[serde(default)]
    pub errors: Vec<AsaasError>,
}

#[derive(Debug, Deserialize)]
pub struct AsaasError {
    pub description: String,
}

// ============================================================================
// Webhook Event Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct AsaasWebhookEvent {
    pub id: Option<String>,
    pub event: String,
    pub payment: Option<AsaasPayment>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AsaasPayment {
    pub id: String,
    pub external_reference: Option<String>,
    pub description: Option<String>,
}
