use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use axum::http::HeaderValue;
use env_helpers::{get_env, get_env_default};
use secrecy::SecretString;
use strum::EnumString;
use url::Url;

use crate::{
    application::ports::payment_provider::CheckoutUrls, infra::asaas_client::ASAAS_API_BASE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogFormat {
    /// Human-friendly console output
    #[default]
    Pretty,
    /// One JSON object per line on stdout
    Json,
}

impl LogFormat {
    /// Read on its own so tracing can start before the rest of the config.
    pub fn from_env() -> Self {
        get_env_default("LOG_FORMAT", LogFormat::Pretty)
    }
}

/// Stripe credentials. Every field is optional at startup; a missing one
/// surfaces as a configuration error on the operation that needs it.
pub struct StripeConfig {
    pub secret_key: Option<SecretString>,
    pub webhook_secret: Option<SecretString>,
    pub price_intermediate: Option<String>,
    pub price_premium: Option<String>,
}

pub struct AsaasConfig {
    pub api_key: Option<SecretString>,
    pub api_base: String,
    pub webhook_token: Option<SecretString>,
    pub price_intermediate_cents: u64,
    pub price_premium_cents: u64,
}

pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub database_url: String,
    /// Public site origin; checkout success/cancel pages live here.
    pub app_origin: Url,
    pub cors_origin: HeaderValue,
    /// Bound on each business directory round trip
    pub db_write_timeout: Duration,
    pub stripe: StripeConfig,
    pub asaas: AsaasConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let bind_addr: SocketAddr =
            get_env_default("BIND_ADDR", SocketAddr::from(([127, 0, 0, 1], 3001)));
        let database_url: String = get_env("DATABASE_URL");
        let app_origin: Url = get_env("APP_ORIGIN");
        let cors_origin: HeaderValue =
            get_env_default("CORS_ORIGIN", String::from("http://localhost:3000"))
                .parse()
                .context("CORS_ORIGIN must be a valid header value")?;
        let db_write_timeout_secs: u64 = get_env_default("DB_WRITE_TIMEOUT_SECS", 10);

        let stripe = StripeConfig {
            secret_key: optional_secret("STRIPE_SECRET_KEY"),
            webhook_secret: optional_secret("STRIPE_WEBHOOK_SECRET"),
            price_intermediate: optional_var("STRIPE_PRICE_INTERMEDIARIO"),
            price_premium: optional_var("STRIPE_PRICE_PREMIUM"),
        };

        let asaas = AsaasConfig {
            api_key: optional_secret("ASAAS_API_KEY"),
            api_base: get_env_default("ASAAS_API_BASE", ASAAS_API_BASE.to_string()),
            webhook_token: optional_secret("ASAAS_WEBHOOK_TOKEN"),
            price_intermediate_cents: get_env_default("ASAAS_PRICE_INTERMEDIARIO_CENTS", 14_990),
            price_premium_cents: get_env_default("ASAAS_PRICE_PREMIUM_CENTS", 24_990),
        };

        Ok(Self {
            bind_addr,
            database_url,
            app_origin,
            cors_origin,
            db_write_timeout: Duration::from_secs(db_write_timeout_secs),
            stripe,
            asaas,
        })
    }

    /// Where the provider sends the payer back after checkout.
    pub fn checkout_urls(&self) -> CheckoutUrls {
        let origin = self.app_origin.as_str().trim_end_matches('/');
        CheckoutUrls {
            success_url: format!("{}/guia-comercial/pagamento/sucesso", origin),
            cancel_url: format!("{}/guia-comercial/pagamento/cancelado", origin),
        }
    }
}

fn optional_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn optional_secret(key: &str) -> Option<SecretString> {
    optional_var(key).map(|v| SecretString::new(v.into()))
}
