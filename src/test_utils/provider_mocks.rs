//! Stub payment providers and a local HTTP server standing in for provider APIs.

use async_trait::async_trait;
use std::sync::Mutex;

use axum::Router;

use crate::{
    app_error::{AppError, AppResult},
    application::ports::payment_provider::{CheckoutRequest, CheckoutSession, PaymentProviderPort},
    domain::entities::payment_provider::PaymentProvider,
};

/// Records checkout requests and answers with a fake hosted URL.
pub struct StubPaymentProvider {
    provider: PaymentProvider,
    failure: Option<String>,
    requests: Mutex<Vec<CheckoutRequest>>,
}

impl StubPaymentProvider {
    pub fn new(provider: PaymentProvider) -> Self {
        Self {
            provider,
            failure: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every checkout fails with `AppError::Provider(message)`.
    pub fn failing(provider: PaymentProvider, message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new(provider)
        }
    }

    pub fn requests(&self) -> Vec<CheckoutRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentProviderPort for StubPaymentProvider {
    fn provider(&self) -> PaymentProvider {
        self.provider
    }

    async fn create_checkout(&self, request: &CheckoutRequest) -> AppResult<CheckoutSession> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(message) = &self.failure {
            return Err(AppError::Provider(message.clone()));
        }

        let session_id = format!("{}_session_{}", self.provider, request.business_id);
        Ok(CheckoutSession {
            url: format!("https://pay.{}.test/{}", self.provider, session_id),
            session_id,
            provider: self.provider,
        })
    }
}

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn_mock_provider(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}
