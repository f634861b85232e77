//! Provider webhook bodies and authentication headers as the providers send them.

use axum::http::{HeaderMap, HeaderValue};
use serde_json::json;

use crate::infra::{
    asaas_webhook_adapter::TOKEN_HEADER, stripe_client::StripeClient,
    stripe_webhook_adapter::SIGNATURE_HEADER,
};

/// Asaas payment webhook body
pub fn asaas_payment_payload(
    event: &str,
    payment_id: &str,
    external_reference: &str,
    description: &str,
) -> String {
    let status = if event == "PAYMENT_RECEIVED" {
        "RECEIVED"
    } else {
        "CONFIRMED"
    };
    json!({
        "id": format!("evt_{}_{}", payment_id, event.to_lowercase()),
        "event": event,
        "dateCreated": "2024-06-12 16:45:03",
        "payment": {
            "object": "payment",
            "id": payment_id,
            "customer": "cus_000005401844",
            "value": 249.9,
            "netValue": 244.92,
            "billingType": "PIX",
            "status": status,
            "description": description,
            "externalReference": external_reference,
            "paymentLink": "lnk_mock_1"
        }
    })
    .to_string()
}

pub fn asaas_headers(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(TOKEN_HEADER, HeaderValue::from_str(token).unwrap());
    headers
}

/// Stripe `checkout.session.completed` body for a paid session
pub fn stripe_checkout_payload(session_id: &str, business_id: &str, plano: &str) -> String {
    json!({
        "id": format!("evt_{}", session_id),
        "object": "event",
        "type": "checkout.session.completed",
        "data": {
            "object": {
                "id": session_id,
                "object": "checkout.session",
                "mode": "payment",
                "client_reference_id": business_id,
                "payment_status": "paid",
                "status": "complete",
                "metadata": {
                    "businessId": business_id,
                    "plano": plano
                }
            }
        }
    })
    .to_string()
}

/// `Stripe-Signature` header signed now with `secret`
pub fn stripe_headers(body: &str, secret: &str) -> HeaderMap {
    let signature =
        StripeClient::sign_payload(body.as_bytes(), secret, chrono::Utc::now().timestamp())
            .unwrap();
    let mut headers = HeaderMap::new();
    headers.insert(SIGNATURE_HEADER, HeaderValue::from_str(&signature).unwrap());
    headers
}
