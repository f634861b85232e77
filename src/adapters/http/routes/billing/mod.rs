//! Guia Comercial billing routes.
//!
//! # Route Groups
//!
//! - **Checkout** (1 route): start a hosted checkout for a paid plan
//! - **Webhooks** (2 routes): Stripe and Asaas payment notifications
//! - **Subscription** (1 route): read a business's current plan

mod checkout;
mod common;
mod subscription;
mod webhooks;

use crate::adapters::http::app_state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    checkout::router()
        .merge(webhooks::router())
        .merge(subscription::router())
}
