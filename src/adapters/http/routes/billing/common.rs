//! Shared imports for billing routes.

pub use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};
pub use serde::{Deserialize, Serialize};
pub use tracing::info;

pub use crate::adapters::http::app_state::AppState;
pub use crate::app_error::{AppError, AppResult};
pub use crate::domain::entities::{payment_provider::PaymentProvider, plan::Plan};
