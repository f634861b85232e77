use crate::app_error::{AppError, ErrorCode};
use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error before it gets converted into a status response.
        if is_logged_upstream(&self) {
            tracing::debug!(error = ?self, "Request rejected");
        } else {
            tracing::error!(error = ?self, "Request failed");
        }

        let code = self.code();
        match self {
            AppError::Validation(msg)
            | AppError::UnidentifiablePlan(msg)
            | AppError::MissingReference(msg) => error_resp(status_for(code), code, &msg),
            AppError::Authenticity(_) => {
                error_resp(status_for(code), code, "invalid webhook signature")
            }
            AppError::Provider(_) => {
                error_resp(status_for(code), code, "payment service unavailable")
            }
            AppError::BusinessNotFound(_) => {
                error_resp(status_for(code), code, "business not found")
            }
            AppError::Configuration(_)
            | AppError::Database(_)
            | AppError::Timeout(_)
            | AppError::Internal(_) => error_resp(status_for(code), code, "internal server error"),
        }
    }
}

/// Authenticity failures already carry a `security` warning from the webhook
/// ingestor.
fn is_logged_upstream(err: &AppError) -> bool {
    matches!(err, AppError::Authenticity(_))
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
        ErrorCode::AuthenticityError => StatusCode::UNAUTHORIZED,
        ErrorCode::ProviderError => StatusCode::BAD_GATEWAY,
        ErrorCode::UnidentifiablePlan | ErrorCode::MissingReference => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ErrorCode::BusinessNotFound => StatusCode::NOT_FOUND,
        ErrorCode::ConfigurationError
        | ErrorCode::DatabaseError
        | ErrorCode::Timeout
        | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_resp(status: StatusCode, code: ErrorCode, message: &str) -> Response {
    let body = serde_json::json!({ "error": message, "code": code.as_str() });
    (status, Json(body)).into_response()
}
