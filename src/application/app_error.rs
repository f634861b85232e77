use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Webhook authenticity check failed: {0}")]
    Authenticity(String),

    #[error("Payment provider error: {0}")]
    Provider(String),

    #[error("Unidentifiable plan: {0}")]
    UnidentifiablePlan(String),

    #[error("Missing reference: {0}")]
    MissingReference(String),

    #[error("Business not found: {0}")]
    BusinessNotFound(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Operation timed out: {0}")]
    Timeout(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::Configuration(_) => ErrorCode::ConfigurationError,
            AppError::Validation(_) => ErrorCode::ValidationError,
            AppError::Authenticity(_) => ErrorCode::AuthenticityError,
            AppError::Provider(_) => ErrorCode::ProviderError,
            AppError::UnidentifiablePlan(_) => ErrorCode::UnidentifiablePlan,
            AppError::MissingReference(_) => ErrorCode::MissingReference,
            AppError::BusinessNotFound(_) => ErrorCode::BusinessNotFound,
            AppError::Database(_) => ErrorCode::DatabaseError,
            AppError::Timeout(_) => ErrorCode::Timeout,
            AppError::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// Whether a payment provider retrying the same webhook could succeed.
    ///
    /// Retryable errors are answered with 5xx; everything else on the webhook
    /// path is acknowledged so the provider stops resending.
    pub fn is_retryable(&self) -> bool {
        match self {
            // Transient errors - retry may succeed
            AppError::Database(_) => true,
            AppError::Timeout(_) => true,
            AppError::Internal(_) => true,
            // Operator fixes the deployment, the provider's next retry succeeds
            AppError::Configuration(_) => true,

            // Won't change with retry
            AppError::Validation(_) => false,
            AppError::Authenticity(_) => false,
            AppError::Provider(_) => false,
            AppError::UnidentifiablePlan(_) => false,
            AppError::MissingReference(_) => false,
            AppError::BusinessNotFound(_) => false,
        }
    }

    /// Errors that point at bad data between checkout and the directory and
    /// need an operator to reconcile by hand.
    pub fn is_data_integrity(&self) -> bool {
        matches!(
            self,
            AppError::UnidentifiablePlan(_)
                | AppError::MissingReference(_)
                | AppError::BusinessNotFound(_)
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCode {
    ConfigurationError,
    ValidationError,
    AuthenticityError,
    ProviderError,
    UnidentifiablePlan,
    MissingReference,
    BusinessNotFound,
    DatabaseError,
    Timeout,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::ConfigurationError => "CONFIGURATION_ERROR",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::AuthenticityError => "AUTHENTICITY_ERROR",
            ErrorCode::ProviderError => "PROVIDER_ERROR",
            ErrorCode::UnidentifiablePlan => "UNIDENTIFIABLE_PLAN",
            ErrorCode::MissingReference => "MISSING_REFERENCE",
            ErrorCode::BusinessNotFound => "BUSINESS_NOT_FOUND",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::Timeout => "TIMEOUT",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
