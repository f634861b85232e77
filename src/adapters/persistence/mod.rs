use sqlx::PgPool;

use crate::app_error::AppError;

pub mod business_directory;
pub mod payment_event_log;

#[derive(Clone)]
pub struct PostgresPersistence {
    pool: PgPool,
}

impl PostgresPersistence {
    pub fn new(pool: PgPool) -> Self {
        PostgresPersistence { pool }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        // Log the actual error for debugging, but don't expose details
        tracing::error!(error = ?err, "Database error");
        match err {
            sqlx::Error::PoolTimedOut => AppError::Timeout("database pool exhausted".into()),
            other => AppError::Database(other.to_string()),
        }
    }
}

/// Parse a TEXT column holding an enum name, logging instead of failing on
/// values this service does not know.
pub(crate) fn parse_enum_column<T: std::str::FromStr>(
    raw: Option<String>,
    field_name: &str,
    entity_id: &str,
) -> Option<T> {
    let raw = raw?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(
                field = field_name,
                entity_id = entity_id,
                raw_value = %raw,
                "Unknown enum value in column, treating as empty"
            );
            None
        }
    }
}
