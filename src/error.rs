//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Rejections from the filter and sort compilers. Messages are part of the public API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Invalid field in query params.")]
    InvalidField(String),
    #[error("Invalid order_by field.")]
    InvalidSortField(String),
    #[error("sort_order must be either 'asc', 'desc', or ''")]
    InvalidSortOrder(String),
}

/// Failures from [`crate::service::ResourceStore`].
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("not found: {table} {id}")]
    NotFound { table: &'static str, id: i64 },
    #[error("database: {0}")]
    Internal(#[from] sqlx::Error),
}

impl StoreError {
    /// True for integrity violations (SQLSTATE class 23: unique, foreign key, not null, check).
    pub fn is_constraint_violation(&self) -> bool {
        self.sqlstate_class() == Some("23")
    }

    /// True for data exceptions (SQLSTATE class 22), e.g. a filter value that does not
    /// cast to the column type.
    pub fn is_invalid_input(&self) -> bool {
        self.sqlstate_class() == Some("22")
    }

    fn sqlstate_class(&self) -> Option<&'static str> {
        match self {
            StoreError::Internal(sqlx::Error::Database(e)) => match e.code() {
                Some(c) if c.starts_with("22") => Some("22"),
                Some(c) if c.starts_with("23") => Some("23"),
                _ => None,
            },
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("DATABASE_URL environment variable is required")]
    MissingDatabaseUrl,
    #[error("invalid value for {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
    #[error("invalid schema name: {0}")]
    InvalidSchema(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("validation: {0}")]
    Validation(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl AppError {
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Query(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Store(StoreError::NotFound { .. }) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Store(e) if e.is_constraint_violation() => (StatusCode::CONFLICT, "conflict"),
            AppError::Store(e) if e.is_invalid_input() => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
            AppError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = match &self {
            AppError::Store(StoreError::Internal(e)) => {
                if status == StatusCode::INTERNAL_SERVER_ERROR {
                    tracing::error!(error = %e, "store failure");
                } else {
                    tracing::warn!(error = %e, "store rejected write or filter value");
                }
                match status {
                    StatusCode::CONFLICT => "constraint violation".to_string(),
                    StatusCode::BAD_REQUEST => "invalid value for column type".to_string(),
                    _ => "internal error".to_string(),
                }
            }
            other => other.to_string(),
        };
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                details: None,
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_messages_are_verbatim() {
        assert_eq!(
            QueryError::InvalidField("x".into()).to_string(),
            "Invalid field in query params."
        );
        assert_eq!(
            QueryError::InvalidSortField("x".into()).to_string(),
            "Invalid order_by field."
        );
        assert_eq!(
            QueryError::InvalidSortOrder("random".into()).to_string(),
            "sort_order must be either 'asc', 'desc', or ''"
        );
    }

    #[test]
    fn status_mapping() {
        let q: AppError = QueryError::InvalidField("nope".into()).into();
        assert_eq!(q.status_and_code(), (StatusCode::BAD_REQUEST, "bad_request"));

        let nf: AppError = StoreError::NotFound { table: "members", id: 7 }.into();
        assert_eq!(nf.status_and_code(), (StatusCode::NOT_FOUND, "not_found"));

        let internal: AppError = StoreError::Internal(sqlx::Error::PoolTimedOut).into();
        assert_eq!(
            internal.status_and_code(),
            (StatusCode::INTERNAL_SERVER_ERROR, "database_error")
        );

        let v = AppError::Validation("email must be a valid email".into());
        assert_eq!(v.status_and_code().0, StatusCode::UNPROCESSABLE_ENTITY);

        let big = AppError::PayloadTooLarge("length limit exceeded".into());
        assert_eq!(big.status_and_code(), (StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large"));
    }

    #[test]
    fn non_database_errors_are_not_constraint_violations() {
        assert!(!StoreError::Internal(sqlx::Error::RowNotFound).is_constraint_violation());
        assert!(!StoreError::NotFound { table: "gyms", id: 1 }.is_constraint_violation());
        assert!(!StoreError::Internal(sqlx::Error::PoolTimedOut).is_invalid_input());
    }

    #[test]
    fn internal_error_response_hides_cause() {
        let resp = AppError::Store(StoreError::Internal(sqlx::Error::PoolClosed)).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
