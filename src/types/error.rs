use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use thiserror::Error;

use crate::types::validate::{FieldError, ValidationErrors};

#[derive(Debug, Error)]
pub enum AppError {
    // domain
    #[error("already exists")]
    AlreadyExists,
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("{entity} cannot {event} while {from}")]
    InvalidTransition {
        entity: &'static str,
        from: String,
        event: String,
    },

    // boundary
    #[error("validation error: {0}")]
    Validation(ValidationErrors),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unauthorized")]
    Unauthorized,

    // infra things
    #[error("unsupported store handle")]
    UnsupportedHandle,
    #[error(transparent)]
    Db(DbErr),
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<DbErr> for AppError {
    fn from(e: DbErr) -> Self {
        AppError::from_db(e)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(e: ValidationErrors) -> Self {
        AppError::Validation(e)
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<&'a [FieldError]>,
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AlreadyExists => "ALREADY_EXISTS",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UnsupportedHandle => "UNSUPPORTED_HANDLE",
            Self::Db(_) => "DB_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn from_db(err: DbErr) -> Self {
        match err {
            DbErr::RecordNotFound(msg) => AppError::NotFound(msg),
            _ => AppError::Db(err),
        }
    }

    /// True when the store rejected a write on a unique index or key.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::Db(err) => matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))),
            _ => false,
        }
    }

    /// Turns a unique violation into a domain conflict, leaves everything else alone.
    pub fn on_unique_violation(self, message: impl Into<String>) -> Self {
        if self.is_unique_violation() {
            AppError::Conflict(message.into())
        } else {
            self
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::AlreadyExists | Self::Conflict(_) | Self::InvalidTransition { .. } => {
                StatusCode::CONFLICT
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::UnsupportedHandle | Self::Db(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let fields = match self {
            Self::Validation(errors) => Some(errors.fields()),
            _ => None,
        };
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.kind(),
            message: self.to_string(),
            fields,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_and_commit_failures_are_server_errors() {
        let store = AppError::from(DbErr::Custom("disk I/O error".into()));
        assert!(matches!(store, AppError::Db(_)));
        assert_eq!(store.kind(), "DB_ERROR");
        assert_eq!(store.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!store.is_unique_violation());

        let commit = AppError::Internal("commit failed: busy".into());
        assert_eq!(commit.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn missing_records_become_not_found() {
        let err = AppError::from(DbErr::RecordNotFound("team 42".into()));
        assert!(matches!(err, AppError::NotFound(ref m) if m == "team 42"));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
    }
}
