//! Error type shared by the store, the versioning engine and the HTTP services.
//!
//! Every handler returns `ApiResult<T>`; `ApiError` renders itself as a JSON
//! body through `actix_web::ResponseError`, so validation failures carry the
//! offending titles in a machine-readable `titles` array.

use crate::sources::SourceError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The request is well-formed but violates a domain rule.
    #[error("{message}")]
    Validation {
        message: String,
        /// Offending item titles, sorted. Empty when the error is not about titles.
        titles: Vec<String>,
    },

    #[error("authentication required")]
    Unauthorized,

    #[error("{0} not found")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    /// A collaborator (cache provider, publish sink) failed.
    #[error("external failure: {0}")]
    ExternalFailure(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            titles: Vec::new(),
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "validation",
            ApiError::Unauthorized => "unauthorized",
            ApiError::NotFound(_) => "not_found",
            ApiError::Conflict(_) => "conflict",
            ApiError::ExternalFailure(_) => "external_failure",
            ApiError::Database(_) | ApiError::Serialization(_) | ApiError::Internal(_) => {
                "internal"
            }
        }
    }
}

impl From<SourceError> for ApiError {
    fn from(err: SourceError) -> Self {
        ApiError::ExternalFailure(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(format!("join error: {}", err))
    }
}

/// Maps a unique-constraint violation to `Conflict`, leaving other errors as they are.
pub(crate) fn conflict_on_unique(err: rusqlite::Error, message: impl Into<String>) -> ApiError {
    match err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            ApiError::Conflict(message.into())
        }
        other => ApiError::Database(other),
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    detail: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    titles: Vec<String>,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::ExternalFailure(_) => StatusCode::BAD_GATEWAY,
            ApiError::Database(_) | ApiError::Serialization(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let titles = match self {
            ApiError::Validation { titles, .. } => titles.clone(),
            _ => Vec::new(),
        };
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.kind(),
            detail: self.to_string(),
            titles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn status_codes_follow_error_kind() {
        assert_eq!(
            ApiError::validation("bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::not_found("package 'x'").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(ApiError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::ExternalFailure("down".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            ApiError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn not_found_formats_subject() {
        let err = ApiError::not_found("package 'story1'");
        assert_eq!(err.to_string(), "package 'story1' not found");
    }

    #[test]
    fn source_errors_become_external_failures() {
        let err: ApiError = SourceError::NotFound("news/story1".into()).into();
        assert!(matches!(err, ApiError::ExternalFailure(_)));
    }

    #[actix_web::test]
    async fn validation_body_lists_titles() {
        let err = ApiError::Validation {
            message: "missing".to_string(),
            titles: vec!["c".to_string(), "d".to_string()],
        };
        let body = to_bytes(err.error_response().into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], "validation");
        assert_eq!(value["detail"], "missing");
        assert_eq!(value["titles"], serde_json::json!(["c", "d"]));
    }

    #[actix_web::test]
    async fn non_validation_body_omits_titles() {
        let body = to_bytes(ApiError::Conflict("taken".into()).error_response().into_body())
            .await
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], "conflict");
        assert!(value.get("titles").is_none());
    }
}
