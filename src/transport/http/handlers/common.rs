use crate::domain::inventory::ValidationError;
use crate::transport::http::types::ErrorBody;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

/// Everything a handler can fail with, mapped onto one status code each.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{message} ({id})")]
    NotFound { message: &'static str, id: String },
    #[error("{message}: {details}")]
    Store { message: &'static str, details: String },
}

impl ApiError {
    /// Logs the store failure and wraps it for the response.
    pub fn store(message: &'static str, err: sqlx::Error) -> Self {
        tracing::error!(error = %err, "{}", message);
        ApiError::Store {
            message,
            details: err.to_string(),
        }
    }

    pub fn not_found(message: &'static str, id: impl Into<String>) -> Self {
        ApiError::NotFound {
            message,
            id: id.into(),
        }
    }

    /// Rejects a body that could not be parsed as the expected JSON shape.
    pub fn invalid_body(err: JsonRejection, expected: &str) -> Self {
        ApiError::Validation(format!(
            "Invalid JSON body: {} (expected: {})",
            err.body_text(),
            expected
        ))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(error) | ApiError::Conflict(error) => ErrorBody {
                error,
                details: None,
                id: None,
            },
            ApiError::NotFound { message, id } => ErrorBody {
                error: message.to_string(),
                details: None,
                id: Some(id),
            },
            ApiError::Store { message, details } => ErrorBody {
                error: message.to_string(),
                details: Some(details),
                id: None,
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(err: ApiError) -> (StatusCode, serde_json::Value) {
        let resp = err.into_response();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), 64 * 1024).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_errors_are_400_with_message() {
        let (status, body) = body_of(ValidationError::MissingCodeOrName.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({ "error": "code and name are required" }));
    }

    #[tokio::test]
    async fn not_found_carries_the_id() {
        let (status, body) = body_of(ApiError::not_found("move not found", "m-42")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "move not found");
        assert_eq!(body["id"], "m-42");
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn store_errors_are_500_with_details() {
        let err = ApiError::store("server error", sqlx::Error::PoolTimedOut);
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "server error");
        assert!(body["details"].as_str().unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn conflicts_are_409() {
        let (status, _) = body_of(ApiError::Conflict("code already exists".into())).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }
}
