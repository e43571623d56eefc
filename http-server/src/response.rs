use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::models::StorageError;
use policy::token::TokenError;

/// Error taxonomy surfaced to callers.
///
/// Every variant renders as `{success: false, message}` JSON with the
/// matching status class; server-side detail is logged, never exposed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseError {
    Unauthorized,
    BadRequest(String),
    NotFound(String),
    ServerError(String),
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
}

impl IntoResponse for ResponseError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ResponseError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Invalid bot credentials".to_string(),
            ),
            ResponseError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ResponseError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ResponseError::ServerError(detail) => {
                tracing::error!(%detail, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (
            status,
            Json(ErrorBody {
                success: false,
                message,
            }),
        )
            .into_response()
    }
}

impl From<TokenError> for ResponseError {
    fn from(error: TokenError) -> Self {
        ResponseError::ServerError(error.to_string())
    }
}

impl From<StorageError> for ResponseError {
    fn from(error: StorageError) -> Self {
        ResponseError::ServerError(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_renders_as_client_error() {
        let response = ResponseError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn server_error_hides_internal_detail() {
        let response =
            ResponseError::ServerError("mutex poisoned in the link store".to_string())
                .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn not_found_carries_its_message() {
        let response = ResponseError::NotFound("User not found".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn error_body_is_success_false_json() {
        let response = ResponseError::BadRequest("user_id is required".to_string()).into_response();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["success"], serde_json::Value::Bool(false));
        assert_eq!(json["message"], "user_id is required");
    }
}
