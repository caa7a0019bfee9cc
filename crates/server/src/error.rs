use axum::extract::multipart::MultipartError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use storefront::ServiceError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Errors returned by handlers and middleware.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    /// Payload failed to parse or validate. One message per problem.
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// Rejected credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// Missing or invalid bearer token on a guarded route.
    #[error("Unauthorized")]
    Guard,

    /// Status plus message with no `error` label in the body.
    #[error("{message}")]
    Plain { status: StatusCode, message: String },

    #[error("internal error: {0}")]
    Internal(String),
}

/// Wire shape of every error response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub status_code: u16,
    pub message: ErrorMessage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) | ApiError::Guard => StatusCode::UNAUTHORIZED,
            ApiError::Plain { status, .. } => *status,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn body(self) -> ErrorBody {
        let status_code = self.status_code().as_u16();
        let (message, error) = match self {
            ApiError::NotFound(message) => (ErrorMessage::One(message), Some("Not Found")),
            ApiError::BadRequest(message) => (ErrorMessage::One(message), Some("Bad Request")),
            ApiError::Validation(messages) => (ErrorMessage::Many(messages), Some("Bad Request")),
            ApiError::Unauthorized(message) => (ErrorMessage::One(message), Some("Unauthorized")),
            ApiError::Guard => (ErrorMessage::One("Unauthorized".into()), None),
            ApiError::Plain { message, .. } => (ErrorMessage::One(message), None),
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "request failed");
                (ErrorMessage::One("Internal server error".into()), None)
            }
        };
        ErrorBody {
            status_code,
            message,
            error: error.map(str::to_string),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(self.body())).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Unauthorized(message) => ApiError::Unauthorized(message.to_string()),
            ServiceError::Conflict(message) => ApiError::BadRequest(message.to_string()),
            ServiceError::InvalidFile(message) => ApiError::BadRequest(message),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Validation(vec![rejection.body_text()])
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(format!("blocking task failed: {err}"))
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        ApiError::BadRequest(err.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body_json(err: ApiError) -> serde_json::Value {
        serde_json::to_value(err.body()).unwrap()
    }

    #[test]
    fn not_found_carries_label() {
        assert_eq!(
            body_json(ApiError::not_found("Продукт с таким ID не найден")),
            json!({
                "statusCode": 404,
                "message": "Продукт с таким ID не найден",
                "error": "Not Found",
            })
        );
    }

    #[test]
    fn plain_and_guard_omit_label() {
        assert_eq!(
            body_json(ApiError::Plain {
                status: StatusCode::NOT_FOUND,
                message: "gone".into(),
            }),
            json!({ "statusCode": 404, "message": "gone" })
        );
        assert_eq!(
            body_json(ApiError::Guard),
            json!({ "statusCode": 401, "message": "Unauthorized" })
        );
    }

    #[test]
    fn validation_lists_messages() {
        let body = body_json(ApiError::Validation(vec!["a".into(), "b".into()]));
        assert_eq!(body["message"], json!(["a", "b"]));
        assert_eq!(body["error"], "Bad Request");
    }

    #[test]
    fn service_errors_map_to_statuses() {
        let conflict: ApiError = ServiceError::Conflict("taken").into();
        assert_eq!(conflict.status_code(), StatusCode::BAD_REQUEST);

        let denied: ApiError = ServiceError::Unauthorized("nope").into();
        assert_eq!(denied.status_code(), StatusCode::UNAUTHORIZED);

        let io: ApiError = ServiceError::Io(std::io::Error::other("disk")).into();
        assert_eq!(io.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(io)["message"], "Internal server error");
    }
}
