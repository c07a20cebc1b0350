use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Routing service error: {0}")]
    RoutingService(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid track: {0}")]
    InvalidTrack(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

// Convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::RoutingService(ref e) => {
                tracing::error!("Routing service error: {}", e);
                (StatusCode::BAD_GATEWAY, "Routing service error")
            }
            AppError::InvalidRequest(ref e) => (StatusCode::BAD_REQUEST, e.as_str()),
            AppError::InvalidTrack(ref e) => {
                tracing::info!("Rejected track upload: {}", e);
                (StatusCode::BAD_REQUEST, e.as_str())
            }
            AppError::Io(ref e) => {
                tracing::error!("I/O error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Storage error")
            }
            AppError::Internal(ref e) => {
                tracing::error!("Internal error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({
            "error": status.canonical_reason().unwrap_or("Unknown error"),
            "message": error_message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                AppError::RoutingService("down".to_string()),
                StatusCode::BAD_GATEWAY,
            ),
            (
                AppError::InvalidRequest("bad".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::InvalidTrack("empty".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Internal("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error: AppError = io.into();
        assert!(matches!(error, AppError::Io(_)));
        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
