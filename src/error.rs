use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Failure taxonomy for a console whose only dependency is the backend:
/// transport failed, the backend answered with an error status, or it
/// answered with JSON the console cannot make sense of. All three skip the
/// current tick and keep prior state; none of them may clear the scene.
#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error("network error: {0}")]
    Network(String),

    #[error("backend returned status {0}")]
    Server(u16),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for ConsoleError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            ConsoleError::Server(status.as_u16())
        } else if err.is_decode() {
            ConsoleError::Malformed(err.to_string())
        } else {
            ConsoleError::Network(err.to_string())
        }
    }
}

impl IntoResponse for ConsoleError {
    fn into_response(self) -> Response {
        let status = match &self {
            ConsoleError::Network(_) | ConsoleError::Server(_) | ConsoleError::Malformed(_) => {
                StatusCode::BAD_GATEWAY
            }
            ConsoleError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}
