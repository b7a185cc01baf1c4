use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Stock symbols required")]
    MissingSymbols,
    #[error("{0}")]
    InvalidBody(String),
    #[error("{0:#}")]
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingSymbols => StatusCode::BAD_REQUEST,
            // An unreadable body is reported like any other unexpected failure.
            ApiError::InvalidBody(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(value: anyhow::Error) -> Self {
        ApiError::Internal(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(err) = &self {
            sentry_anyhow::capture_anyhow(err);
            tracing::error!(error = %format!("{err:#}"), "analysis request failed");
        }
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}
