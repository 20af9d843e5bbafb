//! Request-level error taxonomy.
//!
//! Every failure in the upload pipeline maps to a status code and a JSON body
//! carrying a single `detail` string. Nothing is retried or swallowed.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("no file uploaded")]
    MissingFile,

    #[error("unsupported file type: {0}")]
    UnsupportedFormat(String),

    #[error("could not extract text from resume")]
    EmptyResumeText,

    #[error("failed to parse resume: {0}")]
    Extraction(anyhow::Error),

    #[error("failed to fetch jobs: {0}")]
    JobFetch(String),

    #[error("embedding failed: {0}")]
    Embedding(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::MissingFile
            | ApiError::UnsupportedFormat(_)
            | ApiError::EmptyResumeText
            | ApiError::Extraction(_) => StatusCode::BAD_REQUEST,
            ApiError::JobFetch(_) | ApiError::Embedding(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = Json(json!({ "detail": self.to_string() }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_400() {
        for err in [
            ApiError::MissingFile,
            ApiError::UnsupportedFormat(".exe".into()),
            ApiError::EmptyResumeText,
            ApiError::Extraction(anyhow::anyhow!("truncated xref table")),
        ] {
            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn fetch_failure_maps_to_500_with_cause() {
        let err = ApiError::JobFetch("HTTP 503 Service Unavailable".into());
        assert!(err.to_string().contains("503"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
