//! Server-specific error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use ses_common::SesError;

/// Application error type for HTTP handlers
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Ses(#[from] SesError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            AppError::Ses(err) => match &err {
                SesError::UnsupportedMethod(_) | SesError::Validation(_) => {
                    (StatusCode::BAD_REQUEST, err.to_string())
                }
                SesError::DataIntegrity(_) | SesError::EmptyBackground => {
                    tracing::error!(error = %err, "Enrichment data error");
                    // The message is surfaced through the gateway, so keep
                    // the organism context in it.
                    (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
                }
                SesError::Graph(_) | SesError::Cache(_) => {
                    tracing::error!(error = %err, "Backend store error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "A backend store error occurred".to_string(),
                    )
                }
                _ => {
                    tracing::error!(error = %err, "Internal error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "An internal error occurred".to_string(),
                    )
                }
            },
        };

        let body = Json(json!({
            "message": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_method_maps_to_bad_request() {
        let response =
            AppError::Ses(SesError::UnsupportedMethod("binomial".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn data_integrity_maps_to_internal_error() {
        let response = AppError::Ses(SesError::DataIntegrity("9606".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
