//! Error handler for converting AppError to HTTP responses.
//!
//! Upstream failures answer `502 Bad Gateway`; configuration and internal
//! failures answer `500`. Response bodies name the failing service but
//! never carry credentials or the provider's raw payload.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error_response(&self, None)
    }
}

/// Builds the JSON error response, tagged with the request ID when known.
pub fn error_response(error: &AppError, request_id: Option<&str>) -> Response {
    let status = error_to_status_code(error);
    let mut body = error_body(error);
    if let Some(request_id) = request_id {
        body = body.with_request_id(request_id);
    }

    (status, Json(body)).into_response()
}

/// Maps an AppError variant to its corresponding HTTP status code.
///
/// - ConfigMissing → 500
/// - UpstreamUnreachable / UpstreamRejected / MalformedResponse → 502
/// - Validation → 400
/// - Configuration / Internal → 500
pub fn error_to_status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::ConfigMissing { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::UpstreamUnreachable { .. }
        | AppError::UpstreamRejected { .. }
        | AppError::MalformedResponse { .. } => StatusCode::BAD_GATEWAY,
        AppError::Validation { .. } => StatusCode::BAD_REQUEST,
        AppError::Configuration { .. } | AppError::Internal { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn error_body(error: &AppError) -> ErrorResponse {
    match error {
        AppError::ConfigMissing { key } => {
            ErrorResponse::new("CONFIG_MISSING", "The service is not fully configured")
                .with_details(format!("missing key: {}", key))
        }
        AppError::UpstreamUnreachable { service, .. } => ErrorResponse::new(
            "UPSTREAM_UNREACHABLE",
            format!("Could not reach {}", service),
        ),
        AppError::UpstreamRejected {
            service, status, ..
        } => ErrorResponse::new(
            "UPSTREAM_REJECTED",
            format!("{} rejected the request", service),
        )
        .with_details(format!("upstream status: {}", status)),
        AppError::MalformedResponse { service, .. } => ErrorResponse::new(
            "MALFORMED_UPSTREAM_RESPONSE",
            format!("{} returned an unexpected response", service),
        ),
        AppError::Validation { field, reason } => {
            ErrorResponse::new("VALIDATION_ERROR", format!("Invalid {}", field))
                .with_details(reason.clone())
        }
        AppError::Configuration { key, .. } => ErrorResponse::new(
            "CONFIGURATION_ERROR",
            format!("Configuration error: {}", key),
        ),
        AppError::Internal { .. } => {
            ErrorResponse::new("INTERNAL_ERROR", "An internal error occurred")
        }
    }
}
