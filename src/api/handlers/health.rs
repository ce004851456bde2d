//! Health check endpoint handlers.
//!
//! Liveness answers as long as the process serves requests. Readiness
//! reports whether each outbound integration has the settings it needs;
//! neither endpoint calls the integrations.

use std::collections::HashMap;

use axum::{Router, extract::State, http::StatusCode, response::Json, routing::get};

use crate::api::dto::{ComponentHealth, HealthResponse, HealthStatus};
use crate::config::Settings;
use crate::state::AppState;

/// Creates health check routes.
///
/// # Routes
/// - `GET /health` - Liveness and version
/// - `GET /health/ready` - Readiness probe with per-integration checks
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness_check))
}

/// Basic health check endpoint.
///
/// # Example Response
/// ```json
/// { "status": "healthy", "version": "0.1.0", "timestamp": "2026-01-01T12:00:00Z" }
/// ```
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HealthStatus::Healthy,
        version: state.settings.application.version.clone(),
        timestamp: jiff::Timestamp::now().to_string(),
        checks: HashMap::new(),
    })
}

/// Readiness probe endpoint.
///
/// # Responses
/// - `200 OK` - Every integration needed by the message mode is configured
/// - `503 Service Unavailable` - At least one is not
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let checks = integration_checks(&state.settings);
    let ready = checks
        .values()
        .all(|check| check.status == HealthStatus::Healthy);

    let response = HealthResponse {
        status: if ready {
            HealthStatus::Healthy
        } else {
            HealthStatus::Unhealthy
        },
        version: state.settings.application.version.clone(),
        timestamp: jiff::Timestamp::now().to_string(),
        checks,
    };

    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (status, Json(response))
}

fn integration_checks(settings: &Settings) -> HashMap<String, ComponentHealth> {
    let mut checks = HashMap::new();

    let twilio = &settings.twilio;
    let twilio_ready = [
        &twilio.sid,
        &twilio.auth_token,
        &twilio.to_number,
        &twilio.from_number,
    ]
    .iter()
    .all(|value| !value.trim().is_empty());
    checks.insert(
        "twilio".to_string(),
        if twilio_ready {
            ComponentHealth::healthy("Configured")
        } else {
            ComponentHealth::unhealthy("Credentials or phone numbers missing")
        },
    );

    let lookups = settings.notifier.mode.needs_lookups();
    let useragent = if !lookups {
        ComponentHealth::healthy("Not used in fixed mode")
    } else if settings.useragent.api_key.trim().is_empty() {
        ComponentHealth::unhealthy("API key missing")
    } else {
        ComponentHealth::healthy("Configured")
    };
    checks.insert("useragent".to_string(), useragent);

    let geo = if lookups {
        ComponentHealth::healthy("Configured")
    } else {
        ComponentHealth::healthy("Not used in fixed mode")
    };
    checks.insert("geo".to_string(), geo);

    checks
}
