//! `/notify` endpoint.
//!
//! Accepts any method; only POST sends an SMS. The handler reduces the HTTP
//! request to an [`InboundRequest`] and hands it to the notification flow.

use std::net::{IpAddr, SocketAddr};

use axum::{
    Extension, Json, Router,
    extract::{ConnectInfo, State},
    http::{HeaderMap, Method, header},
    response::{IntoResponse, Response},
    routing::any,
};

use crate::api::dto::NotifyResponse;
use crate::api::extract::PostedMessage;
use crate::api::middleware::{RequestId, error_response};
use crate::models::InboundRequest;
use crate::state::AppState;

const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

/// Creates the notify route.
pub fn notify_routes() -> Router<AppState> {
    Router::new().route("/notify", any(notify))
}

/// Sends a visit notification for POST requests.
///
/// # Responses
/// - `200 OK` `{"status":"sent","source":"custom|composed","sid":".."}`
/// - `200 OK` `{"status":"ignored"}` for any other method
/// - `502 Bad Gateway` when a lookup or the SMS provider fails
pub async fn notify(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    Extension(request_id): Extension<RequestId>,
    method: Method,
    headers: HeaderMap,
    PostedMessage(message): PostedMessage,
) -> Response {
    let request = InboundRequest {
        method: method.as_str().to_string(),
        message,
        user_agent: headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string(),
        remote_ip: client_ip(&headers, peer, state.settings.server.trust_forwarded_for),
    };

    match state.notifier.handle(&request).await {
        Ok(outcome) => Json(NotifyResponse::from(outcome)).into_response(),
        Err(error) => {
            tracing::error!(
                error = %error,
                source = ?std::error::Error::source(&error),
                service = error.upstream_service().unwrap_or("none"),
                "Visit notification failed"
            );
            error_response(&error, Some(&request_id.0))
        }
    }
}

/// Visitor address: the peer, or the first `X-Forwarded-For` entry when trusted
fn client_ip(headers: &HeaderMap, peer: SocketAddr, trust_forwarded_for: bool) -> IpAddr {
    if trust_forwarded_for
        && let Some(ip) = headers
            .get(FORWARDED_FOR_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .and_then(|first| first.trim().parse::<IpAddr>().ok())
    {
        return ip;
    }
    peer.ip()
}
