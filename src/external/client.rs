use std::time::Duration;

use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config::HttpClientConfig;
use crate::error::{AppError, AppResult};

/// Longest provider error text carried into an `UpstreamRejected` error
const MAX_REJECTION_MESSAGE: usize = 200;

/// Builds the HTTP client shared by every outbound integration
///
/// The client is created once at startup and cloned into each API client;
/// clones share the same connection pool.
///
/// # Features
/// - **Timeouts**: request and connect timeouts from `[http_client]`
/// - **Compression**: gzip, deflate, brotli and zstd
/// - **HTTP/2**: adaptive window sizing and keep-alive
/// - **Security**: Rustls for TLS (no OpenSSL dependency)
pub fn build_http_client(config: &HttpClientConfig) -> AppResult<reqwest::Client> {
    reqwest::Client::builder()
        // Timeouts
        .timeout(Duration::from_secs(config.timeout_seconds))
        .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
        // Connection pooling
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        // HTTP/2 settings
        .http2_adaptive_window(true)
        .http2_keep_alive_interval(Duration::from_secs(10))
        .http2_keep_alive_timeout(Duration::from_secs(20))
        .gzip(true)
        .deflate(true)
        .brotli(true)
        .zstd(true)
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(|e| AppError::Configuration {
            key: "http_client".to_string(),
            source: e.into(),
        })
}

/// Decodes a JSON response body, mapping failures onto the upstream error variants
///
/// Non-2xx responses become `UpstreamRejected`; bodies that do not match `T`
/// become `MalformedResponse`.
pub(crate) async fn decode_json<T: DeserializeOwned>(
    service: &'static str,
    response: Response,
) -> AppResult<T> {
    let status = response.status();
    let body = response
        .bytes()
        .await
        .map_err(|source| AppError::UpstreamUnreachable { service, source })?;

    if !status.is_success() {
        return Err(rejected(service, status, &body));
    }

    serde_json::from_slice(&body).map_err(|e| AppError::MalformedResponse {
        service,
        reason: e.to_string(),
    })
}

/// Error bodies from all three services put their description in `message`
#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

fn rejected(service: &'static str, status: StatusCode, body: &[u8]) -> AppError {
    let message = match serde_json::from_slice::<ErrorBody>(body) {
        Ok(parsed) => parsed.message,
        Err(_) => String::from_utf8_lossy(body).trim().to_string(),
    };
    let message = if message.is_empty() {
        status.canonical_reason().unwrap_or("unknown error").to_string()
    } else {
        message.chars().take(MAX_REJECTION_MESSAGE).collect()
    };

    AppError::UpstreamRejected {
        service,
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_builds_from_defaults() {
        assert!(build_http_client(&HttpClientConfig::default()).is_ok());
    }

    #[test]
    fn test_rejection_prefers_json_message() {
        let body = br#"{"code":21211,"message":"The 'To' number is not valid.","status":400}"#;
        match rejected("twilio", StatusCode::BAD_REQUEST, body) {
            AppError::UpstreamRejected {
                service,
                status,
                message,
            } => {
                assert_eq!(service, "twilio");
                assert_eq!(status, 400);
                assert_eq!(message, "The 'To' number is not valid.");
            }
            other => panic!("Expected UpstreamRejected, got {:?}", other),
        }
    }

    #[test]
    fn test_rejection_falls_back_to_text_or_reason() {
        let err = rejected("ip-api", StatusCode::TOO_MANY_REQUESTS, b"slow down");
        assert!(err.to_string().ends_with("slow down"));

        let err = rejected("ip-api", StatusCode::BAD_GATEWAY, b"");
        assert!(err.to_string().ends_with("Bad Gateway"));

        let long = "x".repeat(1000);
        match rejected("useragentapi", StatusCode::INTERNAL_SERVER_ERROR, long.as_bytes()) {
            AppError::UpstreamRejected { message, .. } => {
                assert_eq!(message.len(), MAX_REJECTION_MESSAGE)
            }
            other => panic!("Expected UpstreamRejected, got {:?}", other),
        }
    }
}
