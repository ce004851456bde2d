//! useragentapi.com client
//!
//! `GET {base}/api/v3/json/{api_key}/{user agent}` answers with
//! `{"data": {"platform_type": .., "browser_name": .., ...}}`.

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;

use super::client::decode_json;
use super::provider::UserAgentResolver;
use crate::config::UserAgentApiSettings;
use crate::error::{AppError, AppResult};
use crate::models::UserAgentSummary;

const SERVICE: &str = "useragentapi";

#[derive(Debug, Deserialize)]
struct UserAgentResponse {
    data: Option<UserAgentData>,
}

#[derive(Debug, Deserialize)]
struct UserAgentData {
    platform_type: String,
    browser_name: String,
    browser_version: String,
    platform_name: String,
}

impl From<UserAgentData> for UserAgentSummary {
    fn from(data: UserAgentData) -> Self {
        Self {
            platform_type: data.platform_type,
            browser_name: data.browser_name,
            browser_version: data.browser_version,
            platform_name: data.platform_name,
        }
    }
}

pub struct UserAgentApiClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl UserAgentApiClient {
    pub fn new(http: reqwest::Client, settings: &UserAgentApiSettings) -> AppResult<Self> {
        let base_url = Url::parse(&settings.base_url).map_err(|e| AppError::Configuration {
            key: "useragent.base_url".to_string(),
            source: e.into(),
        })?;

        Ok(Self {
            http,
            base_url,
            api_key: settings.api_key.clone(),
        })
    }

    /// Lookup URL with the API key and user agent as escaped path segments
    ///
    /// Escaping follows the URL path-segment set: `/` and spaces become
    /// `%2F` and `%20`, while `(`, `)` and `;` stay literal. The API decodes
    /// this the same as a fully form-encoded segment.
    fn lookup_url(&self, user_agent: &str) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Configuration {
                key: "useragent.base_url".to_string(),
                source: anyhow::anyhow!("base URL cannot carry a path"),
            })?
            .pop_if_empty()
            .extend(["api", "v3", "json", self.api_key.as_str(), user_agent]);
        Ok(url)
    }
}

#[async_trait]
impl UserAgentResolver for UserAgentApiClient {
    async fn resolve(&self, user_agent: &str) -> AppResult<UserAgentSummary> {
        let url = self.lookup_url(user_agent)?;

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| AppError::UpstreamUnreachable {
                service: SERVICE,
                source,
            })?;

        let body: UserAgentResponse = decode_json(SERVICE, response).await?;
        let data = body.data.ok_or_else(|| AppError::MalformedResponse {
            service: SERVICE,
            reason: "response has no data object".to_string(),
        })?;

        let summary = UserAgentSummary::from(data);
        tracing::debug!(
            platform_type = %summary.platform_type,
            browser_name = %summary.browser_name,
            "Resolved user agent"
        );
        Ok(summary)
    }

    fn name(&self) -> &'static str {
        SERVICE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HttpClientConfig;
    use crate::external::build_http_client;

    const SAFARI_UA: &str =
        "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15";

    fn client_for(server: &mockito::ServerGuard) -> UserAgentApiClient {
        let settings = UserAgentApiSettings {
            api_key: "test-key".to_string(),
            base_url: server.url(),
        };
        let http = build_http_client(&HttpClientConfig::default()).unwrap();
        UserAgentApiClient::new(http, &settings).unwrap()
    }

    #[test]
    fn test_lookup_url_escapes_user_agent() {
        let settings = UserAgentApiSettings {
            api_key: "k1".to_string(),
            base_url: "https://useragentapi.com/".to_string(),
        };
        let http = build_http_client(&HttpClientConfig::default()).unwrap();
        let client = UserAgentApiClient::new(http, &settings).unwrap();

        let url = client.lookup_url("Mozilla/5.0 (X11; Linux)").unwrap();
        assert_eq!(
            url.as_str(),
            "https://useragentapi.com/api/v3/json/k1/Mozilla%2F5.0%20(X11;%20Linux)"
        );
    }

    #[tokio::test]
    async fn test_resolve_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock(
                "GET",
                mockito::Matcher::Regex(r"^/api/v3/json/test-key/Mozilla.*".to_string()),
            )
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"data":{"ua_type":"Mobile","platform_type":"mobile","browser_name":"Safari","browser_version":"17.0","platform_name":"iOS"}}"#,
            )
            .create_async()
            .await;

        let summary = client_for(&server).resolve(SAFARI_UA).await.unwrap();
        assert_eq!(summary.platform_type, "mobile");
        assert_eq!(summary.browser_name, "Safari");
        assert_eq!(summary.browser_version, "17.0");
        assert_eq!(summary.platform_name, "iOS");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_resolve_without_data_is_malformed() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"error":{"code":"key_invalid"}}"#)
            .create_async()
            .await;

        let err = client_for(&server).resolve(SAFARI_UA).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::MalformedResponse {
                service: "useragentapi",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_resolve_missing_field_is_malformed() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"data":{"platform_type":"desktop","browser_name":"Firefox"}}"#)
            .create_async()
            .await;

        let err = client_for(&server).resolve(SAFARI_UA).await.unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse { .. }));
    }

    #[tokio::test]
    async fn test_resolve_non_success_status_is_rejected() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", mockito::Matcher::Any)
            .with_status(403)
            .with_body(r#"{"message":"invalid api key"}"#)
            .create_async()
            .await;

        match client_for(&server).resolve(SAFARI_UA).await {
            Err(AppError::UpstreamRejected {
                status, message, ..
            }) => {
                assert_eq!(status, 403);
                assert_eq!(message, "invalid api key");
            }
            other => panic!("Expected UpstreamRejected, got {:?}", other),
        }
    }
}
