//! ip-api.com client
//!
//! `GET {base}/json/{ip}` answers with `{"status": "success", "city": .., "region": ..}`
//! or `{"status": "fail", "message": ..}` for private and reserved ranges.

use std::net::IpAddr;

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;

use super::client::decode_json;
use super::provider::GeoResolver;
use crate::config::GeoApiSettings;
use crate::error::{AppError, AppResult};
use crate::models::GeoSummary;

const SERVICE: &str = "ip-api";

#[derive(Debug, Deserialize)]
struct GeoResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    region: Option<String>,
}

pub struct IpApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl IpApiClient {
    pub fn new(http: reqwest::Client, settings: &GeoApiSettings) -> AppResult<Self> {
        let base_url = Url::parse(&settings.base_url).map_err(|e| AppError::Configuration {
            key: "geo.base_url".to_string(),
            source: e.into(),
        })?;

        Ok(Self { http, base_url })
    }

    fn lookup_url(&self, ip: IpAddr) -> AppResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AppError::Configuration {
                key: "geo.base_url".to_string(),
                source: anyhow::anyhow!("base URL cannot carry a path"),
            })?
            .pop_if_empty()
            .extend(["json", ip.to_string().as_str()]);
        Ok(url)
    }
}

#[async_trait]
impl GeoResolver for IpApiClient {
    async fn resolve(&self, ip: IpAddr) -> AppResult<Option<GeoSummary>> {
        let url = self.lookup_url(ip)?;

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| AppError::UpstreamUnreachable {
                service: SERVICE,
                source,
            })?;

        let body: GeoResponse = decode_json(SERVICE, response).await?;
        if body.status != "success" {
            tracing::warn!(
                %ip,
                status = %body.status,
                reason = body.message.as_deref().unwrap_or(""),
                "Geolocation lookup degraded, sending without location"
            );
            return Ok(None);
        }

        Ok(Some(GeoSummary {
            city: body.city.unwrap_or_default(),
            region: body.region.unwrap_or_default(),
        }))
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

    fn client_for(base_url: String) -> IpApiClient {
        let http = build_http_client(&HttpClientConfig::default()).unwrap();
        IpApiClient::new(http, &GeoApiSettings { base_url }).unwrap()
    }

    #[test]
    fn test_lookup_url_for_ipv6() {
        let client = client_for("http://ip-api.com".to_string());
        let url = client.lookup_url("2001:db8::1".parse().unwrap()).unwrap();
        assert_eq!(url.as_str(), "http://ip-api.com/json/2001:db8::1");
    }

    #[tokio::test]
    async fn test_resolve_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/json/203.0.113.7")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"status":"success","country":"United States","region":"TX","regionName":"Texas","city":"Austin","query":"203.0.113.7"}"#,
            )
            .create_async()
            .await;

        let geo = client_for(server.url())
            .resolve("203.0.113.7".parse().unwrap())
            .await
            .unwrap();
        assert_eq!(
            geo,
            Some(GeoSummary {
                city: "Austin".to_string(),
                region: "TX".to_string(),
            })
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_resolve_fail_status_is_degraded() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/json/10.0.0.1")
            .with_status(200)
            .with_body(r#"{"status":"fail","message":"private range","query":"10.0.0.1"}"#)
            .create_async()
            .await;

        let geo = client_for(server.url())
            .resolve("10.0.0.1".parse().unwrap())
            .await
            .unwrap();
        assert!(geo.is_none());
    }

    #[tokio::test]
    async fn test_resolve_without_status_is_malformed() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/json/10.0.0.1")
            .with_status(200)
            .with_body(r#"{"city":"Nowhere"}"#)
            .create_async()
            .await;

        let err = client_for(server.url())
            .resolve("10.0.0.1".parse().unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::MalformedResponse { service: "ip-api", .. }));
    }
}
