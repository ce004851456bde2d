use std::net::IpAddr;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{GeoSummary, UserAgentSummary};

/// Turns a raw `User-Agent` header into platform and browser details
#[async_trait]
pub trait UserAgentResolver: Send + Sync {
    async fn resolve(&self, user_agent: &str) -> AppResult<UserAgentSummary>;

    fn name(&self) -> &'static str;
}

/// Looks up the approximate location of an IP address
///
/// `Ok(None)` means the service answered but could not locate the address;
/// callers leave the location out rather than failing.
#[async_trait]
pub trait GeoResolver: Send + Sync {
    async fn resolve(&self, ip: IpAddr) -> AppResult<Option<GeoSummary>>;

    fn name(&self) -> &'static str;
}
