//! Per-request values for the notification flow.

use std::fmt;
use std::net::IpAddr;

use serde::{Deserialize, Serialize};

/// An inbound web request, reduced to what the notifier needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundRequest {
    /// HTTP method as received
    pub method: String,
    /// The `message` form field, if posted
    pub message: Option<String>,
    /// Raw `User-Agent` header, empty when absent
    pub user_agent: String,
    /// Visitor address
    pub remote_ip: IpAddr,
}

impl InboundRequest {
    pub fn is_post(&self) -> bool {
        self.method.eq_ignore_ascii_case("POST")
    }
}

/// Platform and browser details of a visitor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAgentSummary {
    pub platform_type: String,
    pub browser_name: String,
    pub browser_version: String,
    pub platform_name: String,
}

impl fmt::Display for UserAgentSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}\nfor {}",
            self.platform_type, self.browser_name, self.browser_version, self.platform_name
        )
    }
}

/// Approximate visitor location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoSummary {
    pub city: String,
    pub region: String,
}

impl fmt::Display for GeoSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.city, self.region)
    }
}
