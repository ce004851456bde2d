//! Clients for the outbound HTTP services.

pub mod client;
mod geo_api;
mod provider;
mod user_agent_api;

pub use client::build_http_client;
pub use geo_api::IpApiClient;
pub use provider::{GeoResolver, UserAgentResolver};
pub use user_agent_api::UserAgentApiClient;
