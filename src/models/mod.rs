mod visit;

pub use visit::{GeoSummary, InboundRequest, UserAgentSummary};
