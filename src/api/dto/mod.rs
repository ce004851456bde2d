//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by endpoint:
//! - `notify` - Notify form and response
//! - `health` - Health and readiness responses
//! - `error` - Common error response

mod error;
mod health;
mod notify;

pub use error::ErrorResponse;
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use notify::{NotifyForm, NotifyResponse};
