//! Service layer for the notification flow.
//!
//! Services hold the decision logic and talk to the outside world only
//! through the traits in [`crate::external`] and [`notifications::SmsSender`].

pub mod notifications;

pub use notifications::{NotificationHandler, NotifyOutcome};
