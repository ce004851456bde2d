//! SMS notification flow.
//!
//! [`NotificationHandler`] decides what to send, [`MessageComposer`] builds
//! the default text and [`SmsSender`] delivers it. `TwilioProvider` is the
//! production sender.

mod composer;
mod handler;
mod provider;
mod twilio_provider;

pub use composer::MessageComposer;
pub use handler::{MessageSource, NotificationHandler, NotifyOutcome};
pub use provider::{NotificationMessage, SmsReceipt, SmsSender};
pub use twilio_provider::TwilioProvider;

#[cfg(test)]
pub(crate) use composer::fakes as composer_fakes;
#[cfg(test)]
pub(crate) use handler::fakes as handler_fakes;
