//! `mailmerge-send`: turns selected recipient rows into delivered mail.
//!
//! Renders a per-recipient template, hands each message to a [`Sender`],
//! and drives the whole run from a [`MergeOptions`] value.

pub mod error;
pub mod message;
pub mod pipeline;
pub mod sender;
pub mod template;

pub use error::{RunError, SendError};
pub use message::Email;
pub use pipeline::{deliver, prepare, run, MergeOptions, RunSummary};
pub use sender::{DryRunSender, Sender, SmtpSender, Throttle};
pub use template::MessageTemplate;
