use std::io;
use std::path::PathBuf;

use thiserror::Error;

use mailmerge_merge::{LoadError, UnrecognizedIdentifiers};

/// Failure while building or dispatching a single message.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("cannot read template {}: {source}", path.display())]
    TemplateRead { path: PathBuf, source: io::Error },

    #[error("template {}: {message}", path.display())]
    TemplateParse { path: PathBuf, message: String },

    #[error("cannot render message for {recipient}: {message}")]
    Render { recipient: String, message: String },

    #[error("invalid address '{address}': {source}")]
    Address {
        address: String,
        source: lettre::address::AddressError,
    },

    #[error("cannot build message for {recipient}: {source}")]
    Build {
        recipient: String,
        source: lettre::error::Error,
    },

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("cannot write output: {0}")]
    Output(#[from] io::Error),
}

/// Failure of a whole mail-merge run. The run stops at the first error.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Selection(#[from] UnrecognizedIdentifiers),

    #[error(transparent)]
    Template(SendError),

    /// A message failed; `index` is its position in the selected rows,
    /// suitable for resuming with a start index.
    #[error("message {index} ({recipient}): {source}")]
    Send {
        index: usize,
        recipient: String,
        source: SendError,
    },

    #[error("cannot write progress: {0}")]
    Progress(#[from] io::Error),
}

/// Flatten an error and its sources into one line.
pub(crate) fn chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
