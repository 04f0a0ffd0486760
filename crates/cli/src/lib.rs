// Shared plumbing for the `mailmerge` and `nogocsv` binaries.

pub mod exit_codes;

use std::process::ExitCode;

use clap::Args;

use mailmerge_config::ConfigError;
use mailmerge_merge::{Columns, LoadError, WriteError};
use mailmerge_send::{RunError, SendError};

use exit_codes::{run_exit_code, send_exit_code, EXIT_CONFIG, EXIT_LOAD, EXIT_SUCCESS, EXIT_USAGE, EXIT_WRITE};

/// Reserved column names, shared by both binaries.
#[derive(Debug, Clone, Args)]
pub struct ColumnArgs {
    /// Column holding each recipient's address
    #[arg(long, value_name = "COLUMN", default_value = "email")]
    pub email_column: String,

    /// Column holding each recipient's name
    #[arg(long, value_name = "COLUMN", default_value = "name")]
    pub name_column: String,

    /// Column holding the attendance flag (values starting with n/N mean declined)
    #[arg(long, value_name = "COLUMN", default_value = "going")]
    pub going_column: String,
}

impl From<ColumnArgs> for Columns {
    fn from(args: ColumnArgs) -> Self {
        Columns {
            identifier: args.email_column,
            name: args.name_column,
            attendance: args.going_column,
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn load(err: LoadError) -> Self {
        Self { code: EXIT_LOAD, message: err.to_string(), hint: None }
    }

    pub fn write(err: WriteError) -> Self {
        Self { code: EXIT_WRITE, message: err.to_string(), hint: None }
    }

    pub fn config(err: ConfigError) -> Self {
        let hint = match &err {
            ConfigError::Read { .. } => Some(
                "create ~/.mailmerge.yaml with emailId and password, or pass --config".to_string(),
            ),
            _ => None,
        };
        Self { code: EXIT_CONFIG, message: err.to_string(), hint }
    }

    pub fn send(err: SendError) -> Self {
        Self { code: send_exit_code(&err), message: err.to_string(), hint: None }
    }

    /// Create error from a pipeline failure, with a resume hint when a
    /// message failed part-way through the run.
    pub fn run(err: RunError) -> Self {
        let code = run_exit_code(&err);
        let hint = match &err {
            RunError::Send { index, .. } => Some(format!("resume with --index {index}")),
            RunError::Selection(_) => {
                Some("check --emails / --noemails against the email column".to_string())
            }
            _ => None,
        };
        Self { code, message: err.to_string(), hint }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Print the error (if any) to stderr and turn it into the process exit code.
pub fn finish(result: Result<(), CliError>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

/// Install the stderr logger. `RUST_LOG` overrides the verbosity flag.
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

pub fn long_version() -> &'static str {
    concat!(
        env!("CARGO_PKG_VERSION"),
        " (", env!("MAILMERGE_COMMIT"), ")",
        "\nbuild:   ", env!("MAILMERGE_PROFILE"),
        "\ntarget:  ", env!("MAILMERGE_TARGET"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit_codes::EXIT_UNRECOGNIZED;
    use mailmerge_merge::{IdentifierSet, UnrecognizedIdentifiers};

    #[test]
    fn send_failure_suggests_resume_index() {
        let err = CliError::run(RunError::Send {
            index: 7,
            recipient: "g@x.com".into(),
            source: SendError::Output(std::io::Error::other("broken pipe")),
        });
        assert_eq!(err.hint.as_deref(), Some("resume with --index 7"));
        assert!(err.message.starts_with("message 7 (g@x.com)"));
    }

    #[test]
    fn unrecognized_message_lists_addresses() {
        let err = CliError::run(RunError::Selection(UnrecognizedIdentifiers {
            identifiers: IdentifierSet::parse("z@x.com, c@x.com"),
        }));
        assert_eq!(err.code, EXIT_UNRECOGNIZED);
        assert_eq!(err.message, "unrecognized emails: c@x.com, z@x.com");
    }

    #[test]
    fn missing_credentials_hint() {
        let err = CliError::config(ConfigError::Read {
            path: "/nope/.mailmerge.yaml".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        });
        assert_eq!(err.code, EXIT_CONFIG);
        assert!(err.hint.is_some());
    }
}
