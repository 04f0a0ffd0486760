//! CLI Exit Code Registry
//!
//! Single source of truth for the exit codes of `mailmerge` and `nogocsv`.
//! Scripts that resume interrupted runs rely on them.
//!
//! | Code | Meaning                                              |
//! |------|------------------------------------------------------|
//! | 0    | Success                                              |
//! | 1    | General error (unspecified)                          |
//! | 2    | Usage error (bad or missing flags)                   |
//! | 3    | Recipient CSV could not be loaded                    |
//! | 4    | `--emails` / `--noemails` named unknown recipients   |
//! | 5    | Template could not be read, parsed or rendered       |
//! | 6    | A message could not be sent                          |
//! | 7    | Credentials file missing or invalid                  |
//! | 8    | Output CSV could not be written                      |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into [`run_exit_code`] or the command's error handling

use mailmerge_send::{RunError, SendError};

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// Recipient CSV unreadable, empty, malformed, or a row lacks name/email.
pub const EXIT_LOAD: u8 = 3;

/// Include/exclude list names addresses that are not in the CSV.
pub const EXIT_UNRECOGNIZED: u8 = 4;

/// Template unreadable, syntactically invalid, or failed to render a row.
pub const EXIT_TEMPLATE: u8 = 5;

/// SMTP rejected a message or the connection failed.
pub const EXIT_SEND: u8 = 6;

/// Credentials file missing, unparsable, or lacking a required field.
pub const EXIT_CONFIG: u8 = 7;

/// Output CSV could not be created or written.
pub const EXIT_WRITE: u8 = 8;

/// Map a pipeline failure to its exit code.
pub fn run_exit_code(err: &RunError) -> u8 {
    match err {
        RunError::Load(_) => EXIT_LOAD,
        RunError::Selection(_) => EXIT_UNRECOGNIZED,
        RunError::Template(_) => EXIT_TEMPLATE,
        RunError::Send { source, .. } => send_exit_code(source),
        RunError::Progress(_) => EXIT_ERROR,
    }
}

/// Map a per-message failure to its exit code.
pub fn send_exit_code(err: &SendError) -> u8 {
    match err {
        SendError::TemplateRead { .. } | SendError::TemplateParse { .. } | SendError::Render { .. } => {
            EXIT_TEMPLATE
        }
        SendError::Address { .. } | SendError::Build { .. } | SendError::Smtp(_) => EXIT_SEND,
        SendError::Output(_) => EXIT_ERROR,
    }
}
