//! The send pipeline: load, select, then render and send row by row.

use std::io::Write;
use std::path::PathBuf;

use mailmerge_merge::{Columns, Selection, Table};

use crate::error::RunError;
use crate::sender::Sender;
use crate::template::MessageTemplate;

/// Everything a run needs, decoupled from how it was parsed.
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Recipient CSV.
    pub csv: PathBuf,
    /// Message body template.
    pub template: PathBuf,
    pub subject: String,
    /// Position in the selected rows to resume from.
    pub start_index: usize,
    pub selection: Selection,
    pub columns: Columns,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Rows left after selection.
    pub total: usize,
    /// Rows before the start index.
    pub skipped: usize,
    pub sent: usize,
}

/// Load the table and template and apply the selection. Nothing is sent.
pub fn prepare(options: &MergeOptions) -> Result<(Table, MessageTemplate), RunError> {
    let table = Table::load_with(&options.csv, options.columns.clone())?;
    let template = MessageTemplate::load(&options.template).map_err(RunError::Template)?;
    let selected = options.selection.apply(&table)?;
    log::info!(
        "{} of {} recipient(s) selected from {}",
        selected.len(),
        table.len(),
        options.csv.display()
    );
    Ok((selected, template))
}

/// Full run: [`prepare`] then [`deliver`].
pub fn run<S, W>(options: &MergeOptions, sender: &mut S, progress: W) -> Result<RunSummary, RunError>
where
    S: Sender + ?Sized,
    W: Write,
{
    let (table, template) = prepare(options)?;
    deliver(&table, &template, &options.subject, options.start_index, sender, progress)
}

/// Send one message per row, in table order, starting at `start_index`.
///
/// Writes `{index} {email} {name}` to `progress` before each message and
/// stops at the first failure.
pub fn deliver<S, W>(
    table: &Table,
    template: &MessageTemplate,
    subject: &str,
    start_index: usize,
    sender: &mut S,
    mut progress: W,
) -> Result<RunSummary, RunError>
where
    S: Sender + ?Sized,
    W: Write,
{
    let mut summary = RunSummary {
        total: table.len(),
        skipped: start_index.min(table.len()),
        sent: 0,
    };
    if start_index > table.len() {
        log::warn!("start index {start_index} is past the last of {} row(s)", table.len());
    }

    for (index, row) in table.iter().enumerate().skip(start_index) {
        writeln!(progress, "{index} {} {}", row.email(), row.name())?;
        let fail = |source| RunError::Send {
            index,
            recipient: row.email().to_string(),
            source,
        };
        let email = template.compose(row, subject).map_err(fail)?;
        sender.send(&email).map_err(fail)?;
        summary.sent += 1;
    }
    progress.flush()?;

    log::info!("sent {} message(s), skipped {}", summary.sent, summary.skipped);
    Ok(summary)
}
