use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::identifiers::IdentifierSet;

/// Failure to load a recipient table. Loading is all-or-nothing.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened or read.
    #[error("cannot read {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    /// The input stream failed before a path was known.
    #[error("cannot read input: {0}")]
    Read(io::Error),
    /// No header row at all.
    #[error("input is empty: a header row is required")]
    Empty,
    /// A data row lacks a value for the name or identifier column.
    #[error("line {line}: {name} and {identifier} columns must be present")]
    MissingRequired { line: u64, name: String, identifier: String },
    /// The CSV reader rejected the input (bad UTF-8, broken quoting, ...).
    #[error("line {line}: {message}")]
    Malformed { line: u64, message: String },
}

impl LoadError {
    /// 1-based input line the error refers to, when there is one.
    pub fn line(&self) -> Option<u64> {
        match self {
            Self::MissingRequired { line, .. } | Self::Malformed { line, .. } => Some(*line),
            Self::Io { .. } | Self::Read(_) | Self::Empty => None,
        }
    }

    pub(crate) fn from_csv(err: csv::Error) -> Self {
        let line = err.position().map_or(0, |pos| pos.line());
        let message = err.to_string();
        match err.into_kind() {
            csv::ErrorKind::Io(source) => Self::Read(source),
            _ => Self::Malformed { line, message },
        }
    }

    /// Attach the source path to an IO failure raised while reading.
    pub(crate) fn at_path(self, path: &std::path::Path) -> Self {
        match self {
            Self::Read(source) => Self::Io { path: path.to_path_buf(), source },
            other => other,
        }
    }
}

/// Requested identifiers that do not appear in the table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized emails: {identifiers}")]
pub struct UnrecognizedIdentifiers {
    pub identifiers: IdentifierSet,
}

/// Failure to persist a table.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("cannot create {}: {source}", path.display())]
    Create { path: PathBuf, source: io::Error },
    #[error("cannot write {}: {source}", path.display())]
    Csv { path: PathBuf, source: csv::Error },
}
