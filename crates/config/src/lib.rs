// Configuration loading

pub mod credentials;

pub use credentials::Credentials;

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },

    #[error("cannot parse {}: {source}", display_path(path))]
    Parse { path: PathBuf, source: serde_yaml::Error },

    #[error("credentials: missing required field '{0}'")]
    MissingField(&'static str),
}

impl ConfigError {
    pub(crate) fn at_path(self, path: &Path) -> Self {
        match self {
            Self::Parse { source, .. } => Self::Parse { path: path.to_path_buf(), source },
            other => other,
        }
    }
}

fn display_path(path: &Path) -> String {
    if path.as_os_str().is_empty() {
        "credentials".to_string()
    } else {
        path.display().to_string()
    }
}
