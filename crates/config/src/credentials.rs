// SMTP credentials
// Loaded from ~/.mailmerge.yaml

use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::ConfigError;

/// Default relay used when the file does not name one.
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";

/// Environment variable overriding the credentials file location.
pub const CONFIG_ENV: &str = "MAILMERGE_CONFIG";

/// Sender account for outgoing mail.
///
/// ```yaml
/// emailId: me@example.com
/// password: app-specific-password
/// smtpHost: smtp.gmail.com   # optional
/// ```
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    /// Account address; also used as the `From` address.
    #[serde(default)]
    pub email_id: String,

    #[serde(default)]
    pub password: String,

    #[serde(default)]
    pub smtp_host: Option<String>,
}

// Never print the password.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email_id", &self.email_id)
            .field("password", &"<redacted>")
            .field("smtp_host", &self.smtp_host)
            .finish()
    }
}

impl Credentials {
    /// `~/.mailmerge.yaml`
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".mailmerge.yaml")
    }

    /// Explicit path, else `$MAILMERGE_CONFIG`, else the default path.
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(path) = explicit {
            return path.to_path_buf();
        }
        match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => PathBuf::from(path),
            _ => Self::default_path(),
        }
    }

    /// Read and validate a credentials file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let credentials = Self::from_yaml(&contents).map_err(|e| e.at_path(path))?;
        log::debug!("loaded credentials for {} from {}", credentials.email_id, path.display());
        Ok(credentials)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let credentials: Credentials =
            serde_yaml::from_str(contents).map_err(|source| ConfigError::Parse {
                path: PathBuf::new(),
                source,
            })?;
        credentials.validate()?;
        Ok(credentials)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.email_id.trim().is_empty() {
            return Err(ConfigError::MissingField("emailId"));
        }
        if self.password.is_empty() {
            return Err(ConfigError::MissingField("password"));
        }
        Ok(())
    }

    /// Configured relay, or [`DEFAULT_SMTP_HOST`].
    pub fn effective_smtp_host(&self) -> &str {
        self.smtp_host
            .as_deref()
            .filter(|h| !h.is_empty())
            .unwrap_or(DEFAULT_SMTP_HOST)
    }
}
