use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tera::{Context, Tera};

use mailmerge_merge::Record;

use crate::error::{chain, SendError};
use crate::message::Email;

const TEMPLATE_NAME: &str = "message";

/// A message body template rendered once per recipient.
///
/// Every column of the row is a top-level variable (`{{ name }}`), and the
/// whole row is also available as `row` for column names that are not valid
/// identifiers (`{{ row["first name"] }}`). Output is never HTML-escaped.
pub struct MessageTemplate {
    tera: Tera,
    origin: PathBuf,
}

impl MessageTemplate {
    pub fn load(path: &Path) -> Result<Self, SendError> {
        let source = fs::read_to_string(path).map_err(|source| SendError::TemplateRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_named(&source, path)
    }

    pub fn parse(source: &str) -> Result<Self, SendError> {
        Self::parse_named(source, Path::new("<inline>"))
    }

    fn parse_named(source: &str, origin: &Path) -> Result<Self, SendError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.add_raw_template(TEMPLATE_NAME, source)
            .map_err(|e| SendError::TemplateParse {
                path: origin.to_path_buf(),
                message: chain(&e),
            })?;
        Ok(Self {
            tera,
            origin: origin.to_path_buf(),
        })
    }

    pub fn origin(&self) -> &Path {
        &self.origin
    }

    pub fn render(&self, record: &Record) -> Result<String, SendError> {
        let mut context = Context::new();
        let row: BTreeMap<&str, &str> = record.fields().collect();
        for (column, value) in &row {
            context.insert(*column, value);
        }
        context.insert("row", &row);

        self.tera
            .render(TEMPLATE_NAME, &context)
            .map_err(|e| SendError::Render {
                recipient: record.email().to_string(),
                message: chain(&e),
            })
    }

    /// Render the body and address it to the record's recipient.
    pub fn compose(&self, record: &Record, subject: &str) -> Result<Email, SendError> {
        let body = self.render(record)?;
        Ok(Email::new(record.email(), subject, body))
    }
}
