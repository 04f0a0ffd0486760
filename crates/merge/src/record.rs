use std::sync::Arc;

use indexmap::IndexMap;

/// Canonical attendance value written by [`crate::Table::with_declined_flag`].
pub const DECLINED: &str = "n";

/// Names of the reserved columns a recipient table relies on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Columns {
    /// Column holding the recipient address.
    pub identifier: String,
    /// Column holding the recipient display name.
    pub name: String,
    /// Column holding the attendance flag.
    pub attendance: String,
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            identifier: "email".into(),
            name: "name".into(),
            attendance: "going".into(),
        }
    }
}

/// A single recipient row. Field order follows the table header.
///
/// Records are immutable; [`Record::with_value`] returns a modified copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    columns: Arc<Columns>,
    fields: IndexMap<String, String>,
}

impl Record {
    pub fn new(columns: Arc<Columns>, fields: IndexMap<String, String>) -> Self {
        Self { columns, fields }
    }

    /// The recipient address, or `""` when the column is absent.
    pub fn email(&self) -> &str {
        self.value(&self.columns.identifier)
    }

    pub fn name(&self) -> &str {
        self.value(&self.columns.name)
    }

    /// Raw attendance value, if the row carries the column.
    pub fn attendance(&self) -> Option<&str> {
        self.get(&self.columns.attendance)
    }

    /// False only when the attendance value starts with `n` or `N`.
    pub fn is_attending(&self) -> bool {
        !self
            .attendance()
            .is_some_and(|flag| flag.to_lowercase().starts_with('n'))
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// Cell value with absent columns read as empty.
    pub fn value(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }

    /// `(column, value)` pairs in header order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Copy of this record with `column` set to `value`. A new column is
    /// appended after the existing ones.
    pub fn with_value(&self, column: &str, value: &str) -> Self {
        let mut fields = self.fields.clone();
        fields.insert(column.to_string(), value.to_string());
        Self {
            columns: Arc::clone(&self.columns),
            fields,
        }
    }

    pub fn columns(&self) -> &Columns {
        &self.columns
    }
}
