use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::{LoadError, WriteError};
use crate::record::{Columns, Record};

/// An ordered header plus ordered recipient rows.
///
/// Tables are values: every transform returns a new table and keeps the
/// relative order of the rows it retains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    columns: Arc<Columns>,
    headers: Vec<String>,
    rows: Vec<Record>,
}

impl Table {
    /// Assemble a table from already-mapped rows. No validation is done;
    /// use [`Table::load`] or [`Table::parse`] for checked input.
    pub fn new(columns: Columns, headers: Vec<String>, rows: Vec<IndexMap<String, String>>) -> Self {
        let columns = Arc::new(columns);
        let rows = rows
            .into_iter()
            .map(|fields| Record::new(Arc::clone(&columns), fields))
            .collect();
        Self { columns, headers, rows }
    }

    /// Load a recipient CSV using the default reserved columns.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        Self::load_with(path, Columns::default())
    }

    pub fn load_with(path: impl AsRef<Path>, columns: Columns) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_reader(file, columns).map_err(|e| e.at_path(path))?;
        log::debug!(
            "loaded {} row(s), {} column(s) from {}",
            table.len(),
            table.headers.len(),
            path.display()
        );
        Ok(table)
    }

    /// Parse CSV text held in memory.
    pub fn parse(csv_data: &str, columns: Columns) -> Result<Self, LoadError> {
        Self::from_reader(csv_data.as_bytes(), columns)
    }

    /// Read a header row and data rows. Short rows are padded with empty
    /// values; extra fields are dropped. Every data row must carry a name
    /// and an identifier.
    pub fn from_reader<R: io::Read>(reader: R, columns: Columns) -> Result<Self, LoadError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);
        let mut records = reader.records();

        let headers: Vec<String> = match records.next() {
            None => return Err(LoadError::Empty),
            Some(header) => header
                .map_err(LoadError::from_csv)?
                .iter()
                .map(str::to_string)
                .collect(),
        };

        let columns = Arc::new(columns);
        let mut rows = Vec::new();
        for result in records {
            let record = result.map_err(LoadError::from_csv)?;
            let line = record.position().map_or(0, |pos| pos.line());
            let fields = headers
                .iter()
                .enumerate()
                .map(|(i, header)| (header.clone(), record.get(i).unwrap_or("").to_string()))
                .collect();
            let row = Record::new(Arc::clone(&columns), fields);
            if row.name().is_empty() || row.email().is_empty() {
                return Err(LoadError::MissingRequired {
                    line,
                    name: columns.name.clone(),
                    identifier: columns.identifier.clone(),
                });
            }
            rows.push(row);
        }

        Ok(Self { columns, headers, rows })
    }

    /// Write the table as CSV: header first, then each row in header order.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), WriteError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| WriteError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        self.write_to(file).map_err(|source| WriteError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("wrote {} row(s) to {}", self.len(), path.display());
        Ok(())
    }

    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut writer = csv::WriterBuilder::new().from_writer(writer);
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(self.headers.iter().map(|h| row.value(h)))?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn columns(&self) -> &Columns {
        &self.columns
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.rows.iter()
    }

    /// Stable subsequence of rows matching `keep`; header unchanged.
    pub(crate) fn filter<F>(&self, keep: F) -> Self
    where
        F: Fn(&Record) -> bool,
    {
        Self {
            columns: Arc::clone(&self.columns),
            headers: self.headers.clone(),
            rows: self.rows.iter().filter(|row| keep(row)).cloned().collect(),
        }
    }

    pub(crate) fn with_parts(&self, headers: Vec<String>, rows: Vec<Record>) -> Self {
        Self {
            columns: Arc::clone(&self.columns),
            headers,
            rows,
        }
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
