//! Row filters. All of them keep the header and the relative row order.

use crate::identifiers::IdentifierSet;
use crate::table::Table;

impl Table {
    /// Rows whose identifier is in `ids`.
    pub fn select(&self, ids: &IdentifierSet) -> Table {
        self.filter(|row| ids.contains(row.email()))
    }

    /// Rows whose identifier is not in `ids`.
    pub fn exclude(&self, ids: &IdentifierSet) -> Table {
        self.filter(|row| !ids.contains(row.email()))
    }

    /// Rows still attending. Without an attendance column every row
    /// qualifies, and no column is added.
    pub fn select_attending(&self) -> Table {
        self.filter(|row| row.is_attending())
    }

    /// Distinct identifiers across all rows.
    pub fn identifiers(&self) -> IdentifierSet {
        self.iter().map(|row| row.email()).collect()
    }
}
