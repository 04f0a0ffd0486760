//! Follow-up table derivation for the RSVP workflow.
//!
//! A roster goes through [`Table::with_declined_flag`] once, so every
//! recipient starts out declined. Respondents are then flipped to an
//! attending value by hand, and later runs pick them up through
//! [`Table::select_attending`].

use crate::record::DECLINED;
use crate::table::Table;

impl Table {
    /// Copy of the table with every attendance value set to [`DECLINED`].
    /// The attendance column is appended to the header if it is missing.
    pub fn with_declined_flag(&self) -> Table {
        let attendance = self.columns().attendance.clone();

        let mut headers = self.headers().to_vec();
        if !self.has_column(&attendance) {
            headers.push(attendance.clone());
        }

        let rows = self
            .iter()
            .map(|row| row.with_value(&attendance, DECLINED))
            .collect();

        self.with_parts(headers, rows)
    }
}

#[cfg(test)]
mod tests {
    use crate::record::{Columns, DECLINED};
    use crate::Table;

    #[test]
    fn appends_missing_column_once() {
        let t = Table::parse("name,email\nAlice,a@x.com\nBob,b@x.com\n", Columns::default()).unwrap();
        let declined = t.with_declined_flag();
        assert_eq!(declined.headers(), ["name", "email", "going"]);
        assert_eq!(declined.headers().len(), t.headers().len() + 1);
        for row in &declined {
            assert_eq!(row.attendance(), Some(DECLINED));
        }
        // input untouched
        assert_eq!(t.headers().len(), 2);
    }

    #[test]
    fn overwrites_existing_values() {
        let t = Table::parse(
            "going,name,email\nyes,Alice,a@x.com\n,Bob,b@x.com\n",
            Columns::default(),
        )
        .unwrap();
        let declined = t.with_declined_flag();
        assert_eq!(declined.headers(), ["going", "name", "email"]);
        assert!(declined.iter().all(|r| r.attendance() == Some("n")));
    }

    #[test]
    fn idempotent() {
        let t = Table::parse("name,email\nAlice,a@x.com\n", Columns::default()).unwrap();
        let once = t.with_declined_flag();
        assert_eq!(once.with_declined_flag(), once);
    }

    #[test]
    fn nobody_attends_after_decline() {
        let t = Table::parse("name,email,going\nAlice,a@x.com,yes\n", Columns::default()).unwrap();
        assert!(t.with_declined_flag().select_attending().is_empty());
    }

    #[test]
    fn short_rows_gain_column() {
        let t = Table::parse("name,email,going\nAlice,a@x.com\n", Columns::default()).unwrap();
        let declined = t.with_declined_flag();
        let mut out = Vec::new();
        declined.write_to(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "name,email,going\nAlice,a@x.com,n\n");
    }
}
