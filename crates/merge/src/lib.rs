//! `mailmerge-merge`: recipient table model and selection engine.
//!
//! Pure engine crate: loads a recipient CSV into an immutable [`Table`],
//! narrows it with include/exclude lists or the attendance flag, and derives
//! follow-up tables. No templating or mail transport lives here.

pub mod error;
pub mod followup;
pub mod identifiers;
pub mod reconcile;
pub mod record;
pub mod select;
pub mod table;

pub use error::{LoadError, UnrecognizedIdentifiers, WriteError};
pub use identifiers::IdentifierSet;
pub use reconcile::{validate_identifiers, Selection};
pub use record::{Columns, Record, DECLINED};
pub use table::Table;
