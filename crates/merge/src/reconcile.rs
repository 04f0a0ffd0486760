//! Reconciliation of operator-supplied identifier lists against a table.

use crate::error::UnrecognizedIdentifiers;
use crate::identifiers::IdentifierSet;
use crate::table::Table;

/// Check that every requested identifier appears in `table`.
///
/// Filtering never reports unknown identifiers on its own, so run this
/// before [`Table::select`] or [`Table::exclude`] when the operator needs
/// that feedback.
pub fn validate_identifiers(
    table: &Table,
    requested: &IdentifierSet,
) -> Result<(), UnrecognizedIdentifiers> {
    let unknown = requested.difference(&table.identifiers());
    if unknown.is_empty() {
        Ok(())
    } else {
        Err(UnrecognizedIdentifiers { identifiers: unknown })
    }
}

/// Which recipients a run targets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    All,
    /// Only these identifiers.
    Only(IdentifierSet),
    /// Everyone except these identifiers.
    Except(IdentifierSet),
}

impl Selection {
    /// Build from the optional include and exclude lists. The include list
    /// wins when both are given; empty strings count as not given.
    pub fn from_lists(include: Option<&str>, exclude: Option<&str>) -> Self {
        fn given(list: Option<&str>) -> Option<&str> {
            list.filter(|s| !s.is_empty())
        }
        if let Some(include) = given(include) {
            if given(exclude).is_some() {
                log::warn!("exclude list ignored because an include list is present");
            }
            Self::Only(IdentifierSet::parse(include))
        } else if let Some(exclude) = given(exclude) {
            Self::Except(IdentifierSet::parse(exclude))
        } else {
            Self::All
        }
    }

    /// Validate the identifiers, then filter.
    pub fn apply(&self, table: &Table) -> Result<Table, UnrecognizedIdentifiers> {
        let selected = match self {
            Self::All => table.clone(),
            Self::Only(ids) => {
                validate_identifiers(table, ids)?;
                table.select(ids)
            }
            Self::Except(ids) => {
                validate_identifiers(table, ids)?;
                table.exclude(ids)
            }
        };
        log::debug!("selection kept {} of {} row(s)", selected.len(), table.len());
        Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Columns;

    fn roster() -> Table {
        Table::parse(
            "name,email,going\nAlice,a@x.com,no\nBob,b@x.com,yes\n",
            Columns::default(),
        )
        .unwrap()
    }

    #[test]
    fn known_identifiers_pass() {
        assert!(validate_identifiers(&roster(), &IdentifierSet::parse("b@x.com, a@x.com")).is_ok());
    }

    #[test]
    fn unknown_identifiers_rendered_sorted() {
        let err = validate_identifiers(&roster(), &IdentifierSet::parse("z@x.com, a@x.com, c@x.com"))
            .unwrap_err();
        assert_eq!(err.identifiers.render(), "c@x.com, z@x.com");
        assert_eq!(err.to_string(), "unrecognized emails: c@x.com, z@x.com");
    }

    #[test]
    fn empty_string_entry_is_unrecognized() {
        let err = validate_identifiers(&roster(), &IdentifierSet::parse("a@x.com,")).unwrap_err();
        assert!(err.identifiers.contains(""));
    }

    #[test]
    fn include_list_wins() {
        let s = Selection::from_lists(Some("a@x.com"), Some("b@x.com"));
        assert_eq!(s, Selection::Only(IdentifierSet::parse("a@x.com")));
    }

    #[test]
    fn empty_lists_select_all() {
        assert_eq!(Selection::from_lists(Some(""), Some("")), Selection::All);
        assert_eq!(Selection::from_lists(None, None), Selection::All);
        assert_eq!(
            Selection::from_lists(Some(""), Some("b@x.com")),
            Selection::Except(IdentifierSet::parse("b@x.com"))
        );
    }

    #[test]
    fn lists_borrowed_from_owned_strings() {
        let include = String::from("a@x.com, b@x.com");
        let exclude = String::new();
        let s = Selection::from_lists(Some(include.as_str()), Some(exclude.as_str()));
        drop(include);
        assert_eq!(s, Selection::Only(IdentifierSet::parse("b@x.com,a@x.com")));
    }

    #[test]
    fn apply_only() {
        let t = Selection::Only(IdentifierSet::parse("b@x.com")).apply(&roster()).unwrap();
        assert_eq!(t.len(), 1);
        assert_eq!(t.rows()[0].name(), "Bob");
    }

    #[test]
    fn apply_except() {
        let t = Selection::Except(IdentifierSet::parse("b@x.com")).apply(&roster()).unwrap();
        assert_eq!(t.len(), 1);
        assert_eq!(t.rows()[0].name(), "Alice");
    }

    #[test]
    fn apply_rejects_unknown_before_filtering() {
        let err = Selection::Except(IdentifierSet::parse("b@x.com, q@x.com"))
            .apply(&roster())
            .unwrap_err();
        assert_eq!(err.identifiers.render(), "q@x.com");
    }

    #[test]
    fn apply_all_is_identity() {
        let t = roster();
        assert_eq!(Selection::All.apply(&t).unwrap(), t);
    }
}
