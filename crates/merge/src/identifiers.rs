use std::collections::BTreeSet;
use std::fmt;

/// A set of recipient identifiers (e-mail addresses).
///
/// Backed by a `BTreeSet`, so iteration and rendering are always sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentifierSet {
    ids: BTreeSet<String>,
}

impl IdentifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a comma separated list, trimming each entry.
    ///
    /// Stray commas are accepted: `"a,,b"` yields `{"", "a", "b"}` and an
    /// empty input yields `{""}`.
    pub fn parse(comma_separated: &str) -> Self {
        comma_separated.split(',').map(str::trim).collect()
    }

    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.ids.insert(id.into())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Identifiers in `self` that are absent from `other`.
    pub fn difference(&self, other: &IdentifierSet) -> IdentifierSet {
        self.ids.difference(&other.ids).cloned().collect()
    }

    pub fn is_subset(&self, other: &IdentifierSet) -> bool {
        self.ids.is_subset(&other.ids)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Sorted iteration.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Sorted, `", "`-joined rendering used in diagnostics.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for IdentifierSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.ids.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(id)?;
        }
        Ok(())
    }
}

impl<S: Into<String>> FromIterator<S> for IdentifierSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for IdentifierSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.ids.extend(iter.into_iter().map(Into::into));
    }
}
