//! Roster: The ordered list of names eligible for selection.
//!
//! Names are stored in insertion order. Duplicates are allowed, blank
//! entries are not.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// An ordered, mutable list of participant names.
///
/// The roster owns no behavior beyond storage. Persistence lives in
/// [`RosterStore`](super::RosterStore) and is always an explicit call.
///
/// # Blank Entries
///
/// [`Roster::add`] trims surrounding whitespace and silently drops entries
/// that are empty afterwards, so the roster never contains an empty name.
///
/// Serializes as a bare JSON array of strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Roster {
    /// Names in insertion order.
    names: Vec<String>,
}

impl Roster {
    /// Create an empty roster.
    pub const fn new() -> Self {
        Self { names: Vec::new() }
    }

    /// Create a roster from a list of names, applying the same filtering as
    /// [`Roster::add`].
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut roster = Self::new();
        roster.add(names);
        roster
    }

    /// Append names to the end of the roster, preserving their order.
    ///
    /// No deduplication is performed. Blank names are dropped.
    pub fn add<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name: String = name.into();
            let trimmed = name.trim();
            if trimmed.is_empty() {
                continue;
            }
            if trimmed.len() == name.len() {
                self.names.push(name);
            } else {
                self.names.push(trimmed.to_string());
            }
        }
    }

    /// Remove every name. Does not touch persisted storage.
    pub fn clear(&mut self) {
        self.names.clear();
    }

    /// Check if the roster has no names.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Get the number of names.
    #[inline]
    pub fn count(&self) -> usize {
        self.names.len()
    }

    /// Alias for [`Roster::count`].
    #[inline]
    pub fn len(&self) -> usize {
        self.count()
    }

    /// Get the names as a slice.
    #[inline]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Get the name at `index`, if any.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Iterate over the names in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Take an immutable value copy of the current names.
    ///
    /// The picker samples from this copy for a whole run, so later edits to
    /// the roster never affect a run in flight.
    pub fn snapshot(&self) -> Arc<[String]> {
        Arc::from(self.names.as_slice())
    }
}

impl From<Vec<String>> for Roster {
    fn from(names: Vec<String>) -> Self {
        Self::from_names(names)
    }
}

impl From<Roster> for Vec<String> {
    fn from(roster: Roster) -> Self {
        roster.names
    }
}

impl<S: Into<String>> FromIterator<S> for Roster {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::from_names(iter)
    }
}

impl<S: Into<String>> Extend<S> for Roster {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.add(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_new_is_empty() {
        let roster = Roster::new();
        assert!(roster.is_empty());
        assert_eq!(roster.count(), 0);
    }

    #[test]
    fn test_roster_add_preserves_order_and_duplicates() {
        let mut roster = Roster::new();
        roster.add(["Ana", "Bo"]);
        roster.add(vec!["Cy".to_string(), "Ana".to_string()]);

        assert_eq!(roster.names(), ["Ana", "Bo", "Cy", "Ana"]);
        assert_eq!(roster.count(), 4);
        assert_eq!(roster.get(2), Some("Cy"));
        assert_eq!(roster.get(4), None);
    }

    #[test]
    fn test_roster_add_empty_is_noop() {
        let mut roster = Roster::from_names(["Ana"]);
        roster.add(Vec::<String>::new());
        assert_eq!(roster.names(), ["Ana"]);
    }

    #[test]
    fn test_roster_drops_blank_names() {
        let roster = Roster::from_names(["", "  ", " Bo ", "\t", "Cy"]);
        assert_eq!(roster.names(), ["Bo", "Cy"]);
    }

    #[test]
    fn test_roster_clear() {
        let mut roster = Roster::from_names(["Ana", "Bo"]);
        roster.clear();
        assert!(roster.is_empty());

        roster.clear();
        assert!(roster.is_empty());
    }

    #[test]
    fn test_roster_snapshot_is_detached() {
        let mut roster = Roster::from_names(["Ana", "Bo"]);
        let snapshot = roster.snapshot();

        roster.clear();
        roster.add(["Zed"]);

        assert_eq!(&*snapshot, ["Ana".to_string(), "Bo".to_string()]);
    }

    #[test]
    fn test_roster_serializes_as_array() {
        let roster = Roster::from_names(["Ana", "Bo"]);
        let json = serde_json::to_string(&roster).unwrap();
        assert_eq!(json, r#"["Ana","Bo"]"#);

        let back: Roster = serde_json::from_str(r#"["Cy", "", "Di"]"#).unwrap();
        assert_eq!(back.names(), ["Cy", "Di"]);
    }

    #[test]
    fn test_roster_collect() {
        let roster: Roster = ["Ana", "", "Bo"].into_iter().collect();
        assert_eq!(roster.iter().collect::<Vec<_>>(), vec!["Ana", "Bo"]);
    }
}
