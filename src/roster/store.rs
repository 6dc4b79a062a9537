//! `RosterStore`: JSON file persistence for a roster.
//!
//! The file holds a pretty-printed JSON array of strings, one per
//! participant, in roster order.

use super::Roster;
use crate::error::RosterError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// File name used when no store path is configured.
pub const DEFAULT_STORE_PATH: &str = "students.json";

/// Loads and saves a [`Roster`] at a fixed path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterStore {
    path: PathBuf,
}

impl RosterStore {
    /// Create a store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the backing file exists.
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Load the roster.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a JSON array of
    /// strings.
    pub fn load(&self) -> Result<Roster, RosterError> {
        let data = fs::read_to_string(&self.path)?;
        let roster: Roster = serde_json::from_str(&data)?;
        tracing::debug!(
            path = %self.path.display(),
            count = roster.count(),
            "loaded roster"
        );
        Ok(roster)
    }

    /// Load the roster, falling back to an empty one on any failure.
    ///
    /// A missing file is the normal first-run case and is only logged at
    /// debug level; anything else is a warning.
    pub fn load_or_default(&self) -> Roster {
        match self.load() {
            Ok(roster) => roster,
            Err(RosterError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no saved roster");
                Roster::new()
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring unreadable roster");
                Roster::new()
            }
        }
    }

    /// Save the roster.
    ///
    /// The JSON is written to a sibling temporary file first and then
    /// renamed over the target, so a crash never leaves a half-written
    /// roster behind.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or any file operation fails.
    pub fn save(&self, roster: &Roster) -> Result<(), RosterError> {
        let data = serde_json::to_string_pretty(roster)?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, data)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        tracing::debug!(
            path = %self.path.display(),
            count = roster.count(),
            "saved roster"
        );
        Ok(())
    }
}

impl Default for RosterStore {
    fn default() -> Self {
        Self::new(DEFAULT_STORE_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = RosterStore::new(dir.path().join("students.json"));
        let roster = Roster::from_names(["Ana", "Bo", "Ana"]);

        store.save(&roster).unwrap();
        assert!(store.exists());
        assert_eq!(store.load().unwrap(), roster);
    }

    #[test]
    fn test_store_writes_pretty_array() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = RosterStore::new(dir.path().join("students.json"));

        store.save(&Roster::from_names(["Ana", "Bo"])).unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        assert_eq!(text, "[\n  \"Ana\",\n  \"Bo\"\n]");
        assert!(!dir.path().join("students.json.tmp").exists());
    }

    #[test]
    fn test_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = RosterStore::new(dir.path().join("missing.json"));

        assert!(matches!(store.load(), Err(RosterError::Io(_))));
        assert!(store.load_or_default().is_empty());
    }

    #[test]
    fn test_store_corrupt_file_is_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("students.json");
        fs::write(&path, "{ not a list").unwrap();
        let store = RosterStore::new(&path);

        assert!(matches!(store.load(), Err(RosterError::Json(_))));
        assert!(store.load_or_default().is_empty());
    }

    #[test]
    fn test_store_default_path() {
        assert_eq!(RosterStore::default().path(), Path::new(DEFAULT_STORE_PATH));
    }
}
