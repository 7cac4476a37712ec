use std::path::{Path, PathBuf};

use super::{read_json, write_json, StorageError};
use crate::domain::{HistoryLog, IdeaRecord};

/// The append-only log of every generated idea, stored as one JSON array.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    /// A store backed by the file at `path`, which need not exist yet.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the log. A store that does not exist yet is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or decoded.
    pub fn load(&self) -> Result<HistoryLog, StorageError> {
        match read_json(&self.path) {
            Ok(log) => Ok(log),
            Err(StorageError::NotFound(_)) => {
                tracing::debug!("no history at {}, starting empty", self.path.display());
                Ok(HistoryLog::new())
            }
            Err(e) => Err(e),
        }
    }

    /// Atomically replaces the stored log with `log`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, log: &HistoryLog) -> Result<(), StorageError> {
        write_json(&self.path, log)
    }

    /// Re-reads the stored log, appends `ideas` and saves the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be loaded or saved.
    pub fn append(&self, ideas: &[IdeaRecord]) -> Result<HistoryLog, StorageError> {
        let mut log = self.load()?;
        log.extend(ideas.iter().cloned());
        self.save(&log)?;
        tracing::info!(
            "Appended {} idea(s) to {} ({} total)",
            ideas.len(),
            self.path.display(),
            log.len()
        );
        Ok(log)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn absent_store_loads_empty() {
        let tmp = tempdir().unwrap();
        let store = HistoryStore::new(tmp.path().join("data/idea_history.json"));

        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn append_accumulates_in_generation_order() {
        let tmp = tempdir().unwrap();
        let store = HistoryStore::new(tmp.path().join("data/idea_history.json"));

        store.append(&[IdeaRecord::named("Cable Clip")]).unwrap();
        let log = store
            .append(&[IdeaRecord::named("Desk Mat"), IdeaRecord::named("Lamp")])
            .unwrap();

        let names: Vec<_> = log.iter().map(|i| i.product_name.as_str()).collect();
        assert_eq!(names, ["Cable Clip", "Desk Mat", "Lamp"]);
        assert_eq!(store.load().unwrap(), log);
    }

    #[test]
    fn corrupt_store_is_an_error() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("idea_history.json");
        fs::write(&path, r#"{"products": []}"#).unwrap();

        let error = HistoryStore::new(path).load().unwrap_err();
        assert!(matches!(error, StorageError::Corrupt { .. }));
    }
}
