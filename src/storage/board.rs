use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{read_json, write_json, StorageError};
use crate::domain::IdeaRecord;

/// The idea-output file: the most recent batch of ideas.
///
/// Stored as `{ "products": [...] }` and overwritten by every successful
/// generation run.
#[derive(Debug, Clone)]
pub struct IdeaBoard {
    path: PathBuf,
}

#[derive(Serialize, Deserialize)]
struct Board<I> {
    #[serde(default)]
    products: I,
}

impl IdeaBoard {
    /// A board backed by the file at `path`.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the current batch.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if no ideas have been generated yet,
    /// or another [`StorageError`] if the file is unreadable.
    pub fn load(&self) -> Result<Vec<IdeaRecord>, StorageError> {
        let board: Board<Vec<IdeaRecord>> = read_json(&self.path)?;
        Ok(board.products)
    }

    /// Replaces the current batch.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, ideas: &[IdeaRecord]) -> Result<(), StorageError> {
        write_json(&self.path, &Board { products: ideas })?;
        tracing::info!("Saved {} idea(s) to {}", ideas.len(), self.path.display());
        Ok(())
    }
}
