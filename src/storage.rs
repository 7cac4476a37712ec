//! Filesystem persistence for the pipeline.
//!
//! A [`Workspace`] is a directory holding `roboshop.toml`, the niche
//! description, and the JSON data files. Every JSON write goes through a
//! temporary file in the destination directory that is then renamed over the
//! target, so a crash never leaves a half-written document behind.

use std::{
    fs, io,
    io::Write as _,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use tempfile::NamedTempFile;

mod archive;
mod board;
mod history;
mod niche;
mod workspace;

pub use archive::Archive;
pub use board::IdeaBoard;
pub use history::HistoryStore;
pub use niche::{load_niche, NicheError};
pub use workspace::Workspace;

/// Errors reading or writing the JSON data files.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The file does not exist.
    #[error("{} does not exist", .0.display())]
    NotFound(PathBuf),

    /// The file exists but could not be read.
    #[error("failed to read {}", path.display())]
    Read {
        /// The file being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The file or its directory could not be written.
    #[error("failed to write {}", path.display())]
    Write {
        /// The file being written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The file is not a valid document of the expected type.
    #[error("{} is corrupt: {source}", path.display())]
    Corrupt {
        /// The file being read.
        path: PathBuf,
        /// Why it could not be decoded.
        #[source]
        source: serde_json::Error,
    },
}

impl StorageError {
    /// The file the error relates to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(path)
            | Self::Read { path, .. }
            | Self::Write { path, .. }
            | Self::Corrupt { path, .. } => path,
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StorageError> {
    let content = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => StorageError::NotFound(path.to_path_buf()),
        _ => StorageError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;

    serde_json::from_str(&content).map_err(|source| StorageError::Corrupt {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes `value` as indented JSON, replacing `path` atomically.
///
/// The parent directory is created if needed.
fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StorageError> {
    let write_error = |source: io::Error| StorageError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(write_error)?;

    let mut file = NamedTempFile::new_in(dir).map_err(write_error)?;
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut file, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| write_error(e.into()))?;
    file.write_all(b"\n").map_err(write_error)?;

    file.persist(path).map_err(|e| write_error(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn write_json_creates_parent_directories() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("nested/deeper/file.json");

        write_json(&path, &json!({"a": 1})).unwrap();

        let back: serde_json::Value = read_json(&path).unwrap();
        assert_eq!(back, json!({"a": 1}));
    }

    #[test]
    fn write_json_uses_four_space_indent() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("file.json");

        write_json(&path, &json!({"products": []})).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "{\n    \"products\": []\n}\n");
    }

    #[test]
    fn write_json_leaves_no_temporary_files() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("file.json");

        write_json(&path, &json!([1])).unwrap();
        write_json(&path, &json!([2])).unwrap();

        let entries: Vec<_> = fs::read_dir(tmp.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn read_json_distinguishes_missing_and_corrupt() {
        let tmp = tempdir().unwrap();
        let missing = tmp.path().join("missing.json");
        let corrupt = tmp.path().join("corrupt.json");
        fs::write(&corrupt, "{not json").unwrap();

        let missing_error = read_json::<serde_json::Value>(&missing).unwrap_err();
        let corrupt_error = read_json::<serde_json::Value>(&corrupt).unwrap_err();

        assert!(matches!(missing_error, StorageError::NotFound(_)));
        assert!(matches!(corrupt_error, StorageError::Corrupt { .. }));
        assert_eq!(corrupt_error.path(), corrupt);
    }
}
