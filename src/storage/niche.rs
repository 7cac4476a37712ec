use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// The niche description could not be loaded.
///
/// Generation cannot proceed without a niche, so these errors are fatal.
#[derive(Debug, thiserror::Error)]
pub enum NicheError {
    /// The niche file does not exist.
    #[error("{} not found. Please define your niche first (see `roboshop init`).", .0.display())]
    Missing(PathBuf),

    /// The niche file contains only whitespace.
    #[error("{} is empty. Please describe your niche first.", .0.display())]
    Empty(PathBuf),

    /// The niche file exists but could not be read.
    #[error("failed to read {}", path.display())]
    Read {
        /// The niche file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Reads the niche description, trimmed of surrounding whitespace.
///
/// # Errors
///
/// Returns a [`NicheError`] naming the file if it is missing, blank, or
/// unreadable.
pub fn load_niche(path: &Path) -> Result<String, NicheError> {
    let content = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => NicheError::Missing(path.to_path_buf()),
        _ => NicheError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let niche = content.trim();
    if niche.is_empty() {
        return Err(NicheError::Empty(path.to_path_buf()));
    }
    Ok(niche.to_string())
}
