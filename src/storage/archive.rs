//! Saved products, one JSON document per product.

use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

use super::{read_json, write_json, StorageError};
use crate::domain::{BrandingRecord, IdeaRecord, ProductDocument};

/// A directory of `<slug>.json` product documents.
///
/// The directory is created on the first save. Documents sharing a slug
/// overwrite each other.
#[derive(Debug, Clone)]
pub struct Archive {
    dir: PathBuf,
}

impl Archive {
    /// An archive rooted at `dir`.
    #[must_use]
    pub const fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// The archive directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Saves `idea` with its `branding`, returning the document's path.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or document cannot be written.
    pub fn save(
        &self,
        idea: &IdeaRecord,
        branding: &BrandingRecord,
    ) -> Result<PathBuf, StorageError> {
        let document = ProductDocument::new(idea.clone(), branding.clone());
        let path = self.dir.join(format!("{}.json", document.slug()));

        write_json(&path, &document)?;
        tracing::info!("Saved product to {}", path.display());

        Ok(path)
    }

    /// Loads the document at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Corrupt`] if the document is not a complete
    /// product document, or another [`StorageError`] if it cannot be read.
    pub fn load(&self, path: &Path) -> Result<ProductDocument, StorageError> {
        read_json(path)
    }

    /// Adds or replaces the listing URL of the document at `path`.
    ///
    /// The product and branding are left untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be loaded or rewritten.
    pub fn set_url(&self, path: &Path, url: &str) -> Result<ProductDocument, StorageError> {
        let mut document = self.load(path)?;
        document.url = Some(url.to_string());

        write_json(path, &document)?;
        tracing::info!("Set url of {} to {url}", path.display());

        Ok(document)
    }

    /// File names of every saved document, in the order the filesystem
    /// reports them. A missing directory has no documents.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory exists but cannot be read.
    pub fn list(&self) -> Result<Vec<String>, StorageError> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => {
                    let is_document = entry.file_type().is_file()
                        && entry.path().extension() == Some(OsStr::new("json"));
                    is_document.then(|| Ok(entry.file_name().to_string_lossy().into_owned()))
                }
                Err(e) => Some(Err(StorageError::Read {
                    path: e.path().unwrap_or(self.dir.as_path()).to_path_buf(),
                    source: e.into(),
                })),
            })
            .collect()
    }

    /// Resolves a user-supplied document name to a path.
    ///
    /// A bare name such as `desk_mat` or `desk_mat.json` is looked up inside
    /// the archive. Anything containing a directory component is used as is.
    #[must_use]
    pub fn resolve(&self, name: &str) -> PathBuf {
        let given = Path::new(name);
        if given.components().count() > 1 || given.is_absolute() {
            return given.to_path_buf();
        }
        if given.extension() == Some(OsStr::new("json")) {
            self.dir.join(given)
        } else {
            self.dir.join(format!("{name}.json"))
        }
    }
}
