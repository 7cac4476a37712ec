use std::path::{Path, PathBuf};

use super::{Archive, HistoryStore, IdeaBoard};
use crate::domain::Config;

/// A directory holding the configuration and every pipeline file.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    config: Config,
}

impl Workspace {
    /// Name of the configuration file at the workspace root.
    pub const CONFIG_FILE: &'static str = "roboshop.toml";

    /// Opens the workspace at `root`.
    ///
    /// A missing or invalid configuration file is not an error; the default
    /// configuration is used instead.
    #[must_use]
    pub fn open(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let config = Config::load(&root.join(Self::CONFIG_FILE)).unwrap_or_else(|e| {
            tracing::debug!("Failed to load config: {e}");
            Config::default()
        });
        Self { root, config }
    }

    /// A workspace at `root` using `config` regardless of what is on disk.
    #[must_use]
    pub const fn with_config(root: PathBuf, config: Config) -> Self {
        Self { root, config }
    }

    /// The workspace root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Where the configuration file lives.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.root.join(Self::CONFIG_FILE)
    }

    /// Resolves a configured path against the workspace root.
    #[must_use]
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// The niche description file.
    #[must_use]
    pub fn niche_path(&self) -> PathBuf {
        self.resolve(&self.config.niche_file)
    }

    /// The idea history store.
    #[must_use]
    pub fn history(&self) -> HistoryStore {
        HistoryStore::new(self.resolve(&self.config.history_file))
    }

    /// The idea-output file.
    #[must_use]
    pub fn board(&self) -> IdeaBoard {
        IdeaBoard::new(self.resolve(&self.config.ideas_file))
    }

    /// The saved products.
    #[must_use]
    pub fn archive(&self) -> Archive {
        Archive::new(self.resolve(&self.config.products_dir))
    }
}
