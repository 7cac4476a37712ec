use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Configuration for the product pipeline.
///
/// This struct holds the completion endpoint settings, generation tuning, and
/// the locations of every file the pipeline reads or writes. Relative paths
/// are resolved against the workspace root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// The model identifier sent to the completion endpoint.
    pub model: String,

    /// Base URL of an OpenAI-compatible API (without `/chat/completions`).
    pub base_url: String,

    /// Name of the environment variable holding the API key.
    pub api_key_env: String,

    /// Sampling temperature for every completion request.
    pub temperature: f32,

    /// Upper bound on a single completion request, in seconds.
    pub timeout_secs: u64,

    /// How many ideas to request per generation run.
    pub ideas_per_run: usize,

    /// Maximum number of previously generated names embedded in a prompt.
    pub exclusion_limit: usize,

    /// Whether to reject ideas whose name already appears in the history.
    ///
    /// When `false` (default), de-duplication is only requested from the
    /// model through the exclusion list.
    pub strict_dedup: bool,

    /// Describes the store in the branding prompt.
    pub store_description: String,

    /// Plain-text description of the target niche.
    pub niche_file: PathBuf,

    /// The most recent batch of ideas, as `{ "products": [...] }`.
    pub ideas_file: PathBuf,

    /// Every idea ever generated, as a JSON array.
    pub history_file: PathBuf,

    /// Directory of saved product documents.
    pub products_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
            ideas_per_run: default_ideas_per_run(),
            exclusion_limit: default_exclusion_limit(),
            strict_dedup: false,
            store_description: default_store_description(),
            niche_file: default_niche_file(),
            ideas_file: default_ideas_file(),
            history_file: default_history_file(),
            products_dir: default_products_dir(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

const fn default_temperature() -> f32 {
    0.7
}

const fn default_timeout_secs() -> u64 {
    120
}

const fn default_ideas_per_run() -> usize {
    5
}

const fn default_exclusion_limit() -> usize {
    20
}

fn default_store_description() -> String {
    "an online store that specializes in minimalist desk accessories".to_string()
}

fn default_niche_file() -> PathBuf {
    PathBuf::from("niche.txt")
}

fn default_ideas_file() -> PathBuf {
    PathBuf::from("data/product_ideas.json")
}

fn default_history_file() -> PathBuf {
    PathBuf::from("data/idea_history.json")
}

fn default_products_dir() -> PathBuf {
    PathBuf::from("data/products")
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_model")]
        model: String,

        #[serde(default = "default_base_url")]
        base_url: String,

        #[serde(default = "default_api_key_env")]
        api_key_env: String,

        #[serde(default = "default_temperature")]
        temperature: f32,

        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,

        #[serde(default = "default_ideas_per_run")]
        ideas_per_run: usize,

        /// Bounds the prompt size; dedup pressure weakens past this many names.
        #[serde(default = "default_exclusion_limit")]
        exclusion_limit: usize,

        #[serde(default)]
        strict_dedup: bool,

        #[serde(default = "default_store_description")]
        store_description: String,

        #[serde(default = "default_niche_file")]
        niche_file: PathBuf,

        #[serde(default = "default_ideas_file")]
        ideas_file: PathBuf,

        #[serde(default = "default_history_file")]
        history_file: PathBuf,

        #[serde(default = "default_products_dir")]
        products_dir: PathBuf,
    },
}

impl From<Versions> for super::Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                model,
                base_url,
                api_key_env,
                temperature,
                timeout_secs,
                ideas_per_run,
                exclusion_limit,
                strict_dedup,
                store_description,
                niche_file,
                ideas_file,
                history_file,
                products_dir,
            } => Self {
                model,
                base_url,
                api_key_env,
                temperature,
                timeout_secs,
                ideas_per_run,
                exclusion_limit,
                strict_dedup,
                store_description,
                niche_file,
                ideas_file,
                history_file,
                products_dir,
            },
        }
    }
}

impl From<super::Config> for Versions {
    fn from(config: super::Config) -> Self {
        Self::V1 {
            model: config.model,
            base_url: config.base_url,
            api_key_env: config.api_key_env,
            temperature: config.temperature,
            timeout_secs: config.timeout_secs,
            ideas_per_run: config.ideas_per_run,
            exclusion_limit: config.exclusion_limit,
            strict_dedup: config.strict_dedup,
            store_description: config.store_description,
            niche_file: config.niche_file,
            ideas_file: config.ideas_file,
            history_file: config.history_file,
            products_dir: config.products_dir,
        }
    }
}
