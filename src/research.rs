//! Generating new product ideas for the configured niche.

use std::collections::BTreeSet;

use crate::{
    completion::{Completion, CompletionError},
    domain::IdeaRecord,
    prompt,
    repair::{repair_ideas, RepairError},
    storage::{load_niche, NicheError, StorageError, Workspace},
};

/// Asks the completion service for ideas and records them in the workspace.
pub struct IdeaGenerator<'w, C> {
    client: C,
    workspace: &'w Workspace,
}

/// Why a generation run produced no ideas.
///
/// No file is modified when a run fails, except for [`Self::Storage`] raised
/// while writing the idea-output file.
#[derive(Debug, thiserror::Error)]
pub enum ResearchError {
    /// The niche description is missing or unreadable.
    #[error(transparent)]
    Niche(#[from] NicheError),

    /// The completion service could not be reached.
    #[error(transparent)]
    Completion(#[from] CompletionError),

    /// The reply could not be turned into idea records.
    #[error(transparent)]
    Repair(#[from] RepairError),

    /// Every idea in the reply had already been generated before.
    #[error("every idea in the model response was already generated")]
    NoNewIdeas {
        /// The raw reply.
        text: String,
    },

    /// The history or idea-output file could not be read or written.
    ///
    /// The history is extended before the idea-output file is written, so a
    /// failure writing the idea-output file leaves the new ideas recorded in
    /// the history only. A failure on the history leaves both files as they
    /// were.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ResearchError {
    /// Whether the error is a configuration problem the user must fix before
    /// any run can succeed.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Niche(_))
    }

    /// The model reply, if the failure happened after one was received.
    #[must_use]
    pub fn response_text(&self) -> Option<&str> {
        match self {
            Self::Repair(error) => Some(error.text()),
            Self::NoNewIdeas { text } => Some(text),
            Self::Niche(_) | Self::Completion(_) | Self::Storage(_) => None,
        }
    }
}

impl<'w, C: Completion> IdeaGenerator<'w, C> {
    /// Creates a generator writing into `workspace`.
    pub const fn new(client: C, workspace: &'w Workspace) -> Self {
        Self { client, workspace }
    }

    /// Runs one generation.
    ///
    /// The prompt excludes the most recently generated names. The completion
    /// service is called exactly once. Only after the whole reply has been
    /// repaired is the history extended and the idea-output file overwritten.
    /// An empty reply list still overwrites the idea-output file.
    ///
    /// # Errors
    ///
    /// Returns a [`ResearchError`] if the niche cannot be loaded, the service
    /// fails, the reply cannot be repaired, or the results cannot be saved.
    pub fn generate(&self) -> Result<Vec<IdeaRecord>, ResearchError> {
        let config = self.workspace.config();
        let niche = load_niche(&self.workspace.niche_path())?;

        let history_store = self.workspace.history();
        let history = history_store.load()?;
        let excluded = history.exclusion_list(config.exclusion_limit);
        tracing::debug!(
            history = history.len(),
            excluded = excluded.len(),
            "building idea prompt"
        );

        let prompt = prompt::ideas(&niche, &excluded, config.ideas_per_run);
        let raw = self.client.complete(&prompt, config.temperature)?;

        let mut ideas = repair_ideas(&raw)?;
        if config.strict_dedup && !ideas.is_empty() {
            ideas = drop_known(ideas, &history.known_names());
            if ideas.is_empty() {
                return Err(ResearchError::NoNewIdeas { text: raw });
            }
        }

        if !ideas.is_empty() {
            history_store.append(&ideas)?;
        }
        self.workspace.board().save(&ideas)?;

        tracing::info!("Generated {} new idea(s)", ideas.len());
        Ok(ideas)
    }
}

/// Removes ideas whose name was generated before or repeats earlier in the
/// same batch.
fn drop_known(ideas: Vec<IdeaRecord>, known: &BTreeSet<String>) -> Vec<IdeaRecord> {
    let mut seen = known.clone();
    ideas
        .into_iter()
        .filter(|idea| {
            let name = idea.product_name.trim().to_lowercase();
            let fresh = seen.insert(name);
            if !fresh {
                tracing::debug!("dropping repeated idea '{}'", idea.product_name);
            }
            fresh
        })
        .collect()
}
