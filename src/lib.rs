//! Language-model driven product research and branding.
//!
//! A niche description goes in; trending product ideas come out, followed by
//! branding copy for whichever idea is picked. Ideas, their history, and
//! saved products live as JSON files in a [`Workspace`].
//!
//! The language model is reached through the [`Completion`] trait. Its
//! replies are free text, so everything it returns passes through the
//! [`repair`] pipeline before it is trusted.

pub mod domain;
pub use domain::{BrandingRecord, Config, HistoryLog, IdeaRecord, ProductDocument};

pub mod completion;
pub use completion::{Completion, CompletionError, OpenAiClient};

pub mod repair;

pub mod prompt;

pub mod storage;
pub use storage::{Archive, HistoryStore, IdeaBoard, NicheError, StorageError, Workspace};

pub mod research;
pub use research::{IdeaGenerator, ResearchError};

pub mod branding;
pub use branding::{BrandingError, BrandingGenerator};
