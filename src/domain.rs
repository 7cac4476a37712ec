//! Domain models for the product pipeline.
//!
//! This module contains the records produced by the generators (ideas and
//! branding), the persisted product document, and configuration.

/// Product idea records and the idea history log.
pub mod idea;
pub use idea::{HistoryLog, IdeaRecord};

/// Branding copy generated for a single idea.
pub mod branding;
pub use branding::BrandingRecord;

/// The archived (idea, branding, url) document.
pub mod product;
pub use product::ProductDocument;

mod slug;
pub use slug::slugify;

mod config;
pub use config::Config;
