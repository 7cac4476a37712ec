//! Recovering structured data from free-text model replies.
//!
//! The model is asked for raw JSON but frequently wraps it in markdown fences
//! or answers with Python-style literals. Replies go through three steps:
//!
//! 1. [`strip_fences`] removes fence markers and surrounding whitespace.
//! 2. [`decode`] tries a strict JSON decoder, then a tolerant literal decoder.
//! 3. A schema step checks the shape and fills absent fields with defaults.
//!
//! Every step returns a `Result`; nothing here panics on malformed input.

use serde_json::Value;

use crate::domain::{BrandingRecord, IdeaRecord};

mod fence;
mod literal;
mod schema;

pub use fence::strip_fences;
pub use schema::SchemaError;

/// Why a piece of text could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// Rejected by the strict JSON decoder.
    #[error("invalid JSON: {0}")]
    Json(String),

    /// Rejected by the tolerant literal decoder.
    #[error("invalid literal at offset {offset}: {message}")]
    Literal {
        /// Byte offset into the decoded text.
        offset: usize,
        /// What went wrong.
        message: String,
    },
}

/// Which decoder accepted the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Valid JSON.
    Strict,
    /// Accepted only by the literal decoder.
    Tolerant,
}

/// Decodes `text` as strict JSON.
///
/// # Errors
///
/// Returns [`DecodeError::Json`] if `text` is not valid JSON.
pub fn decode_strict(text: &str) -> Result<Value, DecodeError> {
    serde_json::from_str(text).map_err(|e| DecodeError::Json(e.to_string()))
}

/// Decodes `text` using relaxed, Python-literal-like syntax.
///
/// # Errors
///
/// Returns [`DecodeError::Literal`] if `text` is not a single literal
/// expression.
pub fn decode_tolerant(text: &str) -> Result<Value, DecodeError> {
    literal::parse(text)
}

/// Decodes `text` with the strict decoder, falling back to the tolerant one.
///
/// # Errors
///
/// Returns the tolerant decoder's error when both decoders reject the text.
pub fn decode(text: &str) -> Result<(Value, Stage), DecodeError> {
    match decode_strict(text) {
        Ok(value) => Ok((value, Stage::Strict)),
        Err(strict) => {
            tracing::debug!("strict decode failed ({strict}), trying literal syntax");
            decode_tolerant(text).map(|value| (value, Stage::Tolerant))
        }
    }
}

/// A model reply that could not be turned into the expected records.
#[derive(Debug, thiserror::Error)]
pub enum RepairError {
    /// Neither decoder accepted the reply.
    #[error("failed to parse model response: {error}")]
    Parse {
        /// The last decoder error.
        error: DecodeError,
        /// The text that was being decoded, for diagnosis.
        text: String,
    },

    /// The reply decoded but has the wrong shape.
    #[error("model response has an unexpected shape: {error}")]
    Structure {
        /// The structural violation.
        error: SchemaError,
        /// The text that was being decoded, for diagnosis.
        text: String,
    },
}

impl RepairError {
    /// The reply text attached for diagnosis.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Parse { text, .. } | Self::Structure { text, .. } => text,
        }
    }
}

/// Recovers a list of idea records from a raw reply.
///
/// Both decoders are tried. Errors carry the raw, uncleaned reply.
///
/// # Errors
///
/// Returns [`RepairError::Parse`] if the reply cannot be decoded and
/// [`RepairError::Structure`] if it is not a list of product objects.
pub fn repair_ideas(raw: &str) -> Result<Vec<IdeaRecord>, RepairError> {
    let cleaned = strip_fences(raw);

    let (value, stage) = decode(&cleaned).map_err(|error| RepairError::Parse {
        error,
        text: raw.to_string(),
    })?;
    if stage == Stage::Tolerant {
        tracing::warn!("model reply was not valid JSON; recovered it as a literal");
    }

    schema::ideas(&value).map_err(|error| RepairError::Structure {
        error,
        text: raw.to_string(),
    })
}

/// Recovers a branding record from a raw reply.
///
/// Only strict JSON is accepted. Errors carry the cleaned reply.
///
/// # Errors
///
/// Returns [`RepairError::Parse`] if the cleaned reply is not valid JSON and
/// [`RepairError::Structure`] if it is not a JSON object.
pub fn repair_branding(raw: &str) -> Result<BrandingRecord, RepairError> {
    let cleaned = strip_fences(raw);

    let value = match decode_strict(&cleaned) {
        Ok(value) => value,
        Err(error) => return Err(RepairError::Parse { error, text: cleaned }),
    };

    schema::branding(&value).map_err(|error| RepairError::Structure {
        error,
        text: cleaned,
    })
}
