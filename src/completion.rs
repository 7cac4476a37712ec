//! The text-completion capability the generators depend on.
//!
//! Generators only see the [`Completion`] trait. [`OpenAiClient`] is the
//! production implementation; tests substitute closures.

mod openai;
pub use openai::OpenAiClient;

/// A black-box text completion service.
pub trait Completion {
    /// Returns one completion for `prompt`, sampled at `temperature`.
    ///
    /// # Errors
    ///
    /// Returns a [`CompletionError`] if the service cannot be reached or
    /// returns no text.
    fn complete(&self, prompt: &str, temperature: f32) -> Result<String, CompletionError>;
}

impl<F> Completion for F
where
    F: Fn(&str, f32) -> Result<String, CompletionError>,
{
    fn complete(&self, prompt: &str, temperature: f32) -> Result<String, CompletionError> {
        self(prompt, temperature)
    }
}

/// Failure to obtain a completion.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// The API key environment variable is not set.
    #[error("{0} environment variable is not set")]
    MissingApiKey(String),

    /// The request could not be sent or was rejected.
    #[error("completion request failed: {0}")]
    Request(String),

    /// The response body could not be decoded.
    #[error("failed to read completion response: {0}")]
    Response(String),

    /// The response contained no text.
    #[error("completion response contained no text")]
    Empty,
}
