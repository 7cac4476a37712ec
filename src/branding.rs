//! Generating branding copy for a chosen idea.

use crate::{
    completion::{Completion, CompletionError},
    domain::{BrandingRecord, IdeaRecord},
    prompt,
    repair::{repair_branding, RepairError},
};

/// Turns a single idea into branding copy.
///
/// Nothing is persisted; saving is up to the caller (see
/// [`crate::storage::Archive::save`]).
pub struct BrandingGenerator<C> {
    client: C,
    store_description: String,
    temperature: f32,
}

/// Why branding could not be generated.
#[derive(Debug, thiserror::Error)]
pub enum BrandingError {
    /// The completion service could not be reached.
    #[error(transparent)]
    Completion(#[from] CompletionError),

    /// The reply was not a JSON object. Carries the cleaned reply.
    #[error("failed to parse branding response:\n{}", .0.text())]
    Parse(#[source] RepairError),
}

impl<C: Completion> BrandingGenerator<C> {
    /// Creates a generator describing the store as `store_description`.
    pub fn new(client: C, store_description: impl Into<String>, temperature: f32) -> Self {
        Self {
            client,
            store_description: store_description.into(),
            temperature,
        }
    }

    /// Generates branding for `idea` with a single completion call.
    ///
    /// # Errors
    ///
    /// Returns [`BrandingError::Completion`] if the service fails and
    /// [`BrandingError::Parse`] if the reply is not strict JSON describing an
    /// object.
    pub fn generate(&self, idea: &IdeaRecord) -> Result<BrandingRecord, BrandingError> {
        let prompt = prompt::branding(idea, &self.store_description);
        let raw = self.client.complete(&prompt, self.temperature)?;

        let branding = repair_branding(&raw).map_err(BrandingError::Parse)?;
        tracing::debug!("generated branding '{}'", branding.product_title);
        Ok(branding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn idea() -> IdeaRecord {
        IdeaRecord {
            product_name: "Desk Mat".to_string(),
            description: "A felt mat.".to_string(),
            target_audience_appeal: "Tidy.".to_string(),
            keywords: vec!["desk".to_string(), "mat".to_string()],
        }
    }

    fn generator(
        reply: &'static str,
    ) -> BrandingGenerator<impl Fn(&str, f32) -> Result<String, CompletionError>> {
        BrandingGenerator::new(
            move |_: &str, _: f32| -> Result<String, CompletionError> { Ok(reply.to_string()) },
            "a desk accessories store",
            0.7,
        )
    }

    #[test]
    fn fenced_reply_is_parsed() {
        let reply = "```json\n{\"product_title\": \"Zen Mat\", \"short_description\": \"Calm.\", \
                     \"unique_selling_points\": [\"Felt\", \"Large\", \"Washable\"], \
                     \"suggested_hashtags\": [\"#desk\"], \"brand_tone\": \"calm\"}\n```";

        let branding = generator(reply).generate(&idea()).unwrap();

        assert_eq!(branding.product_title, "Zen Mat");
        assert_eq!(branding.unique_selling_points.len(), 3);
        assert_eq!(branding.suggested_hashtags, vec!["#desk"]);
        assert!(branding.long_description.is_empty());
    }

    #[test]
    fn prompt_describes_the_idea() {
        let generator = BrandingGenerator::new(
            |prompt: &str, _: f32| -> Result<String, CompletionError> {
                assert!(prompt.contains("assistant for a desk accessories store"));
                assert!(prompt.contains("Product Name: Desk Mat"));
                assert!(prompt.contains("Keywords: desk, mat"));
                Ok("{}".to_string())
            },
            "a desk accessories store",
            0.7,
        );

        generator.generate(&idea()).unwrap();
    }

    #[test]
    fn non_json_reply_is_a_parse_error_with_cleaned_text() {
        let error = generator("```json\nHere is your branding!\n```")
            .generate(&idea())
            .unwrap_err();

        let BrandingError::Parse(repair) = &error else {
            panic!("expected a parse error, got {error:?}");
        };
        assert_eq!(repair.text(), "Here is your branding!");
        assert!(error.to_string().ends_with("Here is your branding!"));
    }

    #[test]
    fn single_quoted_reply_is_rejected() {
        let error = generator("{'product_title': 'Zen Mat'}")
            .generate(&idea())
            .unwrap_err();

        assert!(matches!(error, BrandingError::Parse(_)));
    }

    #[test]
    fn completion_errors_are_passed_through() {
        let generator = BrandingGenerator::new(
            |_: &str, _: f32| -> Result<String, CompletionError> {
                Err(CompletionError::Request("timed out".to_string()))
            },
            "a store",
            0.7,
        );

        let error = generator.generate(&idea()).unwrap_err();

        assert!(matches!(error, BrandingError::Completion(CompletionError::Request(_))));
    }
}
