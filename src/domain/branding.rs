use serde::{Deserialize, Serialize};

/// Marketing copy generated for a single product idea.
///
/// Every field is required when reading a persisted document. Replies from
/// the model go through a schema step that fills absent fields with empty
/// values before a `BrandingRecord` is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandingRecord {
    /// The title used for the product listing and its archive filename.
    pub product_title: String,
    /// A one-line summary.
    pub short_description: String,
    /// Full listing copy.
    pub long_description: String,
    /// Selling points (3-5 expected).
    pub unique_selling_points: Vec<String>,
    /// Ready-to-post social caption.
    pub instagram_caption: String,
    /// Hashtags for the caption.
    pub suggested_hashtags: Vec<String>,
    /// The tone of voice the copy is written in.
    pub brand_tone: String,
}

impl BrandingRecord {
    /// The title if present, otherwise the given fallback.
    #[must_use]
    pub fn title_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        let title = self.product_title.trim();
        if title.is_empty() { fallback } else { title }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branding(title: &str) -> BrandingRecord {
        BrandingRecord {
            product_title: title.to_string(),
            short_description: String::new(),
            long_description: String::new(),
            unique_selling_points: Vec::new(),
            instagram_caption: String::new(),
            suggested_hashtags: Vec::new(),
            brand_tone: String::new(),
        }
    }

    #[test]
    fn title_or_uses_title_when_present() {
        assert_eq!(branding("Zen Desk Mat").title_or("Desk Mat"), "Zen Desk Mat");
    }

    #[test]
    fn title_or_falls_back_on_blank_title() {
        assert_eq!(branding("  ").title_or("Desk Mat"), "Desk Mat");
    }

    #[test]
    fn incomplete_document_is_rejected() {
        let result = serde_json::from_str::<BrandingRecord>(r#"{"product_title":"X"}"#);
        assert!(result.is_err());
    }
}
