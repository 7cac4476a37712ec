use serde::{Deserialize, Serialize};

use super::{slugify, BrandingRecord, IdeaRecord};

/// A saved product: the originating idea, its branding, and an optional
/// external listing URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDocument {
    /// The idea the product was generated from.
    pub product: IdeaRecord,
    /// The generated branding copy.
    pub branding: BrandingRecord,
    /// Where the product is listed, once known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ProductDocument {
    /// Creates a document without a URL.
    #[must_use]
    pub const fn new(product: IdeaRecord, branding: BrandingRecord) -> Self {
        Self {
            product,
            branding,
            url: None,
        }
    }

    /// The identifier this document is stored under.
    ///
    /// Derived from the branding title, falling back to the product name, and
    /// finally to `product` when both are blank.
    #[must_use]
    pub fn slug(&self) -> String {
        let slug = slugify(self.branding.title_or(&self.product.product_name));
        if slug.is_empty() {
            "product".to_string()
        } else {
            slug
        }
    }
}
