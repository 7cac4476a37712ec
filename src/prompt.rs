//! Prompt text sent to the completion service.

use std::fmt::Write as _;

use crate::domain::IdeaRecord;

/// Builds the idea-research prompt.
///
/// `excluded` names are quoted and listed verbatim; the line is left out
/// entirely when there is nothing to exclude.
#[must_use]
pub fn ideas(niche: &str, excluded: &[String], count: usize) -> String {
    let mut prompt = String::new();

    let _ = writeln!(
        prompt,
        "You are a product research assistant specializing in e-commerce niches.\n\n\
         Your task is to generate {count} real, currently trending product ideas based on \
         the following niche information.\n\n{niche}\n"
    );

    if !excluded.is_empty() {
        let quoted: Vec<String> = excluded.iter().map(|name| format!("\"{name}\"")).collect();
        let _ = writeln!(
            prompt,
            "Avoid suggesting any products named: {}\n",
            quoted.join(", ")
        );
    }

    prompt.push_str(
        "Requirements:\n\
         - ONLY suggest product ideas that reflect real, trending, or commonly searched items \
         on platforms like Amazon, Etsy, Google Trends, or TikTok Shop.\n\
         - Avoid fictional, overly imaginative, or non-existent product types.\n\
         - Use short, commercially viable product names (as seen in real listings).\n\
         - Use snake_case keys only.\n\
         - Output raw JSON only: no markdown, no triple backticks, no commentary.\n\n\
         Return a JSON list of product objects. Each object must have the following keys:\n\
         - product_name: Full product name including qualifiers\n\
         - description: 1-2 sentence overview of the product's function and appeal\n\
         - target_audience_appeal: Why this product would appeal to the target audience\n\
         - keywords: a list of 3-5 search terms relevant to the product\n",
    );

    prompt
}

/// Builds the branding prompt for a single idea.
#[must_use]
pub fn branding(idea: &IdeaRecord, store_description: &str) -> String {
    format!(
        "You are a branding and marketing assistant for {store_description}.\n\n\
         Using the following product details, generate structured branding content.\n\n\
         Product Name: {name}\n\
         Description: {description}\n\
         Target Appeal: {appeal}\n\
         Keywords: {keywords}\n\n\
         Return the result as raw JSON only.\n\
         Do NOT include markdown formatting or triple backticks.\n\n\
         Required keys:\n\
         - product_title\n\
         - short_description\n\
         - long_description\n\
         - unique_selling_points (list of 3-5)\n\
         - instagram_caption\n\
         - suggested_hashtags (list)\n\
         - brand_tone\n",
        name = idea.product_name,
        description = idea.description,
        appeal = idea.target_audience_appeal,
        keywords = idea.keywords.join(", "),
    )
}
