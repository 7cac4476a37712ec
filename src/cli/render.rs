//! Text rendering of ideas, branding and saved products.

use std::io::{self, Write};

use roboshop::{BrandingRecord, IdeaRecord, ProductDocument, ResearchError};

use super::terminal::Colorize;

fn or_na(text: &str) -> &str {
    if text.trim().is_empty() { "N/A" } else { text }
}

fn name_of(idea: &IdeaRecord) -> &str {
    if idea.product_name.trim().is_empty() {
        "Unnamed Product"
    } else {
        &idea.product_name
    }
}

/// A numbered list of ideas. Narrow terminals only get names and keywords.
pub fn ideas(out: &mut impl Write, ideas: &[IdeaRecord], narrow: bool) -> io::Result<()> {
    for (index, idea) in ideas.iter().enumerate() {
        writeln!(out, "{}", format!("{}. {}", index + 1, name_of(idea)).heading())?;
        let keywords = idea.keywords.join(", ");

        if narrow {
            if !keywords.is_empty() {
                writeln!(out, "   {}", keywords.dim())?;
            }
            continue;
        }

        writeln!(out, "   Description:    {}", or_na(&idea.description))?;
        writeln!(out, "   Why it appeals: {}", or_na(&idea.target_audience_appeal))?;
        writeln!(out, "   Keywords:       {}", or_na(&keywords).info())?;
        writeln!(out)?;
    }
    Ok(())
}

/// A preview of generated branding copy.
pub fn branding(out: &mut impl Write, branding: &BrandingRecord, narrow: bool) -> io::Result<()> {
    writeln!(out, "{}", or_na(&branding.product_title).heading())?;
    writeln!(out, "{}", or_na(&branding.short_description))?;
    writeln!(out, "{} {}", "Tone:".dim(), or_na(&branding.brand_tone))?;

    if !narrow && !branding.long_description.trim().is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", branding.long_description.trim())?;
    }

    if !branding.unique_selling_points.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", "Selling points".dim())?;
        for point in &branding.unique_selling_points {
            writeln!(out, "  - {point}")?;
        }
    }

    if !narrow {
        writeln!(out)?;
        writeln!(out, "{}", "Instagram".dim())?;
        writeln!(out, "  {}", or_na(&branding.instagram_caption))?;
        if !branding.suggested_hashtags.is_empty() {
            writeln!(out, "  {}", branding.suggested_hashtags.join(" ").info())?;
        }
    }
    Ok(())
}

/// A saved product: its branding, the originating idea, and the listing URL.
pub fn document(out: &mut impl Write, document: &ProductDocument, narrow: bool) -> io::Result<()> {
    branding(out, &document.branding, narrow)?;

    writeln!(out)?;
    writeln!(out, "{}", "Product".dim())?;
    writeln!(out, "  Name:     {}", name_of(&document.product))?;
    if !narrow {
        writeln!(out, "  Summary:  {}", or_na(&document.product.description))?;
        writeln!(out, "  Keywords: {}", or_na(&document.product.keywords.join(", ")))?;
    }

    match &document.url {
        Some(url) => writeln!(out, "  URL:      {}", url.info()),
        None => writeln!(out, "  URL:      {}", "not set".dim()),
    }
}

/// Explains a failed generation run, including the model reply when there was
/// one.
pub fn research_failure(out: &mut impl Write, error: &ResearchError) -> io::Result<()> {
    writeln!(out, "{}", error.to_string().error())?;
    if let Some(text) = error.response_text() {
        writeln!(out, "{}", "Here's what was returned:".dim())?;
        writeln!(out, "{text}")?;
    }
    Ok(())
}
