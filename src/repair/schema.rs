//! Shape checks and defaulting for decoded replies.

use serde_json::{Map, Value};

use crate::domain::{slugify, BrandingRecord, IdeaRecord};

/// A decoded reply that does not have the expected structure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// The reply was not a list.
    #[error("expected a list of product objects, found {0}")]
    NotASequence(&'static str),

    /// An entry in the list was not an object.
    #[error("item {index} is not an object (found {found})")]
    NotAMapping {
        /// Zero-based position in the list.
        index: usize,
        /// What was found instead.
        found: &'static str,
    },

    /// An entry had no usable `product_name`.
    #[error("item {index} has no product_name")]
    MissingName {
        /// Zero-based position in the list.
        index: usize,
    },

    /// The branding reply was not an object.
    #[error("expected a branding object, found {0}")]
    NotAnObject(&'static str),
}

/// Converts a decoded reply into idea records.
///
/// The reply must be a list of objects, each with a non-blank
/// `product_name`. An empty list yields no ideas. Other fields default to empty values when absent.
///
/// # Errors
///
/// Returns a [`SchemaError`] describing the first structural violation.
pub fn ideas(value: &Value) -> Result<Vec<IdeaRecord>, SchemaError> {
    let Value::Array(items) = value else {
        return Err(SchemaError::NotASequence(kind(value)));
    };
    items
        .iter()
        .enumerate()
        .map(|(index, item)| idea(index, item))
        .collect()
}

fn idea(index: usize, item: &Value) -> Result<IdeaRecord, SchemaError> {
    let Value::Object(object) = item else {
        return Err(SchemaError::NotAMapping {
            index,
            found: kind(item),
        });
    };

    let product_name = text(object, "product_name");
    if product_name.is_empty() {
        return Err(SchemaError::MissingName { index });
    }

    Ok(IdeaRecord {
        product_name,
        description: text(object, "description"),
        target_audience_appeal: text(object, "target_audience_appeal"),
        keywords: list(object, "keywords", |c| c == ','),
    })
}

/// Converts a decoded reply into a branding record.
///
/// Missing fields are filled with empty values.
///
/// # Errors
///
/// Returns [`SchemaError::NotAnObject`] if the reply is not an object.
pub fn branding(value: &Value) -> Result<BrandingRecord, SchemaError> {
    let Value::Object(object) = value else {
        return Err(SchemaError::NotAnObject(kind(value)));
    };

    Ok(BrandingRecord {
        product_title: text(object, "product_title"),
        short_description: text(object, "short_description"),
        long_description: text(object, "long_description"),
        unique_selling_points: list(object, "unique_selling_points", |c| c == '\n'),
        instagram_caption: text(object, "instagram_caption"),
        suggested_hashtags: list(object, "suggested_hashtags", |c| {
            c == ',' || c.is_whitespace()
        }),
        brand_tone: text(object, "brand_tone"),
    })
}

/// Looks up `key`, also matching keys that only differ in case or use spaces
/// or hyphens instead of underscores.
fn field<'v>(object: &'v Map<String, Value>, key: &str) -> Option<&'v Value> {
    object.get(key).or_else(|| {
        object
            .iter()
            .find(|(candidate, _)| slugify(candidate) == key)
            .map(|(_, value)| value)
    })
}

fn text(object: &Map<String, Value>, key: &str) -> String {
    match field(object, key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(scalar)
            .collect::<Vec<_>>()
            .join("\n"),
        Some(value) => scalar(value).unwrap_or_default(),
        None => String::new(),
    }
}

fn list(object: &Map<String, Value>, key: &str, separator: fn(char) -> bool) -> Vec<String> {
    match field(object, key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(scalar)
            .filter(|item| !item.is_empty())
            .collect(),
        Some(Value::String(joined)) => joined
            .split(separator)
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

const fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn complete_idea_is_preserved() {
        let value = json!([{
            "product_name": "Desk Mat",
            "description": "A felt mat.",
            "target_audience_appeal": "Looks tidy.",
            "keywords": ["desk", "mat", "felt"]
        }]);

        let ideas = ideas(&value).unwrap();

        assert_eq!(
            ideas,
            vec![IdeaRecord {
                product_name: "Desk Mat".to_string(),
                description: "A felt mat.".to_string(),
                target_audience_appeal: "Looks tidy.".to_string(),
                keywords: vec!["desk".to_string(), "mat".to_string(), "felt".to_string()],
            }]
        );
    }

    #[test]
    fn missing_optional_fields_default_to_empty() {
        let ideas = ideas(&json!([{"product_name": "Lamp"}])).unwrap();

        assert_eq!(ideas, vec![IdeaRecord::named("Lamp")]);
    }

    #[test]
    fn keywords_given_as_a_string_are_split() {
        let ideas = ideas(&json!([{"product_name": "Lamp", "keywords": "led, desk ,, lamp"}]))
            .unwrap();

        assert_eq!(ideas[0].keywords, vec!["led", "desk", "lamp"]);
    }

    #[test]
    fn loosely_named_keys_are_matched() {
        let ideas = ideas(&json!([{"Product Name": "Lamp", "Target-Audience-Appeal": "Bright"}]))
            .unwrap();

        assert_eq!(ideas[0].product_name, "Lamp");
        assert_eq!(ideas[0].target_audience_appeal, "Bright");
    }

    #[test]
    fn object_reply_is_not_a_sequence() {
        let error = ideas(&json!({"products": []})).unwrap_err();
        assert_eq!(error, SchemaError::NotASequence("an object"));
    }

    #[test]
    fn empty_list_has_no_ideas() {
        assert_eq!(ideas(&json!([])).unwrap(), Vec::new());
    }

    #[test]
    fn non_object_items_are_rejected() {
        let error = ideas(&json!([{"product_name": "Lamp"}, "Desk Mat"])).unwrap_err();
        assert_eq!(
            error,
            SchemaError::NotAMapping {
                index: 1,
                found: "a string"
            }
        );
    }

    #[test]
    fn items_without_a_name_are_rejected() {
        let error = ideas(&json!([{"description": "nameless"}])).unwrap_err();
        assert_eq!(error, SchemaError::MissingName { index: 0 });
    }

    #[test]
    fn branding_fills_defaults() {
        let branding = branding(&json!({"product_title": "Zen Mat"})).unwrap();

        assert_eq!(branding.product_title, "Zen Mat");
        assert!(branding.long_description.is_empty());
        assert!(branding.unique_selling_points.is_empty());
        assert!(branding.suggested_hashtags.is_empty());
    }

    #[test]
    fn hashtags_given_as_a_string_are_split() {
        let branding = branding(&json!({"suggested_hashtags": "#desk #setup,#wfh"})).unwrap();

        assert_eq!(branding.suggested_hashtags, vec!["#desk", "#setup", "#wfh"]);
    }

    #[test]
    fn branding_must_be_an_object() {
        let error = branding(&json!(["not", "an", "object"])).unwrap_err();
        assert_eq!(error, SchemaError::NotAnObject("a list"));
    }
}
