use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::slugify;

/// A single product idea produced by the research step.
///
/// Only `product_name` is mandatory. The remaining fields default to empty
/// values so that older or partially written history entries still load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeaRecord {
    /// Short, commercially viable product name.
    pub product_name: String,

    /// One or two sentences describing the product.
    #[serde(default)]
    pub description: String,

    /// Why the product appeals to the niche audience.
    #[serde(default)]
    pub target_audience_appeal: String,

    /// Search terms associated with the product (3-5 expected).
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl IdeaRecord {
    /// Creates an idea with only a name.
    #[must_use]
    pub fn named(product_name: impl Into<String>) -> Self {
        Self {
            product_name: product_name.into(),
            description: String::new(),
            target_audience_appeal: String::new(),
            keywords: Vec::new(),
        }
    }

    /// A stable identifier for the idea, independent of its position in any
    /// list.
    #[must_use]
    pub fn key(&self) -> String {
        slugify(&self.product_name)
    }
}

/// The ordered log of every idea generated so far.
///
/// Insertion order is generation order. The log is append-only at the
/// semantic level; names are not required to be unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryLog(Vec<IdeaRecord>);

impl HistoryLog {
    /// Creates an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// The number of records in the log.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the log holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the records in generation order.
    pub fn iter(&self) -> std::slice::Iter<'_, IdeaRecord> {
        self.0.iter()
    }

    /// Appends newly generated ideas to the end of the log.
    pub fn extend(&mut self, ideas: impl IntoIterator<Item = IdeaRecord>) {
        self.0.extend(ideas);
    }

    /// Every distinct product name in the log, lower-cased.
    #[must_use]
    pub fn known_names(&self) -> BTreeSet<String> {
        self.0
            .iter()
            .map(|idea| idea.product_name.trim().to_lowercase())
            .filter(|name| !name.is_empty())
            .collect()
    }

    /// The names to exclude from the next generation prompt.
    ///
    /// Names are lower-cased and de-duplicated, ordered from most to least
    /// recently generated, and truncated to `limit` entries. Once the history
    /// grows past `limit` distinct names the oldest ones are no longer
    /// excluded.
    #[must_use]
    pub fn exclusion_list(&self, limit: usize) -> Vec<String> {
        let mut seen = BTreeSet::new();
        self.0
            .iter()
            .rev()
            .map(|idea| idea.product_name.trim().to_lowercase())
            .filter(|name| !name.is_empty() && seen.insert(name.clone()))
            .take(limit)
            .collect()
    }
}

impl From<Vec<IdeaRecord>> for HistoryLog {
    fn from(ideas: Vec<IdeaRecord>) -> Self {
        Self(ideas)
    }
}

impl From<HistoryLog> for Vec<IdeaRecord> {
    fn from(log: HistoryLog) -> Self {
        log.0
    }
}

impl<'a> IntoIterator for &'a HistoryLog {
    type Item = &'a IdeaRecord;
    type IntoIter = std::slice::Iter<'a, IdeaRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log(names: &[&str]) -> HistoryLog {
        names.iter().copied().map(IdeaRecord::named).collect::<Vec<_>>().into()
    }

    #[test]
    fn partial_records_deserialize_with_defaults() {
        let history: HistoryLog =
            serde_json::from_str(r#"[{"product_name":"Cable Clip"}]"#).unwrap();

        assert_eq!(history.len(), 1);
        let idea = history.iter().next().unwrap();
        assert_eq!(idea.product_name, "Cable Clip");
        assert!(idea.description.is_empty());
        assert!(idea.keywords.is_empty());
    }

    #[test]
    fn record_without_name_is_rejected() {
        let result = serde_json::from_str::<IdeaRecord>(r#"{"description":"x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn exclusion_list_is_lowercase_and_unique() {
        let history = log(&["Desk Mat", "desk mat", "Cable Clip", "DESK MAT"]);

        let exclusions = history.exclusion_list(20);

        assert_eq!(exclusions, vec!["desk mat", "cable clip"]);
    }

    #[test]
    fn exclusion_list_prefers_recent_names() {
        let history = log(&["Old", "Middle", "New"]);

        assert_eq!(history.exclusion_list(2), vec!["new", "middle"]);
    }

    #[test]
    fn exclusion_list_is_bounded_regardless_of_log_size() {
        let names: Vec<String> = (0..100).map(|i| format!("Product {i}")).collect();
        let history: HistoryLog = names
            .iter()
            .map(IdeaRecord::named)
            .collect::<Vec<_>>()
            .into();

        let exclusions = history.exclusion_list(20);

        assert_eq!(exclusions.len(), 20);
        let unique: BTreeSet<_> = exclusions.iter().collect();
        assert_eq!(unique.len(), 20);
    }

    #[test]
    fn exclusion_list_skips_blank_names() {
        let history = log(&["", "  ", "Lamp"]);
        assert_eq!(history.exclusion_list(20), vec!["lamp"]);
    }

    #[test]
    fn key_is_independent_of_position() {
        let idea = IdeaRecord::named("Desk Mat");
        assert_eq!(idea.key(), "desk_mat");
    }
}
