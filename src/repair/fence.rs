use std::sync::LazyLock;

use regex::Regex;

/// Matches an opening fence with an optional language tag, or a bare closing
/// fence.
static FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```[A-Za-z0-9_+-]*").expect("fence pattern is valid"));

/// Removes markdown code-fence markers and surrounding whitespace.
///
/// Text without fences is only trimmed.
#[must_use]
pub fn strip_fences(raw: &str) -> String {
    FENCE.replace_all(raw, "").trim().to_string()
}
