/// Normalises a title into a filename-safe identifier.
///
/// The title is lower-cased and spaces and hyphens are replaced with
/// underscores. Path separators are replaced as well so that a slug always
/// names a file directly inside its directory.
#[must_use]
pub fn slugify(title: &str) -> String {
    title
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            ' ' | '-' | '/' | '\\' => '_',
            other => other,
        })
        .collect()
}
