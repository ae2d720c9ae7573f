//! Frontmatter generation from parsed metadata.

use super::types::DocMeta;

/// Assemble metadata into a delimited frontmatter block.
///
/// Scalars are emitted in fixed order (title, date, lastmod), followed by a
/// `tags: [...]` line when tags are present. Empty scalars are skipped. The
/// result ends with the closing marker and a newline, so it can be prepended
/// directly to a body.
pub fn generate_frontmatter(meta: &DocMeta) -> String {
    let mut lines: Vec<String> = vec!["---".to_string()];

    if let Some(title) = non_empty(&meta.title) {
        lines.push(format!("title: {title}"));
    }
    if let Some(date) = non_empty(&meta.date) {
        lines.push(format!("date: {date}"));
    }
    if let Some(lastmod) = non_empty(&meta.lastmod) {
        lines.push(format!("lastmod: {lastmod}"));
    }
    if !meta.tags.is_empty() {
        lines.push(tags_line(&meta.tags));
    }

    lines.push("---".to_string());
    lines.push(String::new());
    lines.join("\n")
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Render a `tags: [a, b, c]` line.
pub fn tags_line(tags: &[String]) -> String {
    format!("tags: [{}]", tags.join(", "))
}
