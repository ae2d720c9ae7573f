//! Frontmatter detection and parsing.

use std::sync::LazyLock;

use regex::Regex;

use super::types::{DocMeta, FrontmatterSplit, ParsedDocument};

/// Opening `---` line, arbitrary interior, closing `---` line and its newline.
///
/// The closing marker must be preceded by a newline, so an empty block needs
/// a blank interior line (`---\n\n---\n`).
static FRONTMATTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\A---\n(.*?)\n---\n").unwrap());

/// Split a document into its frontmatter interior and body.
///
/// Returns `None` when the text does not start with a complete block.
pub fn split_frontmatter(content: &str) -> Option<FrontmatterSplit<'_>> {
    let caps = FRONTMATTER_RE.captures(content)?;
    let whole = caps.get(0)?;
    let inner = caps.get(1).map_or("", |m| m.as_str());
    Some(FrontmatterSplit { inner, body: &content[whole.end()..] })
}

/// Parse the frontmatter block at the head of `content`.
///
/// Known keys are matched by line prefix, first match wins:
/// ```markdown
/// ---
/// title: Weekly review
/// date: 2024-01-15T10:00:00+08:00
/// tags: [work, "review"]
/// ---
/// # Body
/// ```
/// Unknown keys are ignored and a malformed `tags` value is omitted.
pub fn parse_frontmatter(content: &str) -> ParsedDocument {
    let Some(split) = split_frontmatter(content) else {
        return ParsedDocument { meta: DocMeta::default(), body: content.to_string() };
    };

    let mut meta = DocMeta::default();
    let mut tags_seen = false;

    for line in split.inner.lines() {
        if let Some(rest) = line.strip_prefix("title:") {
            set_scalar(&mut meta.title, rest);
        } else if let Some(rest) = line.strip_prefix("date:") {
            set_scalar(&mut meta.date, rest);
        } else if let Some(rest) = line.strip_prefix("lastmod:") {
            set_scalar(&mut meta.lastmod, rest);
        } else if let Some(rest) = line.strip_prefix("id:") {
            set_scalar(&mut meta.id, rest);
        } else if let Some(rest) = line.strip_prefix("tags:")
            && !tags_seen
        {
            tags_seen = true;
            if let Some(tags) = parse_tag_list(rest) {
                meta.tags = tags;
            }
        }
    }

    ParsedDocument { meta, body: split.body.to_string() }
}

fn set_scalar(slot: &mut Option<String>, raw: &str) {
    if slot.is_some() {
        return;
    }
    let value = raw.trim();
    if !value.is_empty() {
        *slot = Some(value.to_string());
    }
}

/// Parse `[a, "b", 'c']` into its entries.
pub(crate) fn parse_tag_list(raw: &str) -> Option<Vec<String>> {
    let inner = raw.trim().strip_prefix('[')?;
    let end = inner.find(']')?;
    let inner = &inner[..end];
    if inner.is_empty() {
        return None;
    }
    Some(inner.split(',').map(|t| unquote(t.trim()).to_string()).collect())
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
        .unwrap_or(value)
}
