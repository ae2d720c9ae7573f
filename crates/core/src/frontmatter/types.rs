//! Frontmatter types and data structures.

use serde::Serialize;

/// Metadata extracted from a document's frontmatter block.
///
/// Every field is optional; absence means "not present", never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastmod: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl DocMeta {
    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.date.is_none()
            && self.lastmod.is_none()
            && self.id.is_none()
            && self.tags.is_empty()
    }
}

/// Result of splitting frontmatter from a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDocument {
    /// Parsed metadata (empty when the document has no frontmatter).
    pub meta: DocMeta,
    /// Everything after the frontmatter block and its trailing newline.
    pub body: String,
}

/// Raw pieces of a document that starts with a frontmatter block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontmatterSplit<'a> {
    /// Lines between the opening and closing markers.
    pub inner: &'a str,
    /// Remainder of the document after the closing marker line.
    pub body: &'a str,
}
