//! Frontmatter parsing and generation for exported SiYuan documents.
//!
//! This module provides functionality to:
//! - Detect the `---` delimited block at the head of a document
//! - Parse the known metadata keys (title, date, lastmod, id, tags)
//! - Generate a frontmatter block back from parsed metadata

pub mod parser;
pub mod serializer;
pub mod types;

pub use parser::{parse_frontmatter, split_frontmatter};
pub use serializer::{generate_frontmatter, tags_line};
pub use types::{DocMeta, FrontmatterSplit, ParsedDocument};
