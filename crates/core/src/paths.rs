//! Helpers for SiYuan document paths.

/// Ensure a document path starts with `/`. An empty path is the root.
pub fn normalize_doc_path(path: &str) -> String {
    let trimmed = path.trim();
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Join a child document name onto a parent path.
///
/// Leading slashes and a trailing `.sy` extension on the child are dropped.
pub fn child_doc_path(parent: &str, child: &str) -> String {
    let child = child.trim().trim_start_matches('/');
    let child = child.strip_suffix(".sy").unwrap_or(child);
    let parent = parent.trim().trim_end_matches('/');
    if parent.is_empty() {
        format!("/{child}")
    } else {
        format!("{}/{child}", normalize_doc_path(parent))
    }
}

/// Make a human-readable path usable as a file name.
pub fn sanitize_path(path: &str) -> String {
    path.chars()
        .map(|c| match c {
            '\u{00A0}' | '\u{3000}' => ' ',
            '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            other => other,
        })
        .collect()
}
