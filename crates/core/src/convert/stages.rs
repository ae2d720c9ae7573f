//! Individual conversion stages.
//!
//! Each stage is a total `&str -> String` function. Stages never fail: input
//! that does not match a stage's pattern comes back unchanged.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::options::{EmbedMode, RefMode, TagMode};
use crate::frontmatter::parser::parse_tag_list;
use crate::frontmatter::{DocMeta, generate_frontmatter, split_frontmatter, tags_line};

/// Label used for block references rewritten as links.
pub const BLOCK_REF_LABEL: &str = "Block Ref";

/// URI prefix for links back into SiYuan.
pub const BLOCK_URI_PREFIX: &str = "siyuan://blocks/";

static HEADING_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    // `## Title {#custom-id}` with a single trailing annotation
    Regex::new(r"(?mR)^(#{1,6})[ \t]+(.+?)[ \t]*\{#[^}\r\n]+\}[ \t]*$").unwrap()
});

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#[\w\x{4E00}-\x{9FFF}-]+").unwrap());

static LEADING_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(#{1,6}\s)(#[\w\x{4E00}-\x{9FFF}-]+)").unwrap()
});

static BLOCK_REF_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\(([0-9A-Za-z-]+)\)\)").unwrap());

static BLOCK_EMBED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\(\(([0-9A-Za-z-]+)\)\)").unwrap());

static EMPTY_COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!--\s*-->").unwrap());

static BLANK_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Strip a leading frontmatter block, if any.
pub fn remove_frontmatter(content: &str) -> String {
    match split_frontmatter(content) {
        Some(split) => split.body.to_string(),
        None => content.to_string(),
    }
}

/// Remove characters in the primary pictograph block (U+1F300..=U+1F9FF).
pub fn strip_emoji(content: &str) -> String {
    content.chars().filter(|c| !('\u{1F300}'..='\u{1F9FF}').contains(c)).collect()
}

/// Drop trailing `{#id}` annotations from heading lines.
pub fn strip_heading_ids(content: &str) -> String {
    HEADING_ID_RE.replace_all(content, "$1 $2").into_owned()
}

/// Apply the tag mode to hashtag tokens.
pub fn convert_tags(content: &str, mode: TagMode) -> String {
    match mode {
        TagMode::Remove => replace_unless_preceded(content, &TAG_RE, is_word_char, |_| {
            String::new()
        }),
        TagMode::Escape => LEADING_TAG_RE.replace_all(content, r"${1}\${2}").into_owned(),
        TagMode::Extract => extract_tags(content),
        TagMode::Keep => content.to_string(),
    }
}

/// Move body tags into the frontmatter `tags` list.
///
/// The frontmatter block itself is never scanned. Existing tags keep their
/// position and new tags are appended without duplicates.
pub fn extract_tags(content: &str) -> String {
    let (inner, body) = match split_frontmatter(content) {
        Some(split) => (Some(split.inner), split.body),
        None => (None, content),
    };

    let found = collect_tags(body);
    if found.is_empty() {
        return content.to_string();
    }
    let stripped = replace_unless_preceded(body, &TAG_RE, is_word_char, |_| String::new());

    match inner {
        Some(inner) => {
            let mut tags = inner
                .lines()
                .find_map(|l| l.strip_prefix("tags:"))
                .and_then(parse_tag_list)
                .unwrap_or_default();
            merge_unique(&mut tags, found);

            let mut replaced = false;
            let mut lines: Vec<String> = inner
                .lines()
                .map(|l| {
                    if !replaced && l.starts_with("tags:") {
                        replaced = true;
                        tags_line(&tags)
                    } else {
                        l.to_string()
                    }
                })
                .collect();
            if !replaced {
                lines.push(tags_line(&tags));
            }
            format!("---\n{}\n---\n{}", lines.join("\n"), stripped)
        }
        None => {
            let mut tags = Vec::new();
            merge_unique(&mut tags, found);
            let meta = DocMeta { tags, ..Default::default() };
            format!("{}{}", generate_frontmatter(&meta), stripped)
        }
    }
}

/// Tag names (without `#`) in document order.
pub fn collect_tags(content: &str) -> Vec<String> {
    TAG_RE
        .find_iter(content)
        .filter(|m| !preceded_by(content, m.start(), is_word_char))
        .map(|m| m.as_str()[1..].to_string())
        .collect()
}

/// Apply the reference mode to `((id))` tokens. Embeds (`!((id))`) are skipped.
pub fn convert_block_refs(content: &str, mode: RefMode) -> String {
    match mode {
        RefMode::Keep => content.to_string(),
        RefMode::Link => {
            replace_unless_preceded(content, &BLOCK_REF_RE, |c| c == '!', |caps| {
                format!("[{BLOCK_REF_LABEL}]({BLOCK_URI_PREFIX}{})", &caps[1])
            })
        }
    }
}

/// Apply the embed mode to `!((id))` tokens.
pub fn convert_block_embeds(content: &str, mode: EmbedMode) -> String {
    match mode {
        EmbedMode::Keep => content.to_string(),
        EmbedMode::Remove => BLOCK_EMBED_RE.replace_all(content, "").into_owned(),
    }
}

/// Remove empty HTML comments and collapse runs of blank lines.
pub fn cleanup_syntax(content: &str) -> String {
    let without_comments = EMPTY_COMMENT_RE.replace_all(content, "");
    BLANK_RUN_RE.replace_all(&without_comments, "\n\n").into_owned()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn preceded_by(text: &str, pos: usize, pred: impl Fn(char) -> bool) -> bool {
    text[..pos].chars().next_back().is_some_and(pred)
}

/// `replace_all` with a negative one-character lookbehind.
fn replace_unless_preceded(
    text: &str,
    re: &Regex,
    skip: impl Fn(char) -> bool,
    rep: impl Fn(&Captures<'_>) -> String,
) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in re.captures_iter(text) {
        let Some(m) = caps.get(0) else { continue };
        if preceded_by(text, m.start(), &skip) {
            continue;
        }
        out.push_str(&text[last..m.start()]);
        out.push_str(&rep(&caps));
        last = m.end();
    }

    out.push_str(&text[last..]);
    out
}

fn merge_unique(into: &mut Vec<String>, extra: Vec<String>) {
    for tag in extra {
        if !into.contains(&tag) {
            into.push(tag);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_id_is_stripped() {
        assert_eq!(strip_heading_ids("## Title {#custom-id}"), "## Title");
        assert_eq!(strip_heading_ids("### No Annotation"), "### No Annotation");
    }

    #[test]
    fn heading_id_keeps_following_lines() {
        let input = "# A {#a}\n\nbody {#not-heading}\n###### Deep   {#d}  \n";
        assert_eq!(strip_heading_ids(input), "# A\n\nbody {#not-heading}\n###### Deep\n");
    }

    #[test]
    fn heading_id_handles_crlf() {
        assert_eq!(strip_heading_ids("## T {#x}\r\nnext"), "## T\r\nnext");
    }

    #[test]
    fn seven_hashes_is_not_a_heading() {
        let input = "####### Seven {#x}";
        assert_eq!(strip_heading_ids(input), input);
    }

    #[test]
    fn escape_only_touches_heading_collision() {
        assert_eq!(convert_tags("# #project update", TagMode::Escape), "# \\#project update");
        assert_eq!(
            convert_tags("See #project for details", TagMode::Escape),
            "See #project for details"
        );
    }

    #[test]
    fn remove_deletes_tokens_literally() {
        assert_eq!(
            convert_tags("Meeting #work #urgent notes", TagMode::Remove),
            "Meeting   notes"
        );
    }

    #[test]
    fn remove_respects_word_boundary() {
        assert_eq!(convert_tags("issue#42 and #42", TagMode::Remove), "issue#42 and ");
        assert_eq!(convert_tags("a #中文标签 b", TagMode::Remove), "a  b");
    }

    #[test]
    fn keep_passes_through() {
        let input = "# #x and #y";
        assert_eq!(convert_tags(input, TagMode::Keep), input);
    }

    #[test]
    fn extract_creates_frontmatter() {
        let out = convert_tags("Notes #alpha and #beta #alpha\n", TagMode::Extract);
        assert_eq!(out, "---\ntags: [alpha, beta]\n---\nNotes  and  \n");
    }

    #[test]
    fn extract_merges_into_existing_block() {
        let input = "---\ntitle: T\ntags: [alpha]\nextra: kept\n---\nBody #beta #alpha\n";
        let out = convert_tags(input, TagMode::Extract);
        assert_eq!(out, "---\ntitle: T\ntags: [alpha, beta]\nextra: kept\n---\nBody  \n");
    }

    #[test]
    fn extract_appends_tags_line_when_missing() {
        let out = convert_tags("---\ntitle: T\n---\n#one\n", TagMode::Extract);
        assert_eq!(out, "---\ntitle: T\ntags: [one]\n---\n\n");
    }

    #[test]
    fn extract_keeps_blank_lines_in_block() {
        let out = convert_tags("---\ntitle: T\n\nnote: x\n---\nBody #a\n", TagMode::Extract);
        assert_eq!(out, "---\ntitle: T\n\nnote: x\ntags: [a]\n---\nBody \n");
    }

    #[test]
    fn extract_fills_empty_block() {
        let out = convert_tags("---\n\n---\nBody #a\n", TagMode::Extract);
        assert_eq!(out, "---\ntags: [a]\n---\nBody \n");
    }

    #[test]
    fn extract_without_tags_is_noop() {
        let input = "---\ntitle: #not-scanned\n---\nplain body";
        assert_eq!(convert_tags(input, TagMode::Extract), input);
    }

    #[test]
    fn refs_become_links() {
        assert_eq!(
            convert_block_refs("See ((20240101120000-abcdefg))", RefMode::Link),
            "See [Block Ref](siyuan://blocks/20240101120000-abcdefg)"
        );
    }

    #[test]
    fn refs_skip_embeds() {
        let input = "!((20240101120000-abcdefg))";
        assert_eq!(convert_block_refs(input, RefMode::Link), input);
    }

    #[test]
    fn embeds_removed_or_kept() {
        let input = "A !((20240101120000-abcdefg)) B";
        assert_eq!(convert_block_embeds(input, EmbedMode::Remove), "A  B");
        assert_eq!(convert_block_embeds(input, EmbedMode::Keep), input);
    }

    #[test]
    fn ref_with_invalid_id_untouched() {
        let input = "((not valid))";
        assert_eq!(convert_block_refs(input, RefMode::Link), input);
    }

    #[test]
    fn emoji_in_block_removed() {
        assert_eq!(strip_emoji("Done 🎉 ✅ 🧪!"), "Done  ✅ !");
    }

    #[test]
    fn cleanup_collapses_runs() {
        assert_eq!(cleanup_syntax("A\n\n\n\nB"), "A\n\nB");
        assert_eq!(cleanup_syntax("A<!-- -->B<!---->C<!-- x -->"), "ABC<!-- x -->");
    }

    #[test]
    fn frontmatter_removal_is_noop_without_block() {
        assert_eq!(remove_frontmatter("no block"), "no block");
        assert_eq!(remove_frontmatter("---\na: b\n---\nrest"), "rest");
    }
}
