//! Kramdown to standard Markdown conversion.
//!
//! SiYuan exports documents in its Kramdown dialect: headings carry `{#id}`
//! annotations, `#tag` tokens sit in the text, and blocks link to each other
//! through `((id))` references and `!((id))` embeds. [`convert`] runs a fixed
//! sequence of string stages that rewrite those constructs into portable
//! Markdown. Nothing is parsed into a tree; malformed input passes through.

pub mod options;
pub mod stages;

pub use options::{ConvertOptions, EmbedMode, ModeParseError, RefMode, TagMode};
pub use stages::{BLOCK_REF_LABEL, BLOCK_URI_PREFIX};

use tracing::debug;

/// Convert Kramdown text to standard Markdown.
///
/// Stage order: frontmatter removal, emoji, heading IDs, tags, embeds,
/// references, cleanup. Embeds run before references so `!((id))` is always
/// handled by the more specific stage.
pub fn convert(raw: &str, options: &ConvertOptions) -> String {
    debug!(
        tag_mode = %options.tag_mode,
        ref_mode = %options.ref_mode,
        embed_mode = %options.embed_mode,
        retain_frontmatter = options.retain_frontmatter,
        strip_emoji = options.strip_emoji,
        input_len = raw.len(),
        "converting kramdown"
    );

    let mut text = if options.retain_frontmatter {
        raw.to_string()
    } else {
        stages::remove_frontmatter(raw)
    };

    if options.strip_emoji {
        text = stages::strip_emoji(&text);
    }

    text = stages::strip_heading_ids(&text);
    text = stages::convert_tags(&text, options.tag_mode);
    text = stages::convert_block_embeds(&text, options.embed_mode);
    text = stages::convert_block_refs(&text, options.ref_mode);
    stages::cleanup_syntax(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> ConvertOptions {
        ConvertOptions::default()
    }

    #[test]
    fn empty_input() {
        assert_eq!(convert("", &opts()), "");
    }

    #[test]
    fn strips_frontmatter_by_default() {
        let input = "---\ntitle: T\n---\n# Body {#b}\n";
        assert_eq!(convert(input, &opts()), "# Body\n");
    }

    #[test]
    fn retains_frontmatter_when_asked() {
        let input = "---\ntitle: T\n---\n# Body\n";
        let options = ConvertOptions { retain_frontmatter: true, ..opts() };
        assert_eq!(convert(input, &options), input);
    }

    #[test]
    fn embed_removed_before_link_conversion() {
        let options = ConvertOptions {
            ref_mode: RefMode::Link,
            embed_mode: EmbedMode::Remove,
            ..opts()
        };
        let out = convert("A !((20240101120000-abcdefg)) B ((20240101120000-hijklmn))", &options);
        assert_eq!(out, "A  B [Block Ref](siyuan://blocks/20240101120000-hijklmn)");
    }

    #[test]
    fn kept_embed_survives_link_conversion() {
        let options = ConvertOptions { ref_mode: RefMode::Link, ..opts() };
        let input = "!((20240101120000-abcdefg))";
        assert_eq!(convert(input, &options), input);
    }

    #[test]
    fn emoji_only_when_enabled() {
        assert_eq!(convert("hi 🚀", &opts()), "hi 🚀");
        let options = ConvertOptions { strip_emoji: true, ..opts() };
        assert_eq!(convert("hi 🚀", &options), "hi ");
    }
}
