//! Local Kramdown to Markdown conversion.

use clap::Args;
use color_eyre::eyre::{Result, WrapErr};
use snmcli_core::convert::{ConvertOptions, EmbedMode, RefMode, TagMode, convert};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

/// Converter switches shared by `convert` and `doc export-md`.
#[derive(Debug, Clone, Args)]
pub struct ConvertFlags {
    /// Tag handling: escape, extract (alias yaml), remove, keep
    #[arg(long, default_value = "escape")]
    pub tag_mode: TagMode,

    /// Block reference handling: keep, link
    #[arg(long, default_value = "keep")]
    pub ref_mode: RefMode,

    /// Block embed handling: keep, remove
    #[arg(long, default_value = "keep")]
    pub embed_mode: EmbedMode,

    /// Keep the leading frontmatter block
    #[arg(long)]
    pub keep_frontmatter: bool,

    /// Remove pictographic emoji
    #[arg(long)]
    pub strip_emoji: bool,
}

impl ConvertFlags {
    pub fn options(&self) -> ConvertOptions {
        ConvertOptions {
            tag_mode: self.tag_mode,
            ref_mode: self.ref_mode,
            embed_mode: self.embed_mode,
            retain_frontmatter: self.keep_frontmatter,
            strip_emoji: self.strip_emoji,
        }
    }
}

#[derive(Debug, Args)]
pub struct ConvertArgs {
    /// Kramdown file to convert (stdin when omitted or `-`)
    pub input: Option<PathBuf>,

    /// Write the result here instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub flags: ConvertFlags,
}

pub fn run(args: &ConvertArgs) -> Result<()> {
    let raw = match args.input.as_deref() {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf).wrap_err("failed to read stdin")?;
            buf
        }
    };

    let markdown = convert(&raw, &args.flags.options());

    match &args.output {
        Some(path) => {
            fs::write(path, &markdown)
                .wrap_err_with(|| format!("failed to write {}", path.display()))?;
            super::output::success(format!("wrote {}", path.display()));
        }
        None => print!("{markdown}"),
    }
    Ok(())
}
