//! Document commands.

use clap::Subcommand;
use color_eyre::eyre::{Result, WrapErr};
use snmcli_core::api::{CreateDocRequest, MoveDocsByIdRequest, MoveDocsRequest};
use snmcli_core::config::OutputFormat;
use snmcli_core::convert::convert;
use snmcli_core::paths::{normalize_doc_path, sanitize_path};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::context::{Context, content_or_stdin};
use super::convert::ConvertFlags;
use super::output::{print_json, success};

#[derive(Debug, Subcommand)]
pub enum DocCommand {
    /// Create a document from Markdown (content from stdin when omitted)
    Create {
        notebook: String,
        /// Human-readable path, e.g. /Projects/Plan
        path: String,
        markdown: Option<String>,
    },
    /// Delete a document by path
    Delete { notebook: String, path: String },
    /// Delete a document by ID
    DeleteId { id: String },
    /// Rename a document addressed by its human-readable path
    Rename { notebook: String, path: String, title: String },
    /// Rename a document by ID
    RenameId { id: String, title: String },
    /// Move documents (by storage path) into another notebook or folder
    Move {
        to_notebook: String,
        to_path: String,
        #[arg(required = true)]
        from_paths: Vec<String>,
    },
    /// Move documents by ID under another document or notebook
    MoveId {
        /// Target parent document or notebook ID
        #[arg(long)]
        to: String,
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Export a document as SiYuan Markdown
    Export {
        id: String,
        /// Output file or directory (`-` for stdout)
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Export a document converted to standard Markdown
    ExportMd {
        id: String,
        /// Output file or directory (`-` for stdout)
        #[arg(long)]
        file: Option<PathBuf>,
        #[command(flatten)]
        flags: ConvertFlags,
    },
    /// Show a document's human-readable path
    Path { id: String },
    /// Show a document's content
    Get { id: String },
    /// Create a child document below a parent path
    Insert {
        notebook: String,
        parent_path: String,
        path: String,
        markdown: Option<String>,
    },
}

pub fn run(ctx: &Context, command: DocCommand) -> Result<()> {
    let session = ctx.connect()?;
    let client = &session.client;

    match command {
        DocCommand::Create { notebook, path, markdown } => {
            let markdown = content_or_stdin(markdown)?;
            let path = normalize_doc_path(&path);
            let id = client
                .create_doc(&CreateDocRequest {
                    notebook,
                    path: path.clone(),
                    markdown,
                    parent_id: None,
                })
                .wrap_err("failed to create document")?;
            success(format!("created document {path} ({id})"));
        }
        DocCommand::Delete { notebook, path } => {
            let path = normalize_doc_path(&path);
            client.remove_doc(&notebook, &path).wrap_err("failed to delete document")?;
            success(format!("deleted document {path}"));
        }
        DocCommand::DeleteId { id } => {
            client.remove_doc_by_id(&id).wrap_err("failed to delete document")?;
            success(format!("deleted document {id}"));
        }
        DocCommand::Rename { notebook, path, title } => {
            let path = normalize_doc_path(&path);
            client.rename_doc(&notebook, &path, &title).wrap_err("failed to rename document")?;
            success(format!("renamed {path} to {title}"));
        }
        DocCommand::RenameId { id, title } => {
            client.rename_doc_by_id(&id, &title).wrap_err("failed to rename document")?;
            success(format!("renamed {id} to {title}"));
        }
        DocCommand::Move { to_notebook, to_path, from_paths } => {
            let request = MoveDocsRequest {
                from_paths: from_paths.iter().map(|p| normalize_doc_path(p)).collect(),
                to_notebook,
                to_path: normalize_doc_path(&to_path),
            };
            client.move_docs(&request).wrap_err("failed to move documents")?;
            success(format!("moved {} document(s) to {}", request.from_paths.len(), request.to_path));
        }
        DocCommand::MoveId { to, ids } => {
            let count = ids.len();
            client
                .move_docs_by_id(&MoveDocsByIdRequest { from_ids: ids, to_id: to.clone() })
                .wrap_err("failed to move documents")?;
            success(format!("moved {count} document(s) under {to}"));
        }
        DocCommand::Export { id, file } => {
            let export = client.export_md_content(&id).wrap_err("failed to export document")?;
            let name_hint = export.h_path.as_deref().unwrap_or(&id);
            write_or_print(&export.content, file.as_deref(), name_hint)?;
        }
        DocCommand::ExportMd { id, file, flags } => {
            let export = client.export_md_content(&id).wrap_err("failed to export document")?;
            let markdown = convert(&export.content, &flags.options());
            let name_hint = export.h_path.as_deref().unwrap_or(&id);
            write_or_print(&markdown, file.as_deref(), name_hint)?;
        }
        DocCommand::Path { id } => {
            let hpath = client.hpath_by_id(&id).wrap_err("failed to resolve document path")?;
            session.out.scalar(&hpath)?;
        }
        DocCommand::Get { id } => {
            let doc = client.get_doc(&id).wrap_err("failed to read document")?;
            if session.out.format() == OutputFormat::Json {
                print_json(&doc)?;
            } else {
                println!("{}", doc.content);
            }
        }
        DocCommand::Insert { notebook, parent_path, path, markdown } => {
            let markdown = content_or_stdin(markdown)?;
            let (id, full_path) = client
                .insert_child_doc(&notebook, &parent_path, &path, &markdown)
                .wrap_err("failed to insert document")?;
            success(format!("inserted document {full_path} ({id})"));
        }
    }
    Ok(())
}

/// Write `content` to `target`, or stdout when no target (or `-`) is given.
///
/// A directory target gets a file named after the document's path.
fn write_or_print(content: &str, target: Option<&Path>, name_hint: &str) -> Result<()> {
    let Some(target) = target.filter(|t| t.as_os_str() != "-") else {
        println!("{content}");
        return Ok(());
    };

    let path = if target.is_dir() { target.join(export_file_name(name_hint)) } else { target.to_path_buf() };
    debug!(path = %path.display(), "writing export");
    fs::write(&path, content).wrap_err_with(|| format!("failed to write {}", path.display()))?;
    success(format!("exported to {}", path.display()));
    Ok(())
}

/// File name for a document exported into a directory.
fn export_file_name(hpath: &str) -> String {
    let name = sanitize_path(hpath.trim_matches('/'));
    if name.is_empty() { "untitled.md".to_string() } else { format!("{name}.md") }
}
