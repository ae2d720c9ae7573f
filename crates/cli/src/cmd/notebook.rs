//! Notebook commands.

use clap::Subcommand;
use color_eyre::eyre::{Result, WrapErr};
use serde::Serialize;
use serde_json::Value;
use snmcli_core::api::Notebook;
use tabled::Tabled;

use super::context::Context;
use super::output::success;

#[derive(Debug, Subcommand)]
pub enum NotebookCommand {
    /// List all notebooks
    List,
    /// Create a notebook
    Create { name: String },
    /// Delete a notebook
    Delete { id: String },
    /// Rename a notebook
    Rename { id: String, name: String },
    /// Open a notebook
    Open { id: String },
    /// Close a notebook
    Close { id: String },
    /// Show a notebook's configuration
    Get { id: String },
}

/// Row for the notebook list table.
#[derive(Tabled, Serialize)]
struct NotebookRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Icon")]
    icon: String,
    #[tabled(rename = "Sort")]
    sort: i64,
    #[tabled(rename = "Closed")]
    closed: bool,
}

impl From<Notebook> for NotebookRow {
    fn from(nb: Notebook) -> Self {
        Self { id: nb.id, name: nb.name, icon: nb.icon, sort: nb.sort, closed: nb.closed }
    }
}

pub fn run(ctx: &Context, command: NotebookCommand) -> Result<()> {
    let session = ctx.connect()?;
    let client = &session.client;

    match command {
        NotebookCommand::List => {
            let notebooks = client.list_notebooks().wrap_err("failed to list notebooks")?;
            let rows: Vec<NotebookRow> = notebooks.into_iter().map(Into::into).collect();
            session.out.rows(&rows)
        }
        NotebookCommand::Create { name } => {
            let nb = client.create_notebook(&name).wrap_err("failed to create notebook")?;
            success(format!("created notebook {} ({})", nb.name, nb.id));
            Ok(())
        }
        NotebookCommand::Delete { id } => {
            client.remove_notebook(&id).wrap_err("failed to delete notebook")?;
            success(format!("deleted notebook {id}"));
            Ok(())
        }
        NotebookCommand::Rename { id, name } => {
            client.rename_notebook(&id, &name).wrap_err("failed to rename notebook")?;
            success(format!("renamed notebook {id} to {name}"));
            Ok(())
        }
        NotebookCommand::Open { id } => {
            client.open_notebook(&id).wrap_err("failed to open notebook")?;
            success(format!("opened notebook {id}"));
            Ok(())
        }
        NotebookCommand::Close { id } => {
            client.close_notebook(&id).wrap_err("failed to close notebook")?;
            success(format!("closed notebook {id}"));
            Ok(())
        }
        NotebookCommand::Get { id } => {
            let conf = client.notebook_conf(&id).wrap_err("failed to read notebook config")?;
            match conf {
                Value::Object(map) => session.out.object(&map),
                other => super::output::print_json(&other),
            }
        }
    }
}
