//! SQL query, asset and system commands.

use clap::Subcommand;
use color_eyre::eyre::{Result, WrapErr, bail};
use serde::Serialize;
use serde_json::{Map, Value};
use tabled::Tabled;

use super::context::{Context, content_or_stdin};

#[derive(Debug, Subcommand)]
pub enum AssetCommand {
    /// List asset files stored in a notebook
    Ls { notebook: String },
}

#[derive(Debug, Subcommand)]
pub enum SystemCommand {
    /// Show kernel version and endpoint
    Info,
}

#[derive(Tabled, Serialize)]
struct AssetRow {
    #[tabled(rename = "Path")]
    path: String,
}

pub fn sql(ctx: &Context, stmt: Option<String>) -> Result<()> {
    let stmt = content_or_stdin(stmt)?;
    if stmt.trim().is_empty() {
        bail!("no SQL statement given");
    }
    let session = ctx.connect()?;
    let rows = session.client.sql_query(stmt.trim()).wrap_err("query failed")?;
    session.out.records(&rows)
}

pub fn asset(ctx: &Context, command: AssetCommand) -> Result<()> {
    let session = ctx.connect()?;
    match command {
        AssetCommand::Ls { notebook } => {
            let assets = session.client.list_assets(&notebook).wrap_err("failed to list assets")?;
            let rows: Vec<AssetRow> = assets.into_iter().map(|path| AssetRow { path }).collect();
            session.out.rows(&rows)
        }
    }
}

pub fn system(ctx: &Context, command: SystemCommand) -> Result<()> {
    let session = ctx.connect()?;
    match command {
        SystemCommand::Info => {
            let version =
                session.client.system_version().wrap_err("failed to read system version")?;
            let mut info = Map::new();
            info.insert("version".into(), Value::String(version));
            info.insert("endpoint".into(), Value::String(session.client.base_url().to_string()));
            session.out.object(&info)
        }
    }
}
