//! Block commands.

use clap::{Subcommand, ValueEnum};
use color_eyre::eyre::{Result, WrapErr, bail};
use serde::Serialize;
use serde_json::{Map, Value};
use snmcli_core::api::{
    Backlink, Block, BlockAnchor, DataType, InsertBlockRequest, UpdateBlockRequest,
};
use snmcli_core::config::OutputFormat;
use std::collections::BTreeMap;
use tabled::Tabled;

use super::context::{Context, content_or_stdin};
use super::output::{MAX_CELL_WIDTH, print_json, success, truncate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DataTypeArg {
    Markdown,
    Dom,
}

impl From<DataTypeArg> for DataType {
    fn from(value: DataTypeArg) -> Self {
        match value {
            DataTypeArg::Markdown => DataType::Markdown,
            DataTypeArg::Dom => DataType::Dom,
        }
    }
}

/// Where `insert` places the new block relative to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InsertPosition {
    Before,
    After,
    /// As the last child of the target
    Under,
}

/// Where `move` places the block relative to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MovePosition {
    After,
    Under,
}

#[derive(Debug, Subcommand)]
pub enum BlockCommand {
    /// Show a block's Kramdown source
    Get { id: String },
    /// Replace a block's content (from stdin when omitted)
    Update {
        id: String,
        data: Option<String>,
        #[arg(long, value_enum, default_value = "markdown")]
        data_type: DataTypeArg,
    },
    /// Delete a block
    Delete { id: String },
    /// Insert a block next to or under a target block
    Insert {
        #[arg(value_enum)]
        position: InsertPosition,
        target_id: String,
        data: Option<String>,
        #[arg(long, value_enum, default_value = "markdown")]
        data_type: DataTypeArg,
    },
    /// Insert a block as the first child of a parent
    Prepend {
        parent_id: String,
        data: Option<String>,
        #[arg(long, value_enum, default_value = "markdown")]
        data_type: DataTypeArg,
    },
    /// Append a block as the last child of a parent
    Append {
        parent_id: String,
        data: Option<String>,
        #[arg(long, value_enum, default_value = "markdown")]
        data_type: DataTypeArg,
    },
    /// Move a block after a sibling or under a parent
    Move {
        id: String,
        #[arg(value_enum)]
        position: MovePosition,
        target_id: String,
    },
    /// List a block's children
    Children { id: String },
    /// Fold a block
    Fold { id: String },
    /// Unfold a block
    Unfold { id: String },
    /// Show all attributes, one attribute, or set one attribute
    Attrs { id: String, key: Option<String>, value: Option<String> },
    /// List backlinks to a block or document
    Backlink { id: String },
    /// Point references at another definition block
    TransferRef {
        from_id: String,
        to_id: String,
        /// Only these referencing blocks (all when omitted)
        ref_ids: Vec<String>,
    },
}

#[derive(Tabled, Serialize)]
struct BlockRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Type")]
    block_type: String,
    #[tabled(rename = "Content")]
    content: String,
}

impl From<Block> for BlockRow {
    fn from(block: Block) -> Self {
        let content = block.content.unwrap_or_default().replace('\n', " ");
        Self { id: block.id, block_type: block.block_type, content: truncate(&content, MAX_CELL_WIDTH) }
    }
}

#[derive(Tabled, Serialize)]
struct BacklinkRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Path")]
    path: String,
    #[tabled(rename = "Content")]
    content: String,
}

impl From<Backlink> for BacklinkRow {
    fn from(link: Backlink) -> Self {
        let content = link.content.replace('\n', " ");
        Self { id: link.id, path: link.path, content: truncate(&content, MAX_CELL_WIDTH) }
    }
}

pub fn run(ctx: &Context, command: BlockCommand) -> Result<()> {
    let session = ctx.connect()?;
    let client = &session.client;
    let out = session.out;

    match command {
        BlockCommand::Get { id } => {
            let block = client.block_kramdown(&id).wrap_err("failed to read block")?;
            if out.format() == OutputFormat::Json {
                print_json(&block)?;
            } else {
                println!("{}", block.kramdown);
            }
        }
        BlockCommand::Update { id, data, data_type } => {
            let data = required_content(data)?;
            client
                .update_block(&UpdateBlockRequest { id: id.clone(), data_type: data_type.into(), data })
                .wrap_err("failed to update block")?;
            success(format!("updated block {id}"));
        }
        BlockCommand::Delete { id } => {
            client.delete_block(&id).wrap_err("failed to delete block")?;
            success(format!("deleted block {id}"));
        }
        BlockCommand::Insert { position, target_id, data, data_type } => {
            let data = required_content(data)?;
            let anchor = match position {
                InsertPosition::Before => BlockAnchor::Before(target_id.clone()),
                InsertPosition::After => BlockAnchor::After(target_id.clone()),
                InsertPosition::Under => BlockAnchor::Under(target_id.clone()),
            };
            client
                .insert_block(&InsertBlockRequest::new(data_type.into(), data, anchor))
                .wrap_err("failed to insert block")?;
            success(format!("inserted block relative to {target_id}"));
        }
        BlockCommand::Prepend { parent_id, data, data_type } => {
            let data = required_content(data)?;
            client
                .prepend_block(&parent_id, data_type.into(), &data)
                .wrap_err("failed to prepend block")?;
            success(format!("prepended block to {parent_id}"));
        }
        BlockCommand::Append { parent_id, data, data_type } => {
            let data = required_content(data)?;
            client
                .append_block(&parent_id, data_type.into(), &data)
                .wrap_err("failed to append block")?;
            success(format!("appended block to {parent_id}"));
        }
        BlockCommand::Move { id, position, target_id } => {
            let (previous, parent) = match position {
                MovePosition::After => (Some(target_id.as_str()), None),
                MovePosition::Under => (None, Some(target_id.as_str())),
            };
            client.move_block(&id, previous, parent).wrap_err("failed to move block")?;
            success(format!("moved block {id}"));
        }
        BlockCommand::Children { id } => {
            let children = client.child_blocks(&id).wrap_err("failed to list children")?;
            let rows: Vec<BlockRow> = children.into_iter().map(Into::into).collect();
            out.rows(&rows)?;
        }
        BlockCommand::Fold { id } => {
            client.fold_block(&id).wrap_err("failed to fold block")?;
            success(format!("folded block {id}"));
        }
        BlockCommand::Unfold { id } => {
            client.unfold_block(&id).wrap_err("failed to unfold block")?;
            success(format!("unfolded block {id}"));
        }
        BlockCommand::Attrs { id, key, value } => match (key, value) {
            (Some(key), Some(value)) => {
                let attrs = BTreeMap::from([(key.clone(), value)]);
                client.set_block_attrs(&id, &attrs).wrap_err("failed to set attribute")?;
                success(format!("set {key} on block {id}"));
            }
            (Some(key), None) => {
                let attrs = client.block_attrs(&id).wrap_err("failed to read attributes")?;
                match attrs.get(&key) {
                    Some(value) => out.scalar(value)?,
                    None => bail!("block {id} has no attribute '{key}'"),
                }
            }
            (None, _) => {
                let attrs = client.block_attrs(&id).wrap_err("failed to read attributes")?;
                let map: Map<String, Value> =
                    attrs.into_iter().map(|(k, v)| (k, Value::String(v))).collect();
                out.object(&map)?;
            }
        },
        BlockCommand::Backlink { id } => {
            let links = client.backlinks(&id).wrap_err("failed to list backlinks")?;
            let rows: Vec<BacklinkRow> = links.backlinks.into_iter().map(Into::into).collect();
            out.rows(&rows)?;
        }
        BlockCommand::TransferRef { from_id, to_id, ref_ids } => {
            client
                .transfer_block_ref(&from_id, &to_id, &ref_ids)
                .wrap_err("failed to transfer references")?;
            success(format!("moved references from {from_id} to {to_id}"));
        }
    }
    Ok(())
}

fn required_content(arg: Option<String>) -> Result<String> {
    let content = content_or_stdin(arg)?;
    if content.trim().is_empty() {
        bail!("no block content given (pass it as an argument or on stdin)");
    }
    Ok(content)
}
