//! `config` subcommands: inspect and edit the config file.

use clap::Subcommand;
use color_eyre::eyre::{Result, WrapErr, eyre};
use serde_json::Value;
use snmcli_core::config::loader::{default_config_path, locate_config_file};
use snmcli_core::config::store::{self, InitOutcome};
use snmcli_core::config::types::mask_token;
use std::path::PathBuf;

use super::context::Context;
use super::output::{info, success};

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the config file contents (token masked)
    Get,
    /// Set a key in the config file
    Set {
        /// endpoint, token, timeout, output_format or plain
        key: String,
        value: String,
    },
    /// Create a config file with default values
    Init,
    /// Show which config file is in use
    Path,
}

pub fn run(ctx: &Context, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Get => get(ctx),
        ConfigCommand::Set { key, value } => {
            let path = existing_file(ctx)?
                .ok_or_else(|| eyre!("no config file found; run `snmcli config init` first"))?;
            store::set_value(&path, &key, &value)
                .wrap_err_with(|| format!("failed to update {}", path.display()))?;
            let shown = if key == "token" { mask_token(&value) } else { value };
            success(format!("set {key} = {shown} in {}", path.display()));
            Ok(())
        }
        ConfigCommand::Init => {
            let path = ctx.config_path().map_or_else(default_config_path, PathBuf::from);
            match store::init(&path)? {
                InitOutcome::Created(path) => {
                    success(format!("created config file {}", path.display()));
                    info("Set your API token with:");
                    info("  snmcli config set token YOUR_TOKEN");
                    info("or pass it per command with --token.");
                }
                InitOutcome::AlreadyExists(path) => {
                    info(format!("config file already exists at {}", path.display()));
                    info("Use `snmcli config get` to show it.");
                }
            }
            Ok(())
        }
        ConfigCommand::Path => {
            match existing_file(ctx)? {
                Some(path) => println!("{}", path.display()),
                None => {
                    info("No config file found. Run `snmcli config init` to create one.");
                    info(format!("default location: {}", default_config_path().display()));
                }
            }
            Ok(())
        }
    }
}

fn get(ctx: &Context) -> Result<()> {
    let out = ctx.printer();
    let Some(path) = existing_file(ctx)? else {
        info("No config file found. Run `snmcli config init` to create one.");
        return Ok(());
    };

    let mut doc = store::read_document(&path)?;
    if let Some(Value::String(token)) = doc.get_mut("token") {
        *token = mask_token(token);
    }
    match doc {
        Value::Object(map) => out.object(&map),
        other => super::output::print_json(&other),
    }
}

fn existing_file(ctx: &Context) -> Result<Option<PathBuf>> {
    Ok(locate_config_file(ctx.config_path())?)
}
