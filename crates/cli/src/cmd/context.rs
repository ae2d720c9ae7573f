//! Per-invocation state shared by command handlers.

use color_eyre::eyre::{Result, WrapErr, eyre};
use snmcli_core::SiyuanClient;
use snmcli_core::config::{Config, ConfigError, OutputFormat, PartialConfig};
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

use super::output::Printer;
use crate::GlobalArgs;

pub struct Context {
    overrides: PartialConfig,
    config_path: Option<PathBuf>,
    config: std::result::Result<Config, ConfigError>,
}

/// A configured API client plus the printer for its results.
pub struct Session {
    pub client: SiyuanClient,
    pub out: Printer,
}

impl Context {
    /// `config` is the result of loading with the same arguments; it is
    /// loaded once per invocation.
    pub fn new(args: &GlobalArgs, config: std::result::Result<Config, ConfigError>) -> Self {
        Self { overrides: args.overrides(), config_path: args.config.clone(), config }
    }

    /// Explicit `--config` path, if one was given.
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Configuration resolved at startup.
    pub fn config(&self) -> Result<&Config> {
        self.config.as_ref().map_err(|e| eyre!("failed to load configuration: {e}"))
    }

    /// Printer for commands that do not talk to the API.
    ///
    /// Falls back to the command-line format when the configuration cannot
    /// be loaded.
    pub fn printer(&self) -> Printer {
        let format = match self.config() {
            Ok(cfg) => cfg.output_format,
            Err(_) => match (self.overrides.output_format, self.overrides.plain) {
                (Some(OutputFormat::Table) | None, Some(true)) => OutputFormat::Json,
                (Some(format), _) => format,
                (None, _) => OutputFormat::Table,
            },
        };
        Printer::new(format)
    }

    /// Load configuration and build an API client.
    pub fn connect(&self) -> Result<Session> {
        let config = self.config()?;
        debug!(endpoint = %config.endpoint, token = %config.masked_token(), "connecting");
        let client = SiyuanClient::new(config)?;
        Ok(Session { client, out: Printer::new(config.output_format) })
    }
}

/// Use `arg` if given, otherwise read all of stdin.
///
/// An interactive terminal on stdin yields an empty string instead of
/// blocking.
pub fn content_or_stdin(arg: Option<String>) -> Result<String> {
    if let Some(content) = arg {
        return Ok(content);
    }
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(String::new());
    }
    let mut buf = String::new();
    stdin.lock().read_to_string(&mut buf).wrap_err("failed to read stdin")?;
    Ok(buf)
}
