mod cmd;
mod completions;
mod logging;

use clap::{Args, Parser, Subcommand, ValueEnum};
use snmcli_core::config::{ConfigLoader, LoggingConfig, OutputFormat, PartialConfig};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "snmcli", version, about = "Command-line client for the SiYuan note-taking API")]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Connection and output options shared by every command.
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// SiYuan API endpoint (default: http://127.0.0.1:6806)
    #[arg(short, long, global = true)]
    pub endpoint: Option<String>,

    /// API token (Settings > About in SiYuan)
    #[arg(short, long, global = true)]
    pub token: Option<String>,

    /// Request timeout in milliseconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub format: Option<FormatArg>,

    /// Plain output without table borders (table becomes JSON)
    #[arg(short, long, global = true)]
    pub plain: bool,

    /// Path to a config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl GlobalArgs {
    /// The command-line layer of the configuration.
    pub fn overrides(&self) -> PartialConfig {
        PartialConfig {
            endpoint: self.endpoint.clone(),
            token: self.token.clone(),
            timeout_ms: self.timeout,
            output_format: self.format.map(Into::into),
            plain: self.plain.then_some(true),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Table,
    Json,
    #[value(alias = "md")]
    Markdown,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Table => OutputFormat::Table,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Markdown => OutputFormat::Markdown,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage notebooks
    #[command(subcommand)]
    Notebook(cmd::notebook::NotebookCommand),

    /// Manage documents
    #[command(subcommand)]
    Doc(cmd::doc::DocCommand),

    /// Manage blocks
    #[command(subcommand)]
    Block(cmd::block::BlockCommand),

    /// Run a SQL query against the block database
    Query {
        /// SQL statement (read from stdin when omitted)
        sql: Option<String>,
    },

    /// Manage assets
    #[command(subcommand)]
    Asset(cmd::query::AssetCommand),

    /// System information
    #[command(subcommand)]
    System(cmd::query::SystemCommand),

    /// Show or edit the config file
    #[command(subcommand)]
    Config(cmd::config::ConfigCommand),

    /// Convert a Kramdown export to standard Markdown (no network)
    Convert(cmd::convert::ConvertArgs),

    /// Print the resolved configuration and check the API connection
    Doctor,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() {
    if let Err(e) = color_eyre::install() {
        eprintln!("Failed to install error reporter: {e}");
    }

    let cli = Cli::parse();

    let loaded = ConfigLoader::load(&cli.global.overrides(), cli.global.config.as_deref());
    let logging_cfg =
        loaded.as_ref().map_or_else(|_| LoggingConfig::default(), |c| c.logging.clone());
    logging::init(&logging_cfg, cli.global.verbose);
    if let Err(e) = &loaded {
        tracing::debug!(error = %e, "configuration not loaded, using default logging");
    }

    if let Err(e) = cmd::run(cli, loaded) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
