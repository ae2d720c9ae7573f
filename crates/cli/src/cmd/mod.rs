pub mod block;
pub mod config;
pub mod context;
pub mod convert;
pub mod doc;
pub mod doctor;
pub mod notebook;
pub mod output;
pub mod query;

use color_eyre::eyre::Result;
use snmcli_core::config::{Config, ConfigError};

use crate::{Cli, Commands, completions};
use context::Context;

/// Dispatch a parsed command line with the configuration loaded for it.
pub fn run(cli: Cli, loaded: std::result::Result<Config, ConfigError>) -> Result<()> {
    let ctx = Context::new(&cli.global, loaded);

    match cli.command {
        Commands::Notebook(command) => notebook::run(&ctx, command),
        Commands::Doc(command) => doc::run(&ctx, command),
        Commands::Block(command) => block::run(&ctx, command),
        Commands::Query { sql } => query::sql(&ctx, sql),
        Commands::Asset(command) => query::asset(&ctx, command),
        Commands::System(command) => query::system(&ctx, command),
        Commands::Config(command) => config::run(&ctx, command),
        Commands::Convert(args) => convert::run(&args),
        Commands::Doctor => doctor::run(&ctx),
        Commands::Completions { shell } => {
            completions::print(shell);
            Ok(())
        }
    }
}
