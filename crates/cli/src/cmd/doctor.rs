use color_eyre::eyre::Result;
use snmcli_core::{SiyuanClient, version};
use snmcli_core::config::loader::default_config_path;

use super::context::Context;

pub fn run(ctx: &Context) -> Result<()> {
    let cfg = match ctx.config() {
        Ok(cfg) => cfg,
        Err(e) => {
            println!("FAIL snmcli doctor");
            println!("{e:#}");
            std::process::exit(1);
        }
    };

    println!("snmcli:   {}", version());
    println!(
        "config:   {}",
        cfg.source.as_ref().map_or_else(
            || format!("(none, default location {})", default_config_path().display()),
            |p| p.display().to_string()
        )
    );
    println!("endpoint: {}", cfg.endpoint);
    println!("token:    {}", if cfg.token.is_empty() { "(not set)".to_string() } else { cfg.masked_token() });
    println!("timeout:  {}ms", cfg.timeout_ms);
    println!("format:   {}", cfg.output_format);
    println!("plain:    {}", cfg.plain);

    let client = match SiyuanClient::new(cfg) {
        Ok(client) => client,
        Err(e) => {
            println!("FAIL snmcli doctor");
            println!("{e}");
            std::process::exit(1);
        }
    };

    match client.system_version() {
        Ok(version) => {
            println!("kernel:   {version}");
            println!("OK   snmcli doctor");
            Ok(())
        }
        Err(e) => {
            println!("FAIL snmcli doctor");
            println!("{e}");
            std::process::exit(1);
        }
    }
}
