//! Configuration commands.

use console::style;

use ocr_aggregate::config::Config;

use crate::cli::icons::warning;

/// Print the effective configuration (file, env overrides, defaults) as TOML.
pub fn cmd_config_show(config: &Config) -> anyhow::Result<()> {
    match &config.source_path {
        Some(path) => eprintln!("# {}", style(path.display()).dim()),
        None => eprintln!("# {}", style("defaults (no config file found)").dim()),
    }
    print!("{}", config.to_toml()?);
    Ok(())
}

pub fn cmd_config_path(config: &Config) -> anyhow::Result<()> {
    match &config.source_path {
        Some(path) => println!("{}", path.display()),
        None => eprintln!("{} No config file found, using defaults", warning()),
    }
    Ok(())
}
