//! Config commands for showing effective configuration.

use clap::{Args, Subcommand};

use crate::config::Config;

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: Option<ConfigSubcommand>,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show effective configuration and where each value came from
    Show,
    /// Print the default config file path
    Path,
}

impl ConfigCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match self.command.as_ref().unwrap_or(&ConfigSubcommand::Show) {
            ConfigSubcommand::Show => show(config),
            ConfigSubcommand::Path => {
                println!("{}", Config::default_config_path().display());
                Ok(())
            }
        }
    }
}

fn show(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    println!("Configuration");
    println!("=============");
    println!(
        "  server_url: {} ({})",
        config.server_url.value, config.server_url.source
    );
    println!(
        "  page_size:  {} ({})",
        config.page_size.value, config.page_size.source
    );
    match &config.api_key {
        Some(_) => println!("  api_key:    (set)"),
        None => println!("  api_key:    (not set)"),
    }
    match &config.config_file {
        Some(path) => println!("  file:       {}", path.display()),
        None => println!("  file:       none"),
    }
    Ok(())
}
