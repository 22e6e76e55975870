use clap::{Args, Subcommand, ValueEnum};
use std::fmt::Display;

use homepage::config::{Config, ConfigValue};

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl ConfigCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(config)?);
                    }
                    OutputFormat::Text => print_text(config),
                }
                Ok(())
            }
        }
    }
}

fn print_text(config: &Config) {
    println!("Configuration");
    println!("=============\n");

    match &config.config_file {
        Some(path) => println!("Config file: {}", path.display()),
        None => println!(
            "Config file: {} (not found)",
            Config::default_config_path().display()
        ),
    }
    println!();

    print_value("port", &config.port, config.port.value);
    print_value("bind_address", &config.bind_address, &config.bind_address.value);
    print_value(
        "document_path",
        &config.document_path,
        config.document_path.value.display(),
    );
    print_value(
        "backup_dir",
        &config.backup_dir,
        config
            .backup_dir
            .value
            .as_ref()
            .map_or_else(|| "(none)".to_string(), |dir| dir.display().to_string()),
    );
    print_value(
        "static_dir",
        &config.static_dir,
        config.static_dir.value.display(),
    );
    print_value(
        "admin_password",
        &config.admin_password,
        if config.admin_password.value.is_some() {
            "********"
        } else {
            "(none)"
        },
    );
}

fn print_value<T>(name: &str, setting: &ConfigValue<T>, shown: impl Display) {
    println!("{}: {}", name, shown);
    println!("  source: {}", setting.source);
    println!();
}
