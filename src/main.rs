use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

use commands::{open_editor, ConfigCommand, DocumentCommand, ItemCommand, SectionCommand};
use homepage::config::Config;

#[derive(Parser)]
#[command(name = "homepage")]
#[command(version)]
#[command(about = "Edit the homepage config document", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Read or replace whole sections
    Section(SectionCommand),

    /// Edit items in list sections
    Item(ItemCommand),

    /// Show or import the whole document
    Document(DocumentCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config)?;

    match cli.command {
        Some(Commands::Section(cmd)) => cmd.run(&open_editor(&config))?,
        Some(Commands::Item(cmd)) => cmd.run(&open_editor(&config))?,
        Some(Commands::Document(cmd)) => cmd.run(&open_editor(&config))?,
        Some(Commands::Config(cmd)) => cmd.run(&config)?,
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
