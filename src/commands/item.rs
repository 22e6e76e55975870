use clap::{Args, Subcommand};
use homepage_core::SectionEditor;

use super::{parse_json, section_key};

#[derive(Args)]
pub struct ItemCommand {
    #[command(subcommand)]
    pub command: ItemSubcommand,
}

#[derive(Subcommand)]
pub enum ItemSubcommand {
    /// Append an item to a list section
    Add {
        /// List section (skills, projects, friendLinks)
        section: String,

        /// Item as JSON
        json: String,
    },

    /// Replace the item at an index
    Update {
        /// List section
        section: String,

        /// Zero-based index
        index: usize,

        /// Item as JSON
        json: String,
    },

    /// Remove the item at an index
    Remove {
        /// List section
        section: String,

        /// Zero-based index
        index: usize,
    },
}

impl ItemCommand {
    pub fn run(&self, editor: &SectionEditor) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ItemSubcommand::Add { section, json } => {
                let key = section_key(section);
                let index = editor.append_item(key, parse_json(json)?)?;
                println!("Added item {} to '{}'", index, key);
            }
            ItemSubcommand::Update {
                section,
                index,
                json,
            } => {
                let key = section_key(section);
                editor.replace_item(key, *index, parse_json(json)?)?;
                println!("Updated item {} in '{}'", index, key);
            }
            ItemSubcommand::Remove { section, index } => {
                let removed = editor.remove_item(section_key(section), *index)?;
                println!("Removed:");
                println!("{}", serde_json::to_string_pretty(&removed)?);
            }
        }
        Ok(())
    }
}
