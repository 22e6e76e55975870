use clap::{Args, Subcommand};
use homepage_core::SectionEditor;
use std::io::{self, Write};

use super::{parse_json, section_key};

#[derive(Args)]
pub struct SectionCommand {
    #[command(subcommand)]
    pub command: SectionSubcommand,
}

#[derive(Subcommand)]
pub enum SectionSubcommand {
    /// Print a section as JSON
    Get {
        /// Section name (e.g. profile, skills, friendLinks)
        name: String,
    },

    /// Replace a section with a JSON value
    Set {
        /// Section name
        name: String,

        /// New value as JSON
        json: String,
    },
}

impl SectionCommand {
    pub fn run(&self, editor: &SectionEditor) -> Result<(), Box<dyn std::error::Error>> {
        self.run_to(editor, &mut io::stdout().lock())
    }

    fn run_to(
        &self,
        editor: &SectionEditor,
        out: &mut impl Write,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            SectionSubcommand::Get { name } => {
                // Absent sections print as `null`.
                let value = editor.get_section(section_key(name))?.unwrap_or_default();
                writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
            }
            SectionSubcommand::Set { name, json } => {
                let key = section_key(name);
                editor.replace_section(key, parse_json(json)?)?;
                writeln!(out, "Updated section '{}'", key)?;
            }
        }
        Ok(())
    }
}
