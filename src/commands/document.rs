use clap::{Args, Subcommand};
use homepage_core::SectionEditor;
use serde_json::Value;
use std::path::PathBuf;

#[derive(Args)]
pub struct DocumentCommand {
    #[command(subcommand)]
    pub command: DocumentSubcommand,
}

#[derive(Subcommand)]
pub enum DocumentSubcommand {
    /// Print the whole document
    Show,

    /// Replace the document with the contents of a JSON file
    Import {
        /// JSON file holding an object
        file: PathBuf,
    },
}

impl DocumentCommand {
    pub fn run(&self, editor: &SectionEditor) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            DocumentSubcommand::Show => match editor.load_document()? {
                Some(doc) => println!("{}", serde_json::to_string_pretty(&doc)?),
                None => println!(
                    "No document at {}",
                    editor.store().path().display()
                ),
            },
            DocumentSubcommand::Import { file } => {
                let contents = std::fs::read_to_string(file)
                    .map_err(|e| format!("Failed to read {}: {}", file.display(), e))?;
                let doc = match serde_json::from_str::<Value>(&contents)? {
                    Value::Object(doc) => doc,
                    _ => return Err(format!("{} must hold a JSON object", file.display()).into()),
                };

                let backup = editor.save_document(&doc)?;
                println!(
                    "Imported {} into {}",
                    file.display(),
                    editor.store().path().display()
                );
                if let Some(backup) = backup {
                    println!("Backup: {}", backup.display());
                }
            }
        }
        Ok(())
    }
}
