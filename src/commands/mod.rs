mod config_cmd;
mod document;
mod item;
mod section;

pub use config_cmd::ConfigCommand;
pub use document::DocumentCommand;
pub use item::ItemCommand;
pub use section::SectionCommand;

use homepage::config::Config;
use homepage::server::KnownSection;
use homepage_core::{DocumentStore, SectionEditor};
use serde_json::Value;

/// Builds an editor over the configured document.
pub fn open_editor(config: &Config) -> SectionEditor {
    let mut store = DocumentStore::new(&config.document_path.value);
    if let Some(dir) = &config.backup_dir.value {
        store = store.with_backup_dir(dir);
    }
    SectionEditor::new(store)
}

/// Maps a section name to its document key.
///
/// Known sections are matched case-insensitively (`friendlinks` becomes
/// `friendLinks`); anything else is used verbatim.
fn section_key(name: &str) -> &str {
    KnownSection::parse(name).map_or(name, |section| section.key())
}

fn parse_json(raw: &str) -> Result<Value, Box<dyn std::error::Error>> {
    serde_json::from_str(raw).map_err(|e| format!("Invalid JSON '{}': {}", raw, e).into())
}
