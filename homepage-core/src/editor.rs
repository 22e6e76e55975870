//! Section-level edits on top of [`DocumentStore`].
//!
//! Every mutation is a full read-modify-write cycle: load the document (or
//! start from an empty one), apply the edit in memory, save. The cycle runs
//! under a process-wide write lock per document path, so concurrent edits
//! cannot lose each other's changes even across separate editors. An edit
//! that fails is never saved.
//!
//! Reads skip the lock; the store's atomic rename keeps them consistent.

use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use crate::document::Document;
use crate::error::EditError;
use crate::store::DocumentStore;

/// Reads and edits named sections of the document.
///
/// Every editor for the same document path shares one write lock.
#[derive(Debug)]
pub struct SectionEditor {
    store: DocumentStore,
    write_lock: Arc<Mutex<()>>,
}

impl SectionEditor {
    /// Creates an editor over the given store.
    pub fn new(store: DocumentStore) -> Self {
        let write_lock = lock_for(store.path());
        Self { store, write_lock }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// Checks if the document exists on disk.
    pub fn document_exists(&self) -> bool {
        self.store.exists()
    }

    /// Loads the whole document. `Ok(None)` if it doesn't exist yet.
    pub fn load_document(&self) -> Result<Option<Document>, EditError> {
        Ok(self.store.load()?)
    }

    /// Replaces the whole document.
    ///
    /// Backs up the previous document first when the store has a backup
    /// directory, and returns the backup path.
    pub fn save_document(&self, doc: &Document) -> Result<Option<PathBuf>, EditError> {
        let _guard = self.lock();
        let backup = self.store.backup()?;
        self.store.save(doc)?;
        Ok(backup)
    }

    /// Returns a section's value, or `None` if the document or key is missing.
    pub fn get_section(&self, name: &str) -> Result<Option<Value>, EditError> {
        Ok(self.store.load()?.and_then(|mut doc| doc.remove(name)))
    }

    /// Sets `doc[name] = value`, creating the document if needed.
    pub fn replace_section(&self, name: &str, value: Value) -> Result<(), EditError> {
        self.modify(move |doc| {
            doc.insert(name.to_string(), value);
            Ok(())
        })?;
        tracing::info!("Replaced section '{}'", name);
        Ok(())
    }

    /// Appends an item to a list section and returns its index.
    ///
    /// A missing section starts out as an empty list.
    pub fn append_item(&self, section: &str, item: Value) -> Result<usize, EditError> {
        let index = self.modify(move |doc| {
            let list = doc
                .entry(section)
                .or_insert_with(|| Value::Array(Vec::new()));
            let Value::Array(items) = list else {
                return Err(EditError::NotAList(section.to_string()));
            };
            items.push(item);
            Ok(items.len() - 1)
        })?;
        tracing::info!("Added item to '{}' at index {}", section, index);
        Ok(index)
    }

    /// Overwrites the item at `index` in a list section.
    pub fn replace_item(&self, section: &str, index: usize, item: Value) -> Result<(), EditError> {
        self.modify(move |doc| {
            let items = list_mut(doc, section)?;
            let len = items.len();
            let slot = items
                .get_mut(index)
                .ok_or_else(|| out_of_range(section, index, len))?;
            *slot = item;
            Ok(())
        })?;
        tracing::info!("Updated item {} in '{}'", index, section);
        Ok(())
    }

    /// Removes and returns the item at `index`; later items shift down by one.
    pub fn remove_item(&self, section: &str, index: usize) -> Result<Value, EditError> {
        let removed = self.modify(move |doc| {
            let items = list_mut(doc, section)?;
            if index >= items.len() {
                return Err(out_of_range(section, index, items.len()));
            }
            Ok(items.remove(index))
        })?;
        tracing::info!("Removed item {} from '{}'", index, section);
        Ok(removed)
    }

    fn modify<T>(
        &self,
        edit: impl FnOnce(&mut Document) -> Result<T, EditError>,
    ) -> Result<T, EditError> {
        let _guard = self.lock();
        let mut doc = self.store.load()?.unwrap_or_default();
        let result = edit(&mut doc)?;
        self.store.save(&doc)?;
        Ok(result)
    }

    // The lock guards no data of its own, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Returns the write lock for `path`, creating it on first use.
fn lock_for(path: &Path) -> Arc<Mutex<()>> {
    static LOCKS: OnceLock<Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>> = OnceLock::new();

    let key = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut locks = LOCKS
        .get_or_init(Default::default)
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    Arc::clone(locks.entry(key).or_default())
}

fn list_mut<'a>(doc: &'a mut Document, section: &str) -> Result<&'a mut Vec<Value>, EditError> {
    match doc.get_mut(section) {
        None => Err(EditError::SectionNotFound(section.to_string())),
        Some(Value::Array(items)) => Ok(items),
        Some(_) => Err(EditError::NotAList(section.to_string())),
    }
}

fn out_of_range(section: &str, index: usize, len: usize) -> EditError {
    EditError::IndexOutOfRange {
        section: section.to_string(),
        index,
        len,
    }
}
