//! On-disk storage for the homepage document.
//!
//! The document is a single JSON file:
//! ```text
//! <document_path>          config.json
//! .config.json.<random>.tmp  written then renamed over config.json
//! <backup_dir>/            config.backup.<timestamp>.json (optional)
//! ```
//!
//! Saves write a fresh sibling temp file and rename it over the target, so readers
//! see either the old or the new document and never a partial write.

use chrono::Utc;
use serde_json::Value;
use std::ffi::{OsStr, OsString};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::document::Document;
use crate::error::StoreError;

/// File-backed storage for the document.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    path: PathBuf,
    backup_dir: Option<PathBuf>,
}

impl DocumentStore {
    /// Creates a store for the document at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            backup_dir: None,
        }
    }

    /// Enables backups into `dir` (see [`DocumentStore::backup`]).
    pub fn with_backup_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.backup_dir = Some(dir.into());
        self
    }

    /// Returns the document path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the backup directory, if backups are enabled.
    pub fn backup_dir(&self) -> Option<&Path> {
        self.backup_dir.as_deref()
    }

    /// Checks if the document exists on disk.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Loads the document.
    ///
    /// Returns `Ok(None)` if the file doesn't exist yet, and
    /// [`StoreError::Corrupt`] if it holds anything but a JSON object.
    pub fn load(&self) -> Result<Option<Document>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        let value: Value = serde_json::from_slice(&bytes).map_err(|e| StoreError::Corrupt {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;

        match value {
            Value::Object(doc) => {
                tracing::debug!(
                    "Loaded document {} ({} sections)",
                    self.path.display(),
                    doc.len()
                );
                Ok(Some(doc))
            }
            other => Err(StoreError::Corrupt {
                path: self.path.clone(),
                reason: format!("expected an object at the root, found {}", kind(&other)),
            }),
        }
    }

    /// Saves the document.
    ///
    /// Creates the parent directory if it doesn't exist. Each save writes its
    /// own uniquely named temp file, so concurrent saves never clobber each
    /// other's temp files.
    pub fn save(&self, doc: &Document) -> Result<(), StoreError> {
        let dir = self.dir();
        fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;

        let mut bytes = serde_json::to_vec_pretty(doc)
            .map_err(|e| StoreError::io(&self.path, io::Error::new(io::ErrorKind::InvalidData, e)))?;
        bytes.push(b'\n');

        // Dropped (and deleted) on any early return.
        let mut temp = tempfile::Builder::new()
            .prefix(&self.temp_prefix())
            .suffix(".tmp")
            .tempfile_in(dir)
            .map_err(|e| StoreError::io(dir, e))?;

        // Temp files start owner-only; keep the document's existing mode.
        if let Ok(metadata) = fs::metadata(&self.path) {
            temp.as_file()
                .set_permissions(metadata.permissions())
                .map_err(|e| StoreError::io(temp.path(), e))?;
        }

        if let Err(e) = write_synced(temp.as_file_mut(), &bytes) {
            return Err(StoreError::io(temp.path(), e));
        }

        // Rename to final path (atomic on most filesystems)
        temp.persist(&self.path)
            .map_err(|e| StoreError::io(&self.path, e.error))?;

        tracing::info!(
            "Saved document {} ({} sections)",
            self.path.display(),
            doc.len()
        );
        Ok(())
    }

    /// Copies the current document into the backup directory.
    ///
    /// Returns the backup path, or `Ok(None)` when backups are disabled or
    /// there is no document to copy yet. Existing backups are never
    /// overwritten; a name collision gets a numeric suffix.
    pub fn backup(&self) -> Result<Option<PathBuf>, StoreError> {
        let Some(dir) = &self.backup_dir else {
            return Ok(None);
        };

        let mut source = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;

        let stamp = Utc::now().format("%Y-%m-%dT%H-%M-%S-%3fZ").to_string();
        let (backup_path, mut file) = create_unique(dir, &stamp)?;

        let copied = io::copy(&mut source, &mut file).and_then(|_| file.sync_all());
        if let Err(e) = copied {
            let _ = fs::remove_file(&backup_path);
            return Err(StoreError::io(backup_path, e));
        }

        tracing::info!("Created backup {}", backup_path.display());
        Ok(Some(backup_path))
    }

    fn dir(&self) -> &Path {
        self.path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
    }

    /// `.config.json.` for `config.json`; temp files land next to the target.
    fn temp_prefix(&self) -> OsString {
        let mut prefix = OsString::from(".");
        prefix.push(self.path.file_name().unwrap_or(OsStr::new("document")));
        prefix.push(".");
        prefix
    }
}

/// Creates `config.backup.<stamp>.json`, or `config.backup.<stamp>-<n>.json`
/// when that name is taken.
fn create_unique(dir: &Path, stamp: &str) -> Result<(PathBuf, File), StoreError> {
    for attempt in 0u32.. {
        let name = match attempt {
            0 => format!("config.backup.{stamp}.json"),
            n => format!("config.backup.{stamp}-{n}.json"),
        };
        let path = dir.join(name);

        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(StoreError::io(path, e)),
        }
    }
    Err(StoreError::io(
        dir,
        io::Error::new(io::ErrorKind::AlreadyExists, "no free backup name"),
    ))
}

fn write_synced(file: &mut File, bytes: &[u8]) -> io::Result<()> {
    file.write_all(bytes)?;
    file.sync_all()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
