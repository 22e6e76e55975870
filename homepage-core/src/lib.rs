//! Homepage Core Library
//!
//! Section-scoped storage for the single JSON document that drives a personal
//! homepage. [`DocumentStore`] persists the document atomically and
//! [`SectionEditor`] layers section and list-item edits on top of it.

pub mod document;
pub mod editor;
pub mod error;
pub mod store;

pub use document::{sections, Document};
pub use editor::SectionEditor;
pub use error::{EditError, StoreError};
pub use store::DocumentStore;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
