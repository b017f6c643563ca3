//! Backing-resource port.
//!
//! The store never touches the file system itself; it loads and saves whole
//! [`SettingsDocument`]s through this trait.  The production implementation
//! is `infrastructure::storage::config::ConfigFile`; tests use
//! `infrastructure::storage::memory::MemoryBackend`.

use std::path::{Path, PathBuf};

use drvcheck_core::{DocumentError, SettingsDocument};
use thiserror::Error;

/// Failure reading or writing the backing resource.
///
/// Every variant counts as a structural error: on read it makes the value
/// unavailable, on write it triggers a wipe.
#[derive(Debug, Error)]
pub enum BackendError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing settings at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored document could not be decoded or encoded.
    #[error("settings at {path} are malformed: {source}")]
    Document {
        path: PathBuf,
        #[source]
        source: DocumentError,
    },
}

/// Persistent storage for the settings document.
pub trait SettingsBackend {
    /// Human-readable location of the resource, used in logs and notices.
    fn location(&self) -> &Path;

    /// Returns `true` if the resource has been created.
    fn exists(&self) -> bool;

    /// Loads the whole document.  A resource that does not exist yet loads
    /// as an empty document.
    fn load(&self) -> Result<SettingsDocument, BackendError>;

    /// Replaces the stored document, creating the resource if needed.
    fn save(&mut self, document: &SettingsDocument) -> Result<(), BackendError>;

    /// Deletes the resource.  Returns `false` if there was nothing to delete.
    fn wipe(&mut self) -> Result<bool, BackendError>;
}
