//! In-memory settings backend for unit testing.
//!
//! Holds the raw text a settings file would contain, so tests can seed it
//! with corrupt content, and can be told to fail every save.

use std::io;
use std::path::{Path, PathBuf};

use drvcheck_core::SettingsDocument;

use crate::application::backend::{BackendError, SettingsBackend};

/// A [`SettingsBackend`] that keeps the encoded document in memory.
#[derive(Debug, Clone)]
pub struct MemoryBackend {
    location: PathBuf,
    contents: Option<String>,
    fail_saves: bool,
}

impl MemoryBackend {
    /// Creates a backend with no resource yet, as on first run.
    pub fn new() -> Self {
        Self {
            location: PathBuf::from("memory://app.config"),
            contents: None,
            fail_saves: false,
        }
    }

    /// Creates a backend whose resource holds `text` verbatim.
    pub fn with_contents(text: impl Into<String>) -> Self {
        Self {
            contents: Some(text.into()),
            ..Self::new()
        }
    }

    /// Creates a backend holding an encoded copy of `document`.
    ///
    /// Panics if the document cannot be encoded.
    pub fn with_document(document: &SettingsDocument) -> Self {
        let text = document
            .to_toml_string()
            .expect("settings document must encode");
        Self::with_contents(text)
    }

    /// Makes every subsequent save fail with an I/O error.
    pub fn failing_saves(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    /// Raw text of the resource, `None` once wiped or before creation.
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    /// Decoded resource, `None` if absent or malformed.
    pub fn document(&self) -> Option<SettingsDocument> {
        self.contents
            .as_deref()
            .and_then(|text| SettingsDocument::from_toml_str(text).ok())
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsBackend for MemoryBackend {
    fn location(&self) -> &Path {
        &self.location
    }

    fn exists(&self) -> bool {
        self.contents.is_some()
    }

    fn load(&self) -> Result<SettingsDocument, BackendError> {
        match self.contents.as_deref() {
            Some(text) => {
                SettingsDocument::from_toml_str(text).map_err(|source| BackendError::Document {
                    path: self.location.clone(),
                    source,
                })
            }
            None => Ok(SettingsDocument::new()),
        }
    }

    fn save(&mut self, document: &SettingsDocument) -> Result<(), BackendError> {
        if self.fail_saves {
            return Err(BackendError::Io {
                path: self.location.clone(),
                source: io::Error::new(io::ErrorKind::Other, "simulated write failure"),
            });
        }
        let text = document
            .to_toml_string()
            .map_err(|source| BackendError::Document {
                path: self.location.clone(),
                source,
            })?;
        self.contents = Some(text);
        Ok(())
    }

    fn wipe(&mut self) -> Result<bool, BackendError> {
        Ok(self.contents.take().is_some())
    }
}
