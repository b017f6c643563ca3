//! TOML codec for the settings document.
//!
//! File format:
//! ```toml
//! [app_settings]
//! "Check for Updates" = "true"
//! "Download location" = "C:\\Users\\me\\Downloads"
//! "Driver type" = "grd"
//! "Minimal install" = "false"
//! ```
//!
//! Every value is a string; keys are written in sorted order.  A document
//! without an `[app_settings]` table decodes as empty.  Invalid TOML, or a
//! table holding anything other than strings, is a [`DocumentError::Parse`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::key::SettingKey;

/// Errors raised while decoding or encoding a [`SettingsDocument`].
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The text is not a well-formed settings document.
    #[error("malformed settings document: {0}")]
    Parse(#[from] toml::de::Error),

    /// The document could not be rendered as TOML.
    #[error("failed to serialize settings document: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Flat key → value map persisted as the settings file.
///
/// # Examples
///
/// ```rust
/// use drvcheck_core::{SettingKey, SettingsDocument};
///
/// let mut doc = SettingsDocument::new();
/// doc.upsert(&SettingKey::DriverType, "sd");
/// let text = doc.to_toml_string().unwrap();
/// let decoded = SettingsDocument::from_toml_str(&text).unwrap();
/// assert_eq!(decoded.get(&SettingKey::DriverType), Some("sd"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsDocument {
    #[serde(default)]
    app_settings: BTreeMap<String, String>,
}

impl SettingsDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes a document from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Parse`] if the text is not valid TOML or the
    /// settings table holds non-string values.
    pub fn from_toml_str(text: &str) -> Result<Self, DocumentError> {
        Ok(toml::from_str(text)?)
    }

    /// Encodes the document as TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Serialize`] if serialisation fails.
    pub fn to_toml_string(&self) -> Result<String, DocumentError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &SettingKey) -> Option<&str> {
        self.app_settings.get(key.as_str()).map(String::as_str)
    }

    /// Inserts or replaces the value for `key`, returning the previous value.
    pub fn upsert(&mut self, key: &SettingKey, value: impl Into<String>) -> Option<String> {
        self.app_settings.insert(key.as_str().to_string(), value.into())
    }

    /// Number of stored settings.
    pub fn len(&self) -> usize {
        self.app_settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.app_settings.is_empty()
    }

    /// Iterates over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (SettingKey, &str)> {
        self.app_settings
            .iter()
            .map(|(k, v)| (SettingKey::from(k.as_str()), v.as_str()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
