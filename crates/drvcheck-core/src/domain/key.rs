//! Setting keys and the boolean value encoding.
//!
//! Keys are case-sensitive strings on disk.  The five keys the application
//! knows about get their own [`SettingKey`] variant; anything else is kept
//! verbatim in [`SettingKey::Other`] so it can still be read, written, and
//! reported as unknown during setup.
//!
//! # Mandatory keys
//!
//! [`SettingKey::MANDATORY`] lists the four keys every initialised settings
//! file must contain, in the order they are provisioned on first run:
//!
//! ```text
//! Check for Updates → Minimal install → Download location → Driver type
//! ```
//!
//! `GPU ID` is deliberately absent: it is only provisioned on demand.

use std::fmt;

/// Literal stored for a `true` boolean setting.
pub const TRUE_VALUE: &str = "true";
/// Literal stored for a `false` boolean setting.
pub const FALSE_VALUE: &str = "false";

/// Identifier of a single setting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SettingKey {
    /// `Check for Updates` – search for new versions of the utility itself.
    CheckForUpdates,
    /// `Minimal install` – strip telemetry and addons from driver installs.
    MinimalInstall,
    /// `Download location` – directory driver packages are downloaded into.
    DownloadLocation,
    /// `Driver type` – preferred driver channel, see [`crate::DriverType`].
    DriverType,
    /// `GPU ID` – identifier of the selected GPU.
    GpuId,
    /// Any key string not listed above.
    Other(String),
}

impl SettingKey {
    /// Keys that must be present once the settings file is initialised,
    /// in bootstrap order.
    pub const MANDATORY: [SettingKey; 4] = [
        SettingKey::CheckForUpdates,
        SettingKey::MinimalInstall,
        SettingKey::DownloadLocation,
        SettingKey::DriverType,
    ];

    /// Returns the exact string used for this key on disk.
    pub fn as_str(&self) -> &str {
        match self {
            SettingKey::CheckForUpdates => "Check for Updates",
            SettingKey::MinimalInstall => "Minimal install",
            SettingKey::DownloadLocation => "Download location",
            SettingKey::DriverType => "Driver type",
            SettingKey::GpuId => "GPU ID",
            SettingKey::Other(raw) => raw,
        }
    }

    /// Returns `true` for the five keys the application knows about.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, SettingKey::Other(_))
    }

}

impl From<&str> for SettingKey {
    fn from(raw: &str) -> Self {
        match raw {
            "Check for Updates" => SettingKey::CheckForUpdates,
            "Minimal install" => SettingKey::MinimalInstall,
            "Download location" => SettingKey::DownloadLocation,
            "Driver type" => SettingKey::DriverType,
            "GPU ID" => SettingKey::GpuId,
            other => SettingKey::Other(other.to_string()),
        }
    }
}

impl From<String> for SettingKey {
    fn from(raw: String) -> Self {
        SettingKey::from(raw.as_str())
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encodes a boolean the way it is stored on disk.
pub fn encode_bool(value: bool) -> &'static str {
    if value {
        TRUE_VALUE
    } else {
        FALSE_VALUE
    }
}

/// Decodes a stored boolean.
///
/// Only the exact literals `"true"` and `"false"` are recognized; `"True"`,
/// `" true"`, `"1"` and the like return `None`.
pub fn decode_bool(raw: &str) -> Option<bool> {
    match raw {
        TRUE_VALUE => Some(true),
        FALSE_VALUE => Some(false),
        _ => None,
    }
}
