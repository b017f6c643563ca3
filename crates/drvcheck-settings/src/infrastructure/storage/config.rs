//! TOML settings file at the platform-appropriate per-user location.
//!
//! Default path, `<per-user-app-data>/Hawaii_Beach/TinyNvidiaUpdateChecker/app.config`:
//! - Windows:  `%LOCALAPPDATA%\Hawaii_Beach\TinyNvidiaUpdateChecker\app.config`
//! - Linux:    `$XDG_DATA_HOME/Hawaii_Beach/TinyNvidiaUpdateChecker/app.config`
//!   (falling back to `~/.local/share`)
//! - macOS:    `~/Library/Application Support/Hawaii_Beach/TinyNvidiaUpdateChecker/app.config`
//!
//! An explicit override path replaces the default entirely.

use std::path::{Path, PathBuf};

use drvcheck_core::SettingsDocument;
use thiserror::Error;
use tracing::debug;

use crate::application::backend::{BackendError, SettingsBackend};
use crate::application::resolver::InteractiveResolver;
use crate::application::settings_store::{
    SettingsError, SettingsStore, StoreOptions, FATAL_EXIT_CODE,
};

/// Vendor directory under the per-user application-data directory.
pub const VENDOR_DIR: &str = "Hawaii_Beach";
/// Application directory under [`VENDOR_DIR`].
pub const APP_DIR: &str = "TinyNvidiaUpdateChecker";
/// File name of the settings file.
pub const CONFIG_FILE_NAME: &str = "app.config";

/// Error type for opening the settings store.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform data directory could not be determined.
    #[error("could not determine platform application-data directory")]
    NoPlatformConfigDir,

    /// Bootstrapping or verifying the store failed.
    #[error(transparent)]
    Settings(#[from] SettingsError),
}

impl ConfigError {
    /// Exit status the hosting process should terminate with.
    pub fn exit_code(&self) -> u8 {
        match self {
            ConfigError::NoPlatformConfigDir => FATAL_EXIT_CODE,
            ConfigError::Settings(e) => e.exit_code(),
        }
    }
}

// ── Path resolution ───────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the settings file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_data_dir()
        .map(|base| base.join(VENDOR_DIR).join(APP_DIR))
        .ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the settings file.  `override_path` wins when
/// given.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if no override is given and
/// the base directory cannot be determined.
pub fn config_file_path(override_path: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    match override_path {
        Some(path) => Ok(path),
        None => Ok(config_dir()?.join(CONFIG_FILE_NAME)),
    }
}

/// Resolves the settings file location and initialises a store on it.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the location cannot be
/// resolved, or [`ConfigError::Settings`] if bootstrapping fails.
pub fn open_store<R: InteractiveResolver>(
    override_path: Option<PathBuf>,
    resolver: R,
    options: StoreOptions,
) -> Result<SettingsStore<ConfigFile, R>, ConfigError> {
    let path = config_file_path(override_path)?;
    debug!(path = %path.display(), "opening settings file");
    Ok(SettingsStore::initialize(ConfigFile::new(path), resolver, options)?)
}

/// Resolves the per-user application-data base directory.
fn platform_data_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        // %LOCALAPPDATA% e.g. C:\Users\<user>\AppData\Local
        std::env::var_os("LOCALAPPDATA").map(PathBuf::from)
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_DATA_HOME or ~/.local/share
        std::env::var_os("XDG_DATA_HOME")
            .map(PathBuf::from)
            .or_else(|| {
                std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".local").join("share"))
            })
    }

    #[cfg(target_os = "macos")]
    {
        // ~/Library/Application Support
        std::env::var_os("HOME")
            .map(|h| PathBuf::from(h).join("Library").join("Application Support"))
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Settings file backend ─────────────────────────────────────────────────────

/// Settings file on disk.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    path: PathBuf,
}

impl ConfigFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, path: &Path, source: std::io::Error) -> BackendError {
        BackendError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl SettingsBackend for ConfigFile {
    fn location(&self) -> &Path {
        &self.path
    }

    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn load(&self) -> Result<SettingsDocument, BackendError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                SettingsDocument::from_toml_str(&content).map_err(|source| BackendError::Document {
                    path: self.path.clone(),
                    source,
                })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(SettingsDocument::new()),
            Err(e) => Err(self.io_error(&self.path, e)),
        }
    }

    fn save(&mut self, document: &SettingsDocument) -> Result<(), BackendError> {
        // Ensure directory exists before writing.
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| self.io_error(dir, e))?;
        }

        let content = document
            .to_toml_string()
            .map_err(|source| BackendError::Document {
                path: self.path.clone(),
                source,
            })?;
        std::fs::write(&self.path, content).map_err(|e| self.io_error(&self.path, e))
    }

    fn wipe(&mut self) -> Result<bool, BackendError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(self.io_error(&self.path, e)),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use drvcheck_core::SettingKey;
    use uuid::Uuid;

    fn temp_config_path() -> (PathBuf, PathBuf) {
        let dir = std::env::temp_dir().join(format!("drvcheck_test_{}", Uuid::new_v4()));
        let path = dir.join("nested").join(CONFIG_FILE_NAME);
        (dir, path)
    }

    #[test]
    fn test_override_path_wins() {
        let path = config_file_path(Some(PathBuf::from("/opt/drv/custom.config"))).unwrap();
        assert_eq!(path, PathBuf::from("/opt/drv/custom.config"));
    }

    #[test]
    fn test_default_path_ends_with_vendor_app_and_file_name() {
        if let Ok(path) = config_file_path(None) {
            assert!(
                path.ends_with(Path::new(VENDOR_DIR).join(APP_DIR).join(CONFIG_FILE_NAME)),
                "unexpected settings path {path:?}"
            );
        }
        // NoPlatformConfigDir (e.g. stripped CI env without HOME) is also acceptable.
    }

    #[test]
    fn test_missing_file_loads_as_empty_document() {
        // Arrange
        let (dir, path) = temp_config_path();
        let file = ConfigFile::new(&path);

        // Act
        let document = file.load().expect("missing file is not an error");

        // Assert
        assert!(document.is_empty());
        assert!(!file.exists());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_save_creates_parent_directories_and_round_trips() {
        // Arrange
        let (dir, path) = temp_config_path();
        let mut file = ConfigFile::new(&path);
        let mut document = SettingsDocument::new();
        document.upsert(&SettingKey::DownloadLocation, "/tmp/drv");

        // Act
        file.save(&document).expect("save");
        let loaded = file.load().expect("load");

        // Assert
        assert!(file.exists());
        assert_eq!(loaded, document);

        // Cleanup
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_malformed_file_is_a_document_error() {
        let (dir, path) = temp_config_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "<configuration><appSettings>").unwrap();

        let result = ConfigFile::new(&path).load();

        assert!(matches!(result, Err(BackendError::Document { .. })));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_wipe_deletes_file_and_reports_absence_afterwards() {
        // Arrange
        let (dir, path) = temp_config_path();
        let mut file = ConfigFile::new(&path);
        file.save(&SettingsDocument::new()).unwrap();

        // Act / Assert
        assert!(file.wipe().unwrap(), "first wipe removes the file");
        assert!(!file.wipe().unwrap(), "second wipe has nothing to remove");
        assert!(!path.exists());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_no_platform_dir_exits_with_status_one() {
        assert_eq!(ConfigError::NoPlatformConfigDir.exit_code(), 1);
    }
}
