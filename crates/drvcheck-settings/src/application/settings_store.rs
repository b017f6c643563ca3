//! SettingsStore: typed access to persisted preferences with on-demand
//! provisioning of missing values.
//!
//! # Lifecycle
//!
//! ```text
//! initialize()
//!  ├─ backend missing?  ──► setup_setting() for each mandatory key, in order
//!  └─ verify_config()   ──► read_setting() for each mandatory key
//! ```
//!
//! # Per-key state machine
//!
//! ```text
//! Absent ──setup_setting──► Present ──set_setting──► Present
//!    │                         │
//!    └──── failed write ───────┴──► resource wiped ──► SettingsError::ConfigWiped
//! ```
//!
//! A failed write is never retried.  The store deletes the backing resource,
//! tells the operator, and returns [`SettingsError::ConfigWiped`]; the caller
//! is expected to stop so the next run starts from a clean file.
//!
//! Reads are more forgiving: a resource that cannot be decoded makes the
//! value unavailable (`None`) and is logged, but nothing is deleted.

use std::path::PathBuf;

use drvcheck_core::{
    decode_bool, encode_bool, DriverType, SettingKey, SettingsDocument, SetupPayload,
};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::backend::{BackendError, SettingsBackend};
use super::resolver::{
    ChoiceOption, ChoicePrompt, ConfirmPrompt, InteractiveResolver, Notice, TextPrompt,
};

/// Value persisted when setup is requested for an unrecognized key.
pub const UNKNOWN_VALUE: &str = "unknown";

/// Process exit status the binary uses for [`SettingsError`].
pub const FATAL_EXIT_CODE: u8 = 1;

const CHECK_FOR_UPDATES_QUESTION: &str = "Do you want to search for client updates?";

const MINIMAL_INSTALL_QUESTION: &str = "Do you want to perform a minimal install of the drivers? \
     This will make sure you don't install telemetry and miscellaneous addons, \
     but requires either WinRAR or 7-Zip to be installed.";

const DRIVER_TYPE_TEXT: &str = "If you are a gamer who prioritizes day of launch support for \
     the latest games, patches, and DLCs, choose Game Ready Drivers.\n\n\
     If you are a content creator who prioritizes stability and quality for creative workflows \
     including video editing, animation, photography, graphic design, and livestreaming, \
     choose Studio Drivers.\n\n\
     WARNING: not all GPUs support Studio Drivers.";

/// Fatal outcome of a store operation.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Persisting a value failed; the backing resource has been deleted.
    #[error("settings at {path} were wiped after a failed write: {source}")]
    ConfigWiped {
        path: PathBuf,
        #[source]
        source: BackendError,
    },
}

impl SettingsError {
    /// Exit status the hosting process should terminate with.
    pub fn exit_code(&self) -> u8 {
        FATAL_EXIT_CODE
    }
}

/// Behaviour switches for a [`SettingsStore`].
#[derive(Debug, Clone, Default)]
pub struct StoreOptions {
    /// Non-interactive mode: yes/no settings take their default (`"false"`)
    /// without prompting.
    pub confirm: bool,
    /// Directory proposed when asking for `Download location`.
    pub download_suggestion: Option<PathBuf>,
}

/// Durable, typed access to named preferences.
///
/// Construct once at startup with [`SettingsStore::initialize`] and pass it
/// by reference to everything that needs a setting.
pub struct SettingsStore<B, R> {
    backend: B,
    resolver: R,
    options: StoreOptions,
    /// In-memory view of the backend, reloaded after every write.
    view: Option<SettingsDocument>,
}

impl<B: SettingsBackend, R: InteractiveResolver> SettingsStore<B, R> {
    /// Creates a store without touching the backend.
    pub fn new(backend: B, resolver: R, options: StoreOptions) -> Self {
        Self {
            backend,
            resolver,
            options,
            view: None,
        }
    }

    /// Creates a store, bootstrapping the backend on first run and verifying
    /// the mandatory keys.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ConfigWiped`] if any provisioning write fails.
    pub fn initialize(
        backend: B,
        resolver: R,
        options: StoreOptions,
    ) -> Result<Self, SettingsError> {
        let mut store = Self::new(backend, resolver, options);
        debug!(path = %store.backend.location().display(), "settings location");

        if !store.backend.exists() {
            info!("generating configuration file");
            let path = store.backend.location().to_path_buf();
            store.resolver.notify(&Notice::GeneratingConfig { path });
            for key in &SettingKey::MANDATORY {
                store.setup_setting(key, None)?;
            }
        }

        store.verify_config()?;
        Ok(store)
    }

    /// Reads every mandatory key, provisioning any that are missing.
    ///
    /// The returned pairs are for diagnostics only.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ConfigWiped`] if provisioning a missing key
    /// fails to persist.
    pub fn verify_config(&mut self) -> Result<Vec<(SettingKey, Option<String>)>, SettingsError> {
        let mut values = Vec::with_capacity(SettingKey::MANDATORY.len());
        for key in SettingKey::MANDATORY {
            let value = self.read_setting(&key, None, true)?;
            debug!(key = %key, val = value.as_deref().unwrap_or(""), "verified");
            values.push((key, value));
        }
        Ok(values)
    }

    /// Looks up `key`, provisioning it through the resolver when it is absent
    /// and `setup_if_not_found` is set.
    ///
    /// Returns `Ok(None)` when the key is absent and `setup_if_not_found` is
    /// `false`, or when the backend cannot be decoded.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ConfigWiped`] if provisioning fails to persist.
    pub fn read_setting(
        &mut self,
        key: &SettingKey,
        payload: Option<&SetupPayload>,
        setup_if_not_found: bool,
    ) -> Result<Option<String>, SettingsError> {
        let current = match self.logged_read(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %key, error = %e, "could not read settings");
                return Ok(None);
            }
        };

        if current.is_some() || !setup_if_not_found {
            return Ok(current);
        }

        self.resolver.notify(&Notice::RepairingKey { key: key.clone() });
        self.setup_setting(key, payload)?;
        Ok(self.cached(key).unwrap_or_else(|e| {
            warn!(key = %key, error = %e, "could not re-read settings");
            None
        }))
    }

    /// Looks up `key` without ever prompting.
    pub fn lookup(&mut self, key: &SettingKey) -> Option<String> {
        match self.logged_read(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key = %key, error = %e, "could not read settings");
                None
            }
        }
    }

    /// Reads a boolean setting.
    ///
    /// Anything other than the exact strings `"true"` / `"false"` (including
    /// an absent key) triggers one setup attempt and one re-read.  If the
    /// value is still not a boolean the result is `false`, logged as an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ConfigWiped`] if the setup attempt fails to
    /// persist.
    pub fn read_setting_bool(&mut self, key: &SettingKey) -> Result<bool, SettingsError> {
        let stored = self.read_setting(key, None, false)?;
        if let Some(value) = stored.as_deref().and_then(decode_bool) {
            return Ok(value);
        }

        self.setup_setting(key, None)?;
        let stored = self.read_setting(key, None, false)?;
        if let Some(value) = stored.as_deref().and_then(decode_bool) {
            return Ok(value);
        }

        error!(
            key = %key,
            val = stored.as_deref().unwrap_or(""),
            "could not retrieve boolean setting, falling back to false"
        );
        Ok(false)
    }

    /// Inserts or replaces `key`, persists the document, and reloads the
    /// in-memory view.
    ///
    /// # Errors
    ///
    /// Any backend failure wipes the backing resource, notifies the operator,
    /// and returns [`SettingsError::ConfigWiped`].
    pub fn set_setting(&mut self, key: &SettingKey, value: &str) -> Result<(), SettingsError> {
        debug!(target: "settings", operation = "set", key = %key, val = value);

        match self.persist(key, value) {
            Ok(document) => {
                self.view = Some(document);
                Ok(())
            }
            Err(source) => Err(self.wipe_after(source)),
        }
    }

    /// Asks the operator for a value for `key` and persists it.
    ///
    /// Unrecognized keys are reported to the operator and stored as
    /// [`UNKNOWN_VALUE`].  Returns the value that was stored.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::ConfigWiped`] if the value fails to persist.
    pub fn setup_setting(
        &mut self,
        key: &SettingKey,
        payload: Option<&SetupPayload>,
    ) -> Result<String, SettingsError> {
        let value = self.prompt_for(key, payload);
        self.set_setting(key, &value)?;
        debug!(target: "settings", operation = "setup", key = %key, val = %value);
        Ok(value)
    }

    // ── Typed accessors ───────────────────────────────────────────────────────

    /// `Check for Updates` as a boolean.
    pub fn check_for_updates(&mut self) -> Result<bool, SettingsError> {
        self.read_setting_bool(&SettingKey::CheckForUpdates)
    }

    /// `Minimal install` as a boolean.
    pub fn minimal_install(&mut self) -> Result<bool, SettingsError> {
        self.read_setting_bool(&SettingKey::MinimalInstall)
    }

    /// `Download location` as a path.
    pub fn download_location(&mut self) -> Result<Option<PathBuf>, SettingsError> {
        Ok(self
            .read_setting(&SettingKey::DownloadLocation, None, true)?
            .map(PathBuf::from))
    }

    /// `Driver type` parsed into a [`DriverType`].
    ///
    /// An unrecognized tag gets one setup attempt, like booleans do.
    pub fn driver_type(&mut self) -> Result<Option<DriverType>, SettingsError> {
        let key = SettingKey::DriverType;
        let stored = self.read_setting(&key, None, false)?;
        if let Some(driver) = stored.as_deref().and_then(|tag| tag.parse().ok()) {
            return Ok(Some(driver));
        }

        self.setup_setting(&key, None)?;
        let stored = self.read_setting(&key, None, false)?;
        match stored.as_deref().map(str::parse::<DriverType>) {
            Some(Ok(driver)) => Ok(Some(driver)),
            Some(Err(e)) => {
                error!(key = %key, error = %e, "could not retrieve driver type");
                Ok(None)
            }
            None => {
                error!(key = %key, "could not retrieve driver type");
                Ok(None)
            }
        }
    }

    /// `GPU ID`, provisioned from `payload` when missing.
    pub fn gpu_id(
        &mut self,
        payload: Option<&SetupPayload>,
    ) -> Result<Option<String>, SettingsError> {
        self.read_setting(&SettingKey::GpuId, payload, true)
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    // ── Internals ─────────────────────────────────────────────────────────────

    /// Returns the cached value for `key`, loading the view on first use.
    fn cached(&mut self, key: &SettingKey) -> Result<Option<String>, BackendError> {
        let document = match self.view.take() {
            Some(document) => document,
            None => self.backend.load()?,
        };
        Ok(self.view.insert(document).get(key).map(str::to_owned))
    }

    fn logged_read(&mut self, key: &SettingKey) -> Result<Option<String>, BackendError> {
        let value = self.cached(key)?;
        debug!(
            target: "settings",
            operation = "read",
            key = %key,
            val = value.as_deref().unwrap_or("")
        );
        Ok(value)
    }

    fn persist(&mut self, key: &SettingKey, value: &str) -> Result<SettingsDocument, BackendError> {
        let mut document = self.backend.load()?;
        document.upsert(key, value);
        self.backend.save(&document)?;
        self.backend.load()
    }

    fn wipe_after(&mut self, source: BackendError) -> SettingsError {
        self.view = None;
        let path = self.backend.location().to_path_buf();

        match self.backend.wipe() {
            Ok(true) => info!(path = %path.display(), "wiped config"),
            Ok(false) => debug!(path = %path.display(), "nothing to wipe"),
            Err(e) => error!(path = %path.display(), error = %e, "failed to wipe config"),
        }

        self.resolver.notify(&Notice::ConfigWiped {
            path: path.clone(),
            reason: source.to_string(),
        });
        SettingsError::ConfigWiped { path, source }
    }

    fn prompt_for(&mut self, key: &SettingKey, payload: Option<&SetupPayload>) -> String {
        match key {
            SettingKey::CheckForUpdates => self.ask_yes_no(key, CHECK_FOR_UPDATES_QUESTION),
            SettingKey::MinimalInstall => self.ask_yes_no(key, MINIMAL_INSTALL_QUESTION),
            SettingKey::DownloadLocation => self.resolver.free_text(&TextPrompt {
                key: key.clone(),
                heading: "Choose a download location for driver packages",
                suggestion: self
                    .options
                    .download_suggestion
                    .as_ref()
                    .map(|dir| dir.display().to_string()),
            }),
            SettingKey::DriverType => self.resolver.choose(&ChoicePrompt {
                key: key.clone(),
                heading: "Choose driver type",
                text: DRIVER_TYPE_TEXT,
                options: DriverType::ALL
                    .iter()
                    .map(|driver| ChoiceOption::new(driver.label(), driver.tag()))
                    .collect(),
            }),
            SettingKey::GpuId => match payload {
                Some(SetupPayload::Gpus(gpus)) if !gpus.is_empty() => {
                    self.resolver.choose(&ChoicePrompt {
                        key: key.clone(),
                        heading: "Choose the GPU to check drivers for",
                        text: "",
                        options: gpus
                            .iter()
                            .map(|gpu| ChoiceOption::new(gpu.name.clone(), gpu.id.clone()))
                            .collect(),
                    })
                }
                _ => self.resolver.free_text(&TextPrompt {
                    key: key.clone(),
                    heading: "Enter the GPU ID",
                    suggestion: None,
                }),
            },
            SettingKey::Other(raw) => {
                error!(key = %raw, "setup requested for unknown key");
                self.resolver.notify(&Notice::UnknownKey { key: raw.clone() });
                UNKNOWN_VALUE.to_string()
            }
        }
    }

    fn ask_yes_no(&mut self, key: &SettingKey, question: &'static str) -> String {
        if self.options.confirm {
            debug!(key = %key, "confirm mode, using default");
            return encode_bool(false).to_string();
        }
        let yes = self.resolver.confirm(&ConfirmPrompt {
            key: key.clone(),
            question,
        });
        encode_bool(yes).to_string()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
