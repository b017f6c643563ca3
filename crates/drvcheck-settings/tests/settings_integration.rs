//! Integration tests for the settings store on a real settings file.
//!
//! These tests exercise `SettingsStore` + `ConfigFile` + `ScriptedResolver`
//! end-to-end in a unique temporary directory per test.

use std::path::{Path, PathBuf};

use drvcheck_core::{GpuCandidate, SettingKey, SettingsDocument, SetupPayload};
use drvcheck_settings::application::backend::SettingsBackend;
use drvcheck_settings::application::resolver::Notice;
use drvcheck_settings::application::settings_store::{SettingsError, SettingsStore, StoreOptions};
use drvcheck_settings::infrastructure::resolver::scripted::ScriptedResolver;
use drvcheck_settings::infrastructure::storage::config::{open_store, ConfigFile};
use uuid::Uuid;

/// Temporary directory removed when dropped.
struct TempDir(PathBuf);

impl TempDir {
    fn new() -> Self {
        let dir = std::env::temp_dir().join(format!("drvcheck_it_{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        Self(dir)
    }

    fn config_path(&self) -> PathBuf {
        self.0.join("Hawaii_Beach").join("TinyNvidiaUpdateChecker").join("app.config")
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        std::fs::remove_dir_all(&self.0).ok();
    }
}

fn stub_resolver() -> ScriptedResolver {
    ScriptedResolver::new()
        .with_answer(SettingKey::CheckForUpdates, "true")
        .with_answer(SettingKey::MinimalInstall, "false")
        .with_answer(SettingKey::DownloadLocation, "/tmp/drv")
        .with_answer(SettingKey::DriverType, "grd")
}

fn read_document(path: &Path) -> SettingsDocument {
    let text = std::fs::read_to_string(path).expect("settings file must exist");
    SettingsDocument::from_toml_str(&text).expect("settings file must decode")
}

fn write_document(path: &Path, pairs: &[(SettingKey, &str)]) {
    let mut document = SettingsDocument::new();
    for (key, value) in pairs {
        document.upsert(key, *value);
    }
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, document.to_toml_string().unwrap()).unwrap();
}

// ── Bootstrap ─────────────────────────────────────────────────────────────────

#[test]
fn test_initialize_fresh_environment_writes_the_four_stubbed_pairs() {
    // Arrange
    let tmp = TempDir::new();
    let path = tmp.config_path();

    // Act
    let store = open_store(Some(path.clone()), stub_resolver(), StoreOptions::default())
        .expect("bootstrap must succeed");

    // Assert
    let on_disk = read_document(&path);
    assert_eq!(on_disk.len(), 4);
    assert_eq!(on_disk.get(&SettingKey::CheckForUpdates), Some("true"));
    assert_eq!(on_disk.get(&SettingKey::MinimalInstall), Some("false"));
    assert_eq!(on_disk.get(&SettingKey::DownloadLocation), Some("/tmp/drv"));
    assert_eq!(on_disk.get(&SettingKey::DriverType), Some("grd"));
    assert_eq!(on_disk.get(&SettingKey::GpuId), None, "GPU ID is lazy-only");

    // Prompts happen once each, in bootstrap order.
    assert_eq!(store.resolver().prompted(), &SettingKey::MANDATORY);
    assert!(matches!(
        store.resolver().notices().first(),
        Some(Notice::GeneratingConfig { .. })
    ));
}

#[test]
fn test_initialize_in_confirm_mode_skips_yes_no_prompts() {
    // Arrange
    let tmp = TempDir::new();
    let path = tmp.config_path();
    let options = StoreOptions {
        confirm: true,
        ..StoreOptions::default()
    };

    // Act
    let store = open_store(Some(path.clone()), stub_resolver(), options).unwrap();

    // Assert
    let on_disk = read_document(&path);
    assert_eq!(on_disk.get(&SettingKey::CheckForUpdates), Some("false"));
    assert_eq!(on_disk.get(&SettingKey::MinimalInstall), Some("false"));
    assert_eq!(
        store.resolver().prompted(),
        &[SettingKey::DownloadLocation, SettingKey::DriverType]
    );
}

#[test]
fn test_second_run_reuses_existing_file_without_prompting() {
    // Arrange
    let tmp = TempDir::new();
    let path = tmp.config_path();
    open_store(Some(path.clone()), stub_resolver(), StoreOptions::default()).unwrap();

    // Act
    let mut store = open_store(Some(path), ScriptedResolver::new(), StoreOptions::default())
        .expect("second run");

    // Assert
    assert!(store.resolver().prompted().is_empty());
    assert!(store.check_for_updates().unwrap());
    assert!(!store.minimal_install().unwrap());
}

// ── Lazy provisioning ─────────────────────────────────────────────────────────

#[test]
fn test_missing_driver_type_is_resolved_once_and_persisted() {
    // Arrange
    let tmp = TempDir::new();
    let path = tmp.config_path();
    write_document(
        &path,
        &[
            (SettingKey::CheckForUpdates, "true"),
            (SettingKey::MinimalInstall, "false"),
            (SettingKey::DownloadLocation, "/tmp/drv"),
        ],
    );
    let resolver = ScriptedResolver::new().with_answer(SettingKey::DriverType, "sd");
    let mut store = SettingsStore::new(ConfigFile::new(&path), resolver, StoreOptions::default());

    // Act
    let value = store
        .read_setting(&SettingKey::DriverType, None, true)
        .unwrap();

    // Assert
    assert_eq!(value.as_deref(), Some("sd"));
    assert_eq!(store.resolver().prompt_count(&SettingKey::DriverType), 1);
    assert_eq!(read_document(&path).get(&SettingKey::DriverType), Some("sd"));
}

#[test]
fn test_gpu_id_is_provisioned_from_payload_on_first_use_only() {
    // Arrange
    let tmp = TempDir::new();
    let path = tmp.config_path();
    let resolver = stub_resolver().with_answer(SettingKey::GpuId, "2684");
    let mut store = open_store(Some(path.clone()), resolver, StoreOptions::default()).unwrap();
    let payload = SetupPayload::Gpus(vec![
        GpuCandidate::new("2204", "GeForce RTX 3090"),
        GpuCandidate::new("2684", "GeForce RTX 4090"),
    ]);

    // Act
    let first = store.gpu_id(Some(&payload)).unwrap();
    let second = store.gpu_id(Some(&payload)).unwrap();

    // Assert
    assert_eq!(first.as_deref(), Some("2684"));
    assert_eq!(second, first);
    assert_eq!(store.resolver().prompt_count(&SettingKey::GpuId), 1);
    assert_eq!(read_document(&path).len(), 5);
}

// ── Corruption ────────────────────────────────────────────────────────────────

#[test]
fn test_set_on_corrupt_file_wipes_it_and_is_fatal() {
    // Arrange
    let tmp = TempDir::new();
    let path = tmp.config_path();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "<configuration><appSettings><add key=").unwrap();
    let mut store = SettingsStore::new(
        ConfigFile::new(&path),
        ScriptedResolver::new(),
        StoreOptions::default(),
    );

    // Act
    let result = store.set_setting(&SettingKey::DriverType, "grd");

    // Assert
    let err = result.expect_err("write on a corrupt file must be fatal");
    assert!(matches!(err, SettingsError::ConfigWiped { .. }));
    assert_eq!(err.exit_code(), 1);
    assert!(!path.exists(), "corrupt file must be deleted");
    assert!(store
        .resolver()
        .notices()
        .iter()
        .any(|n| matches!(n, Notice::ConfigWiped { .. })));
}

#[test]
fn test_startup_on_corrupt_file_reads_nothing_and_keeps_the_file() {
    // Arrange
    let tmp = TempDir::new();
    let path = tmp.config_path();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "\"Driver type\" = = \"grd\"").unwrap();

    // Act
    let mut store = open_store(Some(path.clone()), ScriptedResolver::new(), StoreOptions::default())
        .expect("reads never fail fatally");

    // Assert
    assert!(store.resolver().prompted().is_empty());
    assert!(store.backend().exists());
    assert_eq!(store.lookup(&SettingKey::DriverType), None);
}

#[test]
fn test_bool_repair_on_corrupt_file_wipes_it() {
    // Arrange
    let tmp = TempDir::new();
    let path = tmp.config_path();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, "[app_settings]\n\"Check for Updates\" = 1\n").unwrap();
    let resolver = ScriptedResolver::new().with_answer(SettingKey::CheckForUpdates, "true");
    let mut store = SettingsStore::new(ConfigFile::new(&path), resolver, StoreOptions::default());

    // Act
    let result = store.check_for_updates();

    // Assert
    assert!(matches!(result, Err(SettingsError::ConfigWiped { .. })));
    assert!(!path.exists());
}
