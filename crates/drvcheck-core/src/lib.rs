//! # drvcheck-core
//!
//! Shared domain types for the drvcheck settings layer: the recognized
//! setting keys, driver channels, the GPU payload handed to GPU selection,
//! and the codec for the on-disk settings document.
//!
//! This crate has no file-system, console, or logging dependencies.  The
//! settings store in `drvcheck-settings` builds on it.
//!
//! # Architecture overview
//!
//! - **`domain`** – What a setting *is*: [`SettingKey`] with the five
//!   recognized keys, the `"true"`/`"false"` boolean encoding, and the
//!   [`DriverType`] tags stored under `Driver type`.
//!
//! - **`document`** – How settings look on disk.  A [`SettingsDocument`] is
//!   a flat key → value map serialised as a TOML `[app_settings]` table.

pub mod document;
pub mod domain;

pub use document::codec::{DocumentError, SettingsDocument};
pub use domain::driver::{DriverType, GpuCandidate, SetupPayload, UnknownDriverType};
pub use domain::key::{decode_bool, encode_bool, SettingKey};
