//! On-disk settings document and its TOML codec.

pub mod codec;

pub use codec::{DocumentError, SettingsDocument};
