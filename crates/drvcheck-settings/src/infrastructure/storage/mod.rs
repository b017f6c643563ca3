//! Storage infrastructure: settings file persistence.
//!
//! - **`config`** – The settings file at the platform-appropriate per-user
//!   location, its [`crate::application::backend::SettingsBackend`]
//!   implementation, and [`config::open_store`], the startup entry point.
//!
//! - **`memory`** – An in-memory backend that can hold corrupt text or fail
//!   on save, for exercising the wipe path without a file system.

pub mod config;
pub mod memory;
