//! Application layer for the settings store.
//!
//! Everything here depends on abstractions only: the backing resource is a
//! [`backend::SettingsBackend`] and the operator is an
//! [`resolver::InteractiveResolver`].  No file-system access, no console I/O.
//!
//! # Sub-modules
//!
//! - **`settings_store`** – The [`settings_store::SettingsStore`] use case:
//!   typed reads, upserts, on-demand provisioning of missing keys, bootstrap
//!   on first run, and the wipe-on-write-failure policy.
//!
//! - **`backend`** – Port for the persisted key/value document.
//!
//! - **`resolver`** – Port for obtaining values from the operator, plus the
//!   prompt and notice types passed across it.

pub mod backend;
pub mod resolver;
pub mod settings_store;
