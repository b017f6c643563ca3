//! Infrastructure layer for the settings store.
//!
//! Contains OS-facing adapters: the TOML settings file on disk and the
//! console prompts, plus the in-memory and scripted doubles used by tests.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `drvcheck_core`, but MUST NOT be imported by the `application` layer.

pub mod resolver;
pub mod storage;
