//! Interactive resolver implementations.
//!
//! - **`console`** – Line-based prompts on any `BufRead` / `Write` pair,
//!   normally stdin, prompting on stderr.
//!
//! - **`scripted`** – Deterministic answers keyed by setting, recording every
//!   prompt and notice.  Used by integration tests and headless runs.

pub mod console;
pub mod scripted;
