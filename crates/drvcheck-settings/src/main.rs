//! drvcheck settings tool entry point.
//!
//! Opens (and on first run, generates) the settings file of the GPU driver
//! updater, then reads or writes individual settings.  Missing settings are
//! asked for on the console.
//!
//! # Usage
//!
//! ```text
//! drvcheck-settings [OPTIONS] <COMMAND>
//!
//! Commands:
//!   verify                 Check that all mandatory settings are present
//!   path                   Print the settings file location
//!   get <KEY>              Print a setting, asking for it if missing
//!   get-bool <KEY>         Print a boolean setting
//!   set <KEY> <VALUE>      Store a setting
//!   setup <KEY>            Ask for a setting again and store the answer
//!
//! Options:
//!   --config <PATH>        Settings file to use instead of the default
//!   --confirm              Non-interactive: yes/no settings default to "false"
//!   --debug                Verbose logging
//! ```
//!
//! Only command results go to stdout.  Prompts, notices and logs go to
//! stderr.
//!
//! # Environment variable overrides
//!
//! | Variable           | Description                        |
//! |--------------------|------------------------------------|
//! | `DRVCHECK_CONFIG`  | Same as `--config`                 |
//! | `RUST_LOG`         | Log filter, overrides `--debug`    |
//!
//! # Exit status
//!
//! `1` when the settings file had to be wiped after a failed write (run the
//! tool again to set it up) or the settings location cannot be determined;
//! `0` otherwise.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use drvcheck_core::{GpuCandidate, SettingKey, SetupPayload};
use drvcheck_settings::application::settings_store::{
    SettingsError, StoreOptions, FATAL_EXIT_CODE,
};
use drvcheck_settings::infrastructure::resolver::console::ConsoleResolver;
use drvcheck_settings::infrastructure::storage::config::{self, ConfigError};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Settings tool for the drvcheck GPU driver updater.
#[derive(Debug, Parser)]
#[command(
    name = "drvcheck-settings",
    about = "Inspect and edit the drvcheck GPU driver updater settings",
    version
)]
struct Cli {
    /// Settings file to use instead of the per-user default.
    #[arg(long, env = "DRVCHECK_CONFIG")]
    config: Option<PathBuf>,

    /// Non-interactive mode: yes/no settings take "false" without asking,
    /// and a wiped settings file does not wait for Enter.
    #[arg(long)]
    confirm: bool,

    /// Log at debug level (RUST_LOG takes precedence).
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check that all mandatory settings are present and print them.
    Verify,
    /// Print the settings file location.
    Path,
    /// Print a setting, asking for it if missing.
    Get {
        /// Setting key, e.g. "Driver type".
        key: String,
        /// Print nothing instead of asking when the setting is missing.
        #[arg(long)]
        no_setup: bool,
    },
    /// Print a boolean setting as "true" or "false".
    GetBool {
        key: String,
    },
    /// Store a setting.
    Set {
        key: String,
        value: String,
    },
    /// Ask for a setting again and store the answer.
    Setup {
        key: String,
        /// GPU to offer when setting up "GPU ID", as ID=NAME.  Repeatable.
        #[arg(long = "gpu", value_parser = parse_gpu)]
        gpus: Vec<GpuCandidate>,
    },
}

fn parse_gpu(raw: &str) -> Result<GpuCandidate, String> {
    match raw.split_once('=') {
        Some((id, name)) if !id.trim().is_empty() => {
            Ok(GpuCandidate::new(id.trim(), name.trim()))
        }
        _ => Err(format!("expected ID=NAME, got '{raw}'")),
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr so command output on stdout stays scriptable.
    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::from(exit_code_for(&err))
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    if let Command::Path = cli.command {
        let path = config::config_file_path(cli.config)?;
        println!("{}", path.display());
        return Ok(());
    }

    let options = StoreOptions {
        confirm: cli.confirm,
        download_suggestion: Some(std::env::temp_dir()),
    };
    let resolver = if cli.confirm {
        ConsoleResolver::stdio()
    } else {
        ConsoleResolver::stdio().pause_on_wipe()
    };
    let mut store = config::open_store(cli.config, resolver, options)
        .context("failed to open settings")?;
    info!(path = %store.backend().path().display(), "settings ready");

    match cli.command {
        Command::Verify => {
            for (key, value) in store.verify_config()? {
                println!("{key}: {}", value.unwrap_or_default());
            }
        }
        Command::Path => {}
        Command::Get { key, no_setup } => {
            let key = known_key(key);
            if let Some(value) = store.read_setting(&key, None, !no_setup)? {
                println!("{value}");
            }
        }
        Command::GetBool { key } => {
            println!("{}", store.read_setting_bool(&known_key(key))?);
        }
        Command::Set { key, value } => {
            store.set_setting(&known_key(key), &value)?;
        }
        Command::Setup { key, gpus } => {
            let payload = (!gpus.is_empty()).then(|| SetupPayload::Gpus(gpus));
            let value = store.setup_setting(&known_key(key), payload.as_ref())?;
            println!("{value}");
        }
    }
    Ok(())
}

/// Parses a key argument, warning when it is not one of the known settings.
fn known_key(raw: String) -> SettingKey {
    let key = SettingKey::from(raw);
    if !key.is_recognized() {
        warn!(key = %key, "not a known setting key");
    }
    key
}

fn exit_code_for(err: &anyhow::Error) -> u8 {
    if let Some(e) = err.downcast_ref::<ConfigError>() {
        return e.exit_code();
    }
    if let Some(e) = err.downcast_ref::<SettingsError>() {
        return e.exit_code();
    }
    FATAL_EXIT_CODE
}

#[cfg(test)]
mod tests {
    use super::*;
    use drvcheck_settings::application::backend::BackendError;

    #[test]
    fn test_parse_gpu_splits_id_and_name() {
        let gpu = parse_gpu("2204=GeForce RTX 3090").unwrap();
        assert_eq!(gpu, GpuCandidate::new("2204", "GeForce RTX 3090"));
    }

    #[test]
    fn test_parse_gpu_rejects_missing_id() {
        assert!(parse_gpu("=GeForce").is_err());
        assert!(parse_gpu("2204").is_err());
    }

    #[test]
    fn test_cli_parses_setup_with_gpus() {
        let cli = Cli::try_parse_from([
            "drvcheck-settings",
            "--confirm",
            "setup",
            "GPU ID",
            "--gpu",
            "2204=RTX 3090",
            "--gpu",
            "2684=RTX 4090",
        ])
        .expect("valid arguments");

        assert!(cli.confirm);
        match cli.command {
            Command::Setup { key, gpus } => {
                assert_eq!(key, "GPU ID");
                assert_eq!(gpus.len(), 2);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    fn wiped() -> SettingsError {
        let path = PathBuf::from("/tmp/app.config");
        SettingsError::ConfigWiped {
            path: path.clone(),
            source: BackendError::Io {
                path,
                source: std::io::Error::new(std::io::ErrorKind::InvalidData, "bad file"),
            },
        }
    }

    #[test]
    fn test_fatal_errors_map_to_exit_status_one() {
        let err = anyhow::Error::new(ConfigError::NoPlatformConfigDir);
        assert_eq!(exit_code_for(&err), 1);
    }

    #[test]
    fn test_wiped_settings_map_to_exit_status_one() {
        let err = anyhow::Error::new(wiped());
        assert_eq!(exit_code_for(&err), 1);
    }

    #[test]
    fn test_wipe_during_open_maps_to_exit_status_one_through_context() {
        // Arrange: the shape `run` produces when bootstrap hits a wipe
        let result: Result<(), ConfigError> = Err(ConfigError::Settings(wiped()));

        // Act
        let err = result.context("failed to open settings").unwrap_err();

        // Assert
        assert!(err.downcast_ref::<ConfigError>().is_some());
        assert_eq!(exit_code_for(&err), 1);
    }

    #[test]
    fn test_known_key_keeps_unrecognized_keys_verbatim() {
        assert_eq!(known_key("Driver type".to_string()), SettingKey::DriverType);
        assert_eq!(
            known_key("Theme".to_string()),
            SettingKey::Other("Theme".to_string())
        );
    }
}
