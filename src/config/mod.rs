//! Configuration module for sitepush
//!
//! Values are layered, highest priority first:
//! 1. CLI flags
//! 2. Environment variables (SITEPUSH_*)
//! 3. Configuration file (`sitepush.toml` or `--config PATH`)
//! 4. Built-in defaults
//!
//! Relative directories in the file are taken relative to the file itself.

mod loader;
mod types;

use std::path::Path;

use tracing::{debug, warn};

use crate::error::DeployResult;

pub use loader::{
    ConfigWarning, CONFIG_FILE_NAME, ENV_FTP_PASSWORD, ENV_MINIFY, ENV_RECORD_DIR, ENV_SKIP,
    ENV_SOURCE_DIR, ENV_TARGET,
};
pub use types::{
    CliOverrides, Config, FileTargetConfig, FtpConfig, SshConfig, TargetConfig, TargetKind,
};

/// Produce the effective configuration for one invocation.
///
/// Nothing is logged here: the log level itself depends on the result, so
/// callers pass the outcome to [`report`] once logging is set up.
pub fn resolve(
    config_path: Option<&Path>,
    cli: &CliOverrides,
) -> DeployResult<(Config, Vec<ConfigWarning>)> {
    let path = config_path.unwrap_or_else(|| Path::new(CONFIG_FILE_NAME));
    let (config, warnings) = Config::load_or_default(path)?;
    let base = path.parent().unwrap_or_else(|| Path::new(""));
    let config = config
        .resolve_relative_to(base)
        .with_env_overrides()
        .with_cli_overrides(cli);
    Ok((config, warnings))
}

/// Log unknown keys and the effective settings
pub fn report(config: &Config, warnings: &[ConfigWarning]) {
    for warning in warnings {
        match &warning.suggestion {
            Some(suggestion) => warn!(
                file = %warning.file.display(),
                line = warning.line,
                "unknown configuration key '{}', did you mean '{}'?",
                warning.key,
                suggestion
            ),
            None => warn!(
                file = %warning.file.display(),
                line = warning.line,
                "unknown configuration key '{}'",
                warning.key
            ),
        }
    }

    debug!(
        source_dir = %config.source_dir.display(),
        record_dir = %config.record_dir.display(),
        minify = config.minify,
        skip = ?config.skip,
        target = %config.target.kind,
        "configuration resolved"
    );
}
