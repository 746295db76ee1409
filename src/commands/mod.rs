//! Command handlers for the sitepush binary
//!
//! Each handler resolves configuration, wires the use case to concrete
//! deployers and renders the result in the requested format.

pub mod init;
pub mod preview;
pub mod push;

use anyhow::{anyhow, Result};
use serde_json::json;

use sitepush::config::{self, Config};
use sitepush::logging;
use sitepush::presentation::output::emit_json;
use sitepush::presentation::{Cli, OutputFormat};

/// Resolve configuration for this invocation and start logging.
///
/// Logging can only start once the configuration is known, since its
/// `verbose`/`debug` keys raise the log level.
pub fn load_config(cli: &Cli) -> Result<Config> {
    let (config, warnings) = config::resolve(cli.config.as_deref(), &cli.command.overrides())?;
    logging::init(logging::level_for(cli.verbose, config.verbose, config.debug))
        .map_err(|e| anyhow!("failed to initialise logging: {e}"))?;
    config::report(&config, &warnings);
    Ok(config)
}

pub fn report_error(err: &anyhow::Error, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let doc = json!({ "success": false, "error": format!("{err:#}") });
            if emit_json(&doc).is_err() {
                eprintln!("Error: {err:#}");
            }
        }
        OutputFormat::Text => eprintln!("Error: {err:#}"),
    }
}
