//! Init command - write a config template or reset the record directory

use std::path::Path;

use anyhow::Result;

use sitepush::application::InitUseCase;
use sitepush::config::CONFIG_FILE_NAME;
use sitepush::presentation::output::{emit_json, init_json, render_init};
use sitepush::presentation::prompt::confirm_empty_record;
use sitepush::presentation::{Cli, OutputFormat};
use sitepush::DeployError;

pub fn cmd_init(cli: &Cli, yes: bool, format: OutputFormat) -> Result<()> {
    let config = super::load_config(cli)?;
    let config_path = cli
        .config
        .as_deref()
        .unwrap_or_else(|| Path::new(CONFIG_FILE_NAME));

    let outcome = InitUseCase::new(config_path, &config.record_dir)
        .execute(|path, entries| confirm_empty_record(path, entries, yes));

    let outcome = match outcome {
        Err(DeployError::Aborted) if format == OutputFormat::Text => {
            println!("Aborted.");
            return Ok(());
        }
        other => other?,
    };

    match format {
        OutputFormat::Json => emit_json(&init_json(&outcome))?,
        OutputFormat::Text => print!("{}", render_init(&outcome)),
    }
    Ok(())
}
