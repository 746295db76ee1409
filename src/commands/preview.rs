//! Preview command - list what a push would send

use anyhow::Result;

use sitepush::application::PreviewUseCase;
use sitepush::infrastructure::Minifier;
use sitepush::presentation::output::{emit_json, preview_json, render_preview};
use sitepush::presentation::{Cli, OutputFormat};

pub fn cmd_preview(cli: &Cli, format: OutputFormat) -> Result<()> {
    let config = super::load_config(cli)?;
    let settings = config.sync_settings();

    let report = PreviewUseCase::new(&settings, &Minifier).execute()?;

    match format {
        OutputFormat::Json => emit_json(&preview_json(&report))?,
        OutputFormat::Text => print!("{}", render_preview(&report)),
    }
    Ok(())
}
