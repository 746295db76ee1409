//! Push command - send changes to the configured target

use anyhow::{Context, Result};

use sitepush::application::PushUseCase;
use sitepush::infrastructure::{transport_for, FileDeployer, Minifier};
use sitepush::presentation::output::{emit_json, push_json, render_push};
use sitepush::presentation::{Cli, OutputFormat};

pub fn cmd_push(cli: &Cli, format: OutputFormat) -> Result<()> {
    let config = super::load_config(cli)?;
    let settings = config.sync_settings();

    let mut transport = transport_for(&config)?;
    let target = transport.name();
    let mut record = FileDeployer::new(settings.dest_dir()).named("record");

    let report = PushUseCase::new(&settings, &Minifier)
        .execute(&mut transport, &mut record)
        .with_context(|| format!("push to {target} failed"))?;

    match format {
        OutputFormat::Json => emit_json(&push_json(&report))?,
        OutputFormat::Text => print!("{}", render_push(&report, supports_unicode())),
    }
    Ok(())
}

fn supports_unicode() -> bool {
    std::env::var("TERM").map_or(true, |term| term != "dumb")
}
