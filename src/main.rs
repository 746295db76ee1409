//! sitepush CLI - mirror a static site build onto a web host
//!
//! Usage: sitepush <COMMAND>
//!
//! Commands:
//!   push     Send changed files to the configured target
//!   preview  List the changes a push would send
//!   init     Write a config template, or reset the record directory

mod commands;

use clap::Parser;

use sitepush::presentation::{Cli, Commands, OutputFormat};

fn main() {
    let cli = Cli::parse();
    let format = OutputFormat::from_json_flag(cli.json);

    let result = match &cli.command {
        Commands::Push { dry_run: true, .. } | Commands::Preview { .. } => {
            commands::preview::cmd_preview(&cli, format)
        }
        Commands::Push { .. } => commands::push::cmd_push(&cli, format),
        Commands::Init { yes } => commands::init::cmd_init(&cli, *yes, format),
    };

    if let Err(err) = result {
        commands::report_error(&err, format);
        std::process::exit(1);
    }
}
