//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--config, --json, --verbose) are accepted before or after the subcommand
//! - `push --dry-run` behaves exactly like `preview`

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::CliOverrides;

/// sitepush - mirror a static site build onto a web host
#[derive(Parser, Debug)]
#[command(name = "sitepush")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (default: ./sitepush.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print results as one JSON document
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send changed files to the configured target
    Push {
        #[command(flatten)]
        tree: TreeArgs,

        /// FTP password (overrides the config file and SITEPUSH_FTP_PASSWORD)
        #[arg(long, value_name = "PW")]
        ftp_password: Option<String>,

        /// Only show what would be sent (same as `preview`)
        #[arg(long)]
        dry_run: bool,
    },

    /// List the changes a push would send
    Preview {
        #[command(flatten)]
        tree: TreeArgs,
    },

    /// Write a config template, or reset the record directory
    Init {
        /// Empty the record directory without asking
        #[arg(short, long)]
        yes: bool,
    },
}

/// Options shared by `push` and `preview`
#[derive(Args, Debug, Default, Clone, PartialEq, Eq)]
pub struct TreeArgs {
    /// Directory holding the built site
    #[arg(short, long, value_name = "DIR")]
    pub source_dir: Option<PathBuf>,

    /// Directory mirroring what was last deployed
    #[arg(short, long, value_name = "DIR")]
    pub record_dir: Option<PathBuf>,

    /// Upload files as they are
    #[arg(short = 'm', long)]
    pub no_minify: bool,

    /// Name or relative path to leave alone (repeatable)
    #[arg(long, value_name = "PATTERN")]
    pub skip: Vec<String>,
}

impl TreeArgs {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            source_dir: self.source_dir.clone(),
            record_dir: self.record_dir.clone(),
            no_minify: self.no_minify,
            skip: self.skip.clone(),
            ftp_password: None,
        }
    }
}

impl Commands {
    /// Configuration overrides carried by this subcommand
    pub fn overrides(&self) -> CliOverrides {
        match self {
            Self::Push {
                tree, ftp_password, ..
            } => CliOverrides {
                ftp_password: ftp_password.clone(),
                ..tree.overrides()
            },
            Self::Preview { tree } => tree.overrides(),
            Self::Init { .. } => CliOverrides::default(),
        }
    }
}
