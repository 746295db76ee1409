//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Output formatting (text/JSON)
//! - Interactive confirmation
//!
//! Wiring use cases to deployers happens in the binary.

pub mod cli;
pub mod output;
pub mod prompt;

pub use cli::{Cli, Commands, TreeArgs};
pub use output::OutputFormat;
