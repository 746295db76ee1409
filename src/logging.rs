//! Diagnostic logging
//!
//! Logs go to stderr so stdout stays reserved for results (`--json` output
//! in particular). `RUST_LOG` takes precedence over everything else.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Level chosen from the `-v` count, raised by the `verbose`/`debug`
/// configuration keys.
pub fn level_for(verbosity: u8, verbose: bool, debug: bool) -> LevelFilter {
    let from_flags = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let floor = if debug {
        LevelFilter::TRACE
    } else if verbose {
        LevelFilter::INFO
    } else {
        LevelFilter::WARN
    };
    // LevelFilter orders OFF < ERROR < ... < TRACE
    from_flags.max(floor)
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init(level: LevelFilter) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format!("sitepush={level}")))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
}
