//! Interactive confirmation

use std::io;
use std::path::Path;

use dialoguer::Confirm;
use is_terminal::IsTerminal;

use crate::error::{DeployError, DeployResult};

/// Ask before emptying the record directory.
///
/// `--yes` answers for the user. Without a terminal on stdin there is nobody
/// to ask, so the answer is no.
pub fn confirm_empty_record(path: &Path, entries: usize, assume_yes: bool) -> DeployResult<bool> {
    if assume_yes {
        return Ok(true);
    }
    if !io::stdin().is_terminal() {
        tracing::warn!("stdin is not a terminal; pass --yes to empty the record directory");
        return Ok(false);
    }

    Confirm::new()
        .with_prompt(format!(
            "Delete {entries} entries from {}? The next push will re-send every file",
            path.display()
        ))
        .default(false)
        .interact()
        .map_err(|e| DeployError::io(path, io::Error::other(e)))
}
