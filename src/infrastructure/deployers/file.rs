//! Local directory deployer
//!
//! Mirrors commands into a directory on the local disk. Used for the
//! last-deployed record and as the `file` transport.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, trace};

use crate::domain::entities::{CommandKind, DeployCommand};
use crate::domain::ports::{Deployer, DeployerError};

#[derive(Debug, Clone)]
pub struct FileDeployer {
    name: &'static str,
    target_dir: PathBuf,
    ready: bool,
}

impl FileDeployer {
    pub fn new(target_dir: impl Into<PathBuf>) -> Self {
        Self {
            name: "file",
            target_dir: target_dir.into(),
            ready: false,
        }
    }

    /// Same deployer, reported under another name (e.g. "record")
    pub fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }
}

impl Deployer for FileDeployer {
    fn name(&self) -> &'static str {
        self.name
    }

    fn initialise(&mut self) -> Result<(), DeployerError> {
        if self.target_dir.as_os_str().is_empty() {
            return Err(DeployerError::MissingSettings(vec![format!(
                "{} directory",
                self.name
            )]));
        }
        let meta = fs::metadata(&self.target_dir)
            .map_err(|e| DeployerError::io(self.target_dir.display().to_string(), e))?;
        if !meta.is_dir() {
            return Err(DeployerError::io(
                self.target_dir.display().to_string(),
                io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
            ));
        }
        debug!(deployer = self.name, dir = %self.target_dir.display(), "initialised");
        self.ready = true;
        Ok(())
    }

    fn apply_command(&mut self, cmd: &DeployCommand) -> Result<(), DeployerError> {
        if !self.ready {
            return Err(DeployerError::NotInitialised(self.name));
        }

        let path = cmd.rel_path().to_native(&self.target_dir);
        trace!(deployer = self.name, path = %path.display(), "{}", cmd.description());
        let result = match cmd.kind() {
            CommandKind::FileAdd | CommandKind::FileUpdate => write_atomic(&path, cmd.contents()),
            CommandKind::DirAdd => fs::create_dir_all(&path),
            CommandKind::FileDelete => ignore_missing(fs::remove_file(&path)),
            CommandKind::DirDelete => ignore_missing(fs::remove_dir_all(&path)),
        };
        result.map_err(|e| DeployerError::io(path.display().to_string(), e))
    }

    fn cleanup(&mut self) -> Result<(), DeployerError> {
        self.ready = false;
        Ok(())
    }
}

/// Write through a temp file in the same directory, then rename over `path`.
fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

fn ignore_missing(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}
