//! Init Use Case
//!
//! First run: write a commented configuration template. Later runs prepare
//! the record directory, creating it or emptying it so that the next push
//! re-sends the whole site.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::Config;
use crate::error::{DeployError, DeployResult};

/// What `init` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitOutcome {
    /// No configuration existed; a template was written here
    WroteTemplate(PathBuf),
    /// The record directory did not exist and was created
    CreatedRecordDir(PathBuf),
    /// The record directory was emptied
    EmptiedRecordDir { path: PathBuf, removed: usize },
}

pub struct InitUseCase<'a> {
    config_path: &'a Path,
    record_dir: &'a Path,
}

impl<'a> InitUseCase<'a> {
    /// `record_dir` is the resolved record directory from `config_path`
    pub fn new(config_path: &'a Path, record_dir: &'a Path) -> Self {
        Self {
            config_path,
            record_dir,
        }
    }

    /// `confirm` is asked before anything is deleted
    pub fn execute<F>(&self, confirm: F) -> DeployResult<InitOutcome>
    where
        F: FnOnce(&Path, usize) -> DeployResult<bool>,
    {
        if !self.config_path.exists() {
            write_template(self.config_path)?;
            info!(file = %self.config_path.display(), "wrote configuration template");
            return Ok(InitOutcome::WroteTemplate(self.config_path.to_path_buf()));
        }

        match fs::metadata(self.record_dir) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                fs::create_dir_all(self.record_dir)
                    .map_err(|e| DeployError::io(self.record_dir, e))?;
                info!(dir = %self.record_dir.display(), "created record directory");
                Ok(InitOutcome::CreatedRecordDir(self.record_dir.to_path_buf()))
            }
            Err(e) => Err(DeployError::io(self.record_dir, e)),
            Ok(meta) if !meta.is_dir() => Err(DeployError::NotADirectory {
                role: "Record",
                path: self.record_dir.to_path_buf(),
            }),
            Ok(_) => {
                let entries = list_entries(self.record_dir)?;
                if !entries.is_empty() && !confirm(self.record_dir, entries.len())? {
                    return Err(DeployError::Aborted);
                }
                for entry in &entries {
                    remove_entry(entry)?;
                }
                info!(
                    dir = %self.record_dir.display(),
                    removed = entries.len(),
                    "emptied record directory"
                );
                Ok(InitOutcome::EmptiedRecordDir {
                    path: self.record_dir.to_path_buf(),
                    removed: entries.len(),
                })
            }
        }
    }
}

fn write_template(path: &Path) -> DeployResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| DeployError::io(parent, e))?;
    }
    // create_new: never clobber a file that appeared meanwhile
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| DeployError::io(path, e))?;
    io::Write::write_all(&mut file, Config::template().as_bytes())
        .map_err(|e| DeployError::io(path, e))
}

fn list_entries(dir: &Path) -> DeployResult<Vec<PathBuf>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| DeployError::io(dir, e))? {
        let entry = entry.map_err(|e| DeployError::io(dir, e))?;
        entries.push(entry.path());
    }
    entries.sort();
    Ok(entries)
}

fn remove_entry(path: &Path) -> DeployResult<()> {
    debug!(path = %path.display(), "removing");
    let meta = fs::symlink_metadata(path).map_err(|e| DeployError::io(path, e))?;
    let result = if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    result.map_err(|e| DeployError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn yes(_: &Path, _: usize) -> DeployResult<bool> {
        Ok(true)
    }

    #[test]
    fn writes_template_when_no_config() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("sitepush.toml");
        let record = dir.path().join("deployed");

        let outcome = InitUseCase::new(&config, &record).execute(yes).unwrap();

        assert_eq!(outcome, InitOutcome::WroteTemplate(config.clone()));
        assert_eq!(fs::read_to_string(&config).unwrap(), Config::template());
        assert!(!record.exists());
    }

    #[test]
    fn creates_missing_record_dir() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("sitepush.toml");
        fs::write(&config, "").unwrap();
        let record = dir.path().join("deployed");

        let outcome = InitUseCase::new(&config, &record).execute(yes).unwrap();

        assert_eq!(outcome, InitOutcome::CreatedRecordDir(record.clone()));
        assert!(record.is_dir());
    }

    #[test]
    fn empties_existing_record_dir_after_confirmation() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("sitepush.toml");
        fs::write(&config, "").unwrap();
        let record = dir.path().join("deployed");
        fs::create_dir_all(record.join("assets")).unwrap();
        fs::write(record.join("assets/app.js"), "x").unwrap();
        fs::write(record.join("index.html"), "x").unwrap();

        let mut asked = None;
        let outcome = InitUseCase::new(&config, &record)
            .execute(|path, count| {
                asked = Some((path.to_path_buf(), count));
                Ok(true)
            })
            .unwrap();

        assert_eq!(asked, Some((record.clone(), 2)));
        assert_eq!(
            outcome,
            InitOutcome::EmptiedRecordDir {
                path: record.clone(),
                removed: 2
            }
        );
        assert!(record.is_dir());
        assert_eq!(fs::read_dir(&record).unwrap().count(), 0);
    }

    #[test]
    fn declining_keeps_everything() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("sitepush.toml");
        fs::write(&config, "").unwrap();
        let record = dir.path().join("deployed");
        fs::create_dir_all(&record).unwrap();
        fs::write(record.join("index.html"), "x").unwrap();

        let err = InitUseCase::new(&config, &record)
            .execute(|_, _| Ok(false))
            .unwrap_err();

        assert!(matches!(err, DeployError::Aborted));
        assert!(record.join("index.html").exists());
    }

    #[test]
    fn empty_record_dir_needs_no_confirmation() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("sitepush.toml");
        fs::write(&config, "").unwrap();
        let record = dir.path().join("deployed");
        fs::create_dir_all(&record).unwrap();

        let outcome = InitUseCase::new(&config, &record)
            .execute(|_, _| panic!("should not ask"))
            .unwrap();

        assert!(matches!(outcome, InitOutcome::EmptiedRecordDir { removed: 0, .. }));
    }

    #[test]
    fn record_path_that_is_a_file_is_rejected() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("sitepush.toml");
        fs::write(&config, "").unwrap();
        let record = dir.path().join("deployed");
        fs::write(&record, "oops").unwrap();

        let err = InitUseCase::new(&config, &record).execute(yes).unwrap_err();
        assert!(matches!(err, DeployError::NotADirectory { role: "Record", .. }));
    }
}
