//! Preview Use Case
//!
//! Runs the same comparison as `push` against the record directory but only
//! collects the commands. Nothing is connected to and nothing is written.

use serde::Serialize;

use crate::domain::entities::DeployCommand;
use crate::domain::ports::{ContentTransformer, Deployer};
use crate::domain::services::{deploy_changes, DiffSummary};
use crate::domain::value_objects::{ContentHash, SyncSettings};
use crate::error::{DeployError, DeployResult};
use crate::infrastructure::RecordingDeployer;

use super::counts::CommandCounts;

/// One command that `push` would send
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedChange {
    /// `dir_add`, `file_add`, ...
    pub kind: &'static str,
    /// Human label, e.g. `ADD DIR`
    #[serde(skip)]
    pub label: &'static str,
    pub path: String,
    /// Payload size, for file adds and updates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

impl From<&DeployCommand> for PlannedChange {
    fn from(cmd: &DeployCommand) -> Self {
        let carries = cmd.kind().carries_contents();
        Self {
            kind: cmd.kind().as_str(),
            label: cmd.description(),
            path: cmd.rel_path().to_string(),
            bytes: carries.then(|| cmd.contents().len()),
            sha256: carries.then(|| ContentHash::from_bytes(cmd.contents()).to_string()),
        }
    }
}

/// Everything `preview` found
#[derive(Debug, Clone, Serialize)]
pub struct PreviewReport {
    pub changes: Vec<PlannedChange>,
    pub counts: CommandCounts,
    #[serde(skip)]
    pub summary: DiffSummary,
}

impl PreviewReport {
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }
}

pub struct PreviewUseCase<'a, T: ContentTransformer + ?Sized> {
    settings: &'a SyncSettings,
    transformer: &'a T,
}

impl<'a, T: ContentTransformer + ?Sized> PreviewUseCase<'a, T> {
    pub fn new(settings: &'a SyncSettings, transformer: &'a T) -> Self {
        Self {
            settings,
            transformer,
        }
    }

    pub fn execute(&self) -> DeployResult<PreviewReport> {
        let mut recorder = RecordingDeployer::new();
        recorder
            .initialise()
            .map_err(|e| DeployError::deployer(recorder.name(), e))?;

        let summary = deploy_changes(self.settings, self.transformer, |cmd| {
            recorder
                .apply_command(&cmd)
                .map_err(|e| DeployError::deployer(recorder.name(), e))
        })?;
        recorder
            .cleanup()
            .map_err(|e| DeployError::deployer(recorder.name(), e))?;

        let commands = recorder.into_commands();
        let kinds: Vec<_> = commands.iter().map(|c| c.kind()).collect();
        Ok(PreviewReport {
            changes: commands.iter().map(PlannedChange::from).collect(),
            counts: kinds.iter().collect(),
            summary,
        })
    }
}
