//! Push Use Case
//!
//! Orchestrates the deploy flow:
//! 1. Check both tree roots
//! 2. Initialise the transport and the record mirror
//! 3. Run the diff engine, applying each command to the transport and then,
//!    only once that succeeded, to the record
//! 4. Clean up both deployers whatever happened
//!
//! The record therefore never claims something the transport did not get.

use tracing::{info, warn};

use crate::domain::entities::DeployCommand;
use crate::domain::ports::{ContentTransformer, Deployer};
use crate::domain::services::{deploy_changes, validate_roots, DiffSummary};
use crate::domain::value_objects::SyncSettings;
use crate::error::{DeployError, DeployResult};

use super::counts::CommandCounts;

/// Result of a completed push
#[derive(Debug, Clone)]
pub struct PushReport {
    /// Name of the transport deployer
    pub transport: &'static str,
    pub counts: CommandCounts,
    pub summary: DiffSummary,
}

impl PushReport {
    pub fn has_changes(&self) -> bool {
        !self.counts.is_empty()
    }
}

pub struct PushUseCase<'a, T: ContentTransformer + ?Sized> {
    settings: &'a SyncSettings,
    transformer: &'a T,
}

impl<'a, T: ContentTransformer + ?Sized> PushUseCase<'a, T> {
    pub fn new(settings: &'a SyncSettings, transformer: &'a T) -> Self {
        Self {
            settings,
            transformer,
        }
    }

    /// Push to `transport`, mirroring into `record`
    pub fn execute<D, R>(&self, transport: &mut D, record: &mut R) -> DeployResult<PushReport>
    where
        D: Deployer + ?Sized,
        R: Deployer + ?Sized,
    {
        validate_roots(self.settings)?;

        transport
            .initialise()
            .map_err(|e| DeployError::deployer(transport.name(), e))?;
        if let Err(e) = record.initialise() {
            let err = DeployError::deployer(record.name(), e);
            cleanup(transport);
            return Err(err);
        }

        let mut counts = CommandCounts::default();
        let outcome = deploy_changes(self.settings, self.transformer, |cmd: DeployCommand| {
            transport
                .apply_command(&cmd)
                .map_err(|e| DeployError::deployer(transport.name(), e))?;
            record
                .apply_command(&cmd)
                .map_err(|e| DeployError::deployer(record.name(), e))?;
            counts.record(cmd.kind());
            Ok(())
        });

        cleanup(transport);
        cleanup(record);

        let summary = outcome?;
        info!(
            transport = transport.name(),
            commands = counts.total(),
            "push finished"
        );
        Ok(PushReport {
            transport: transport.name(),
            counts,
            summary,
        })
    }
}

/// Release a deployer. Failures here cannot undo what was applied, so they
/// are logged rather than returned.
fn cleanup<D: Deployer + ?Sized>(deployer: &mut D) {
    if let Err(e) = deployer.cleanup() {
        warn!(deployer = deployer.name(), "cleanup failed: {e}");
    }
}
