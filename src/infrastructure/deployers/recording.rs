//! In-memory deployer
//!
//! Keeps every applied command. Backs `preview` and is handy in tests, where
//! it can also be told to fail a given command.

use crate::domain::entities::DeployCommand;
use crate::domain::ports::{Deployer, DeployerError};

#[derive(Debug, Default)]
pub struct RecordingDeployer {
    commands: Vec<DeployCommand>,
    initialised: bool,
    cleanups: usize,
    fail_at: Option<usize>,
}

impl RecordingDeployer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject the command with this zero-based index
    pub fn failing_at(mut self, index: usize) -> Self {
        self.fail_at = Some(index);
        self
    }

    pub fn commands(&self) -> &[DeployCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DeployCommand> {
        self.commands
    }

    pub fn is_initialised(&self) -> bool {
        self.initialised
    }

    /// How many times `cleanup` ran
    pub fn cleanups(&self) -> usize {
        self.cleanups
    }
}

impl Deployer for RecordingDeployer {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn initialise(&mut self) -> Result<(), DeployerError> {
        self.initialised = true;
        Ok(())
    }

    fn apply_command(&mut self, cmd: &DeployCommand) -> Result<(), DeployerError> {
        if !self.initialised {
            return Err(DeployerError::NotInitialised(self.name()));
        }
        if self.fail_at == Some(self.commands.len()) {
            return Err(DeployerError::CommandFailed(format!(
                "refused {} {}",
                cmd.description(),
                cmd.rel_path()
            )));
        }
        self.commands.push(cmd.clone());
        Ok(())
    }

    fn cleanup(&mut self) -> Result<(), DeployerError> {
        self.initialised = false;
        self.cleanups += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::RelPath;

    #[test]
    fn records_in_order() {
        let mut deployer = RecordingDeployer::new();
        deployer.initialise().unwrap();
        deployer
            .apply_command(&DeployCommand::dir_add(RelPath::parse("a")))
            .unwrap();
        deployer
            .apply_command(&DeployCommand::file_delete(RelPath::parse("b")))
            .unwrap();
        deployer.cleanup().unwrap();

        let labels: Vec<String> = deployer.commands().iter().map(|c| c.to_string()).collect();
        assert_eq!(labels, vec!["ADD DIR /a", "DELETE FILE /b"]);
        assert_eq!(deployer.cleanups(), 1);
        assert!(!deployer.is_initialised());
    }

    #[test]
    fn fails_at_requested_index() {
        let mut deployer = RecordingDeployer::new().failing_at(1);
        deployer.initialise().unwrap();

        deployer
            .apply_command(&DeployCommand::dir_add(RelPath::parse("a")))
            .unwrap();
        let err = deployer
            .apply_command(&DeployCommand::dir_add(RelPath::parse("b")))
            .unwrap_err();

        assert!(err.to_string().contains("ADD DIR /b"));
        assert_eq!(deployer.into_commands().len(), 1);
    }
}
