//! Deployer Port
//!
//! The capability every transport backend provides. The diff engine never
//! sees a deployer; callers wire one or more of them into the command handler
//! (typically the real transport followed by the local record mirror).

use thiserror::Error;

use crate::domain::entities::DeployCommand;

/// Error raised by a deployer
#[derive(Error, Debug)]
pub enum DeployerError {
    /// Required connection settings are missing
    #[error("missing settings: {}", .0.join(", "))]
    MissingSettings(Vec<String>),

    /// Local or remote I/O failure
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Could not reach or authenticate against the remote host
    #[error("connection error: {0}")]
    Connection(String),

    /// The remote side rejected a command
    #[error("command failed: {0}")]
    CommandFailed(String),

    /// A command was applied before `initialise` succeeded
    #[error("deployer '{0}' is not initialised")]
    NotInitialised(&'static str),
}

impl DeployerError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Applies deploy commands to one concrete destination.
///
/// Implementations must be idempotent against partially completed earlier
/// runs: deleting something that is already gone and creating a directory
/// that already exists both succeed.
pub trait Deployer {
    /// Short name for logs and error messages
    fn name(&self) -> &'static str;

    /// Validate configuration and open any connection
    fn initialise(&mut self) -> Result<(), DeployerError>;

    /// Apply exactly one command
    fn apply_command(&mut self, cmd: &DeployCommand) -> Result<(), DeployerError>;

    /// Release resources. Called once per run whatever the outcome.
    fn cleanup(&mut self) -> Result<(), DeployerError>;
}

impl<D: Deployer + ?Sized> Deployer for Box<D> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn initialise(&mut self) -> Result<(), DeployerError> {
        (**self).initialise()
    }

    fn apply_command(&mut self, cmd: &DeployCommand) -> Result<(), DeployerError> {
        (**self).apply_command(cmd)
    }

    fn cleanup(&mut self) -> Result<(), DeployerError> {
        (**self).cleanup()
    }
}
