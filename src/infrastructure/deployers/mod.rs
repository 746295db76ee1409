//! Deployer implementations
//!
//! - `file` - local directory (record mirror and `file` target)
//! - `ftp` - FTP / explicit FTPS
//! - `ssh` - system `ssh` client
//! - `recording` - in memory, for previews and tests

mod file;
mod ftp;
mod recording;
mod ssh;

pub use file::FileDeployer;
pub use ftp::FtpDeployer;
pub use recording::RecordingDeployer;
pub use ssh::SshDeployer;

use crate::config::{Config, TargetKind};
use crate::domain::ports::Deployer;
use crate::error::{DeployError, DeployResult};

/// The transport `push` sends commands through, as configured by `[target]`
pub fn transport_for(config: &Config) -> DeployResult<Box<dyn Deployer>> {
    let deployer: Box<dyn Deployer> = match config.target.kind {
        TargetKind::Ftp => Box::new(FtpDeployer::new(config.ftp.clone())),
        TargetKind::Ssh => Box::new(SshDeployer::new(config.ssh.clone())),
        TargetKind::File => {
            let dir = config
                .file
                .dir
                .clone()
                .ok_or_else(|| DeployError::MissingSetting {
                    key: "file.dir".to_string(),
                })?;
            Box::new(FileDeployer::new(dir).named("file"))
        }
    };
    Ok(deployer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn transport_follows_target_kind() {
        let mut config = Config::default();
        assert_eq!(transport_for(&config).unwrap().name(), "ftp");

        config.target.kind = TargetKind::Ssh;
        assert_eq!(transport_for(&config).unwrap().name(), "ssh");

        config.target.kind = TargetKind::File;
        config.file.dir = Some(PathBuf::from("/mnt/site"));
        assert_eq!(transport_for(&config).unwrap().name(), "file");
    }

    #[test]
    fn file_target_requires_dir() {
        let mut config = Config::default();
        config.target.kind = TargetKind::File;

        let err = transport_for(&config).err().unwrap();
        assert!(matches!(err, DeployError::MissingSetting { ref key } if key == "file.dir"));
    }
}
