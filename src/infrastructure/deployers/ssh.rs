//! SSH deployer
//!
//! Applies commands on a remote host through the system `ssh` client, one
//! remote shell command per deploy command. Authentication is whatever the
//! local ssh setup provides (agent, keys, `~/.ssh/config`); prompts are
//! disabled with `BatchMode`.

use std::io::Write;
use std::process::{Command, Stdio};

use tracing::{debug, trace};

use crate::config::SshConfig;
use crate::domain::entities::{CommandKind, DeployCommand};
use crate::domain::ports::{Deployer, DeployerError};

/// Suffix of the temporary file a write goes through before `mv`
const TMP_SUFFIX: &str = ".sitepush-tmp";

pub struct SshDeployer {
    config: SshConfig,
    destination: Option<String>,
    root_dir: String,
}

impl SshDeployer {
    pub fn new(config: SshConfig) -> Self {
        Self {
            config,
            destination: None,
            root_dir: String::new(),
        }
    }

    /// Build the `ssh` invocation for one remote shell command
    fn ssh_command(&self, destination: &str, remote: &str) -> Command {
        let mut cmd = Command::new("ssh");
        cmd.arg("-o").arg("BatchMode=yes");
        if self.config.port != 22 {
            cmd.arg("-p").arg(self.config.port.to_string());
        }
        if let Some(identity) = &self.config.identity_file {
            cmd.arg("-i").arg(identity);
        }
        cmd.arg(destination).arg(remote);
        cmd
    }

    /// Run a command on the remote host, feeding `input` on stdin
    fn run_command(&self, remote: &str, input: Option<&[u8]>) -> Result<String, DeployerError> {
        let destination = self
            .destination
            .as_deref()
            .ok_or(DeployerError::NotInitialised("ssh"))?;
        self.run_on(destination, remote, input)
    }

    fn run_on(
        &self,
        destination: &str,
        remote: &str,
        input: Option<&[u8]>,
    ) -> Result<String, DeployerError> {
        trace!(%destination, %remote, "ssh");
        run_with_input(self.ssh_command(destination, remote), remote, input)
    }

    /// Quote a path for safe use in shell commands
    fn quote_path(path: &str) -> String {
        format!("'{}'", path.replace('\'', "'\\''"))
    }

    /// The remote shell command that applies `cmd`
    fn remote_script(&self, cmd: &DeployCommand) -> String {
        let target = cmd.rel_path().to_remote(&self.root_dir);
        let p = Self::quote_path(&target);
        match cmd.kind() {
            CommandKind::FileAdd | CommandKind::FileUpdate => {
                let tmp = Self::quote_path(&format!("{target}{TMP_SUFFIX}"));
                format!("cat > {tmp} && mv -f {tmp} {p}")
            }
            CommandKind::DirAdd => format!("mkdir -p {p}"),
            CommandKind::FileDelete => format!("rm -f {p}"),
            CommandKind::DirDelete => format!("rm -rf {p}"),
        }
    }
}

impl Deployer for SshDeployer {
    fn name(&self) -> &'static str {
        "ssh"
    }

    fn initialise(&mut self) -> Result<(), DeployerError> {
        let mut missing = Vec::new();
        if blank(&self.config.host) {
            missing.push("ssh.host".to_string());
        }
        if blank(&self.config.user) {
            missing.push("ssh.user".to_string());
        }
        if blank(&self.config.root_dir) {
            missing.push("ssh.root_dir".to_string());
        }
        if !missing.is_empty() {
            return Err(DeployerError::MissingSettings(missing));
        }

        let host = self.config.host.clone().unwrap_or_default();
        let user = self.config.user.clone().unwrap_or_default();
        let root_dir = self.config.root_dir.clone().unwrap_or_default();
        let destination = format!("{user}@{host}");

        // proves both connectivity and that the root exists
        let check_root = format!("test -d {}", Self::quote_path(&root_dir));
        self.run_on(&destination, &check_root, None).map_err(|e| {
            DeployerError::Connection(format!("cannot use {destination}:{root_dir}: {e}"))
        })?;

        debug!(%destination, %root_dir, "ssh deployer ready");
        self.destination = Some(destination);
        self.root_dir = root_dir;
        Ok(())
    }

    fn apply_command(&mut self, cmd: &DeployCommand) -> Result<(), DeployerError> {
        let script = self.remote_script(cmd);
        let input = cmd.kind().carries_contents().then(|| cmd.contents());
        self.run_command(&script, input)?;
        Ok(())
    }

    fn cleanup(&mut self) -> Result<(), DeployerError> {
        self.destination = None;
        Ok(())
    }
}

/// Spawn `command`, feed it `input` and collect its stdout.
///
/// The child is always waited for, even when writing stdin fails, so a
/// remote command that exits early reports its own stderr.
fn run_with_input(
    mut command: Command,
    label: &str,
    input: Option<&[u8]>,
) -> Result<String, DeployerError> {
    let mut child = command
        .stdin(if input.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| {
            DeployerError::Connection(format!(
                "failed to run {}: {e}",
                command.get_program().to_string_lossy()
            ))
        })?;

    // stdin is dropped at the end of the match, closing the pipe
    let written = match (input, child.stdin.take()) {
        (Some(bytes), Some(mut stdin)) => stdin.write_all(bytes),
        _ => Ok(()),
    };

    let output = child
        .wait_with_output()
        .map_err(|e| DeployerError::io(label, e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DeployerError::CommandFailed(format!(
            "{label}: {}",
            stderr.trim()
        )));
    }
    written.map_err(|e| DeployerError::io(label, e))?;

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}
