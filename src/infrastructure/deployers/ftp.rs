//! FTP deployer
//!
//! Plain FTP, or FTP with explicit TLS (`AUTH TLS`) when `ftp.tls` is set.
//! Paths are absolute below `ftp.root_dir`.

use std::io::Cursor;

use suppaftp::native_tls::TlsConnector;
use suppaftp::types::FileType;
use suppaftp::{FtpError, NativeTlsConnector, NativeTlsFtpStream, Status};
use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::config::FtpConfig;
use crate::domain::entities::{CommandKind, DeployCommand};
use crate::domain::ports::{Deployer, DeployerError};

/// Outcome of one FTP operation, reduced to what the deployer cares about
#[derive(Debug, Error)]
pub(crate) enum SessionError {
    /// 550: no such file, or the server refused the action on it
    #[error("{0}")]
    Unavailable(String),
    #[error("{0}")]
    Other(String),
}

/// The FTP operations the deployer needs from a logged-in connection
pub(crate) trait FtpSession {
    fn mkdir(&mut self, path: &str) -> Result<(), SessionError>;
    fn rmdir(&mut self, path: &str) -> Result<(), SessionError>;
    fn rm(&mut self, path: &str) -> Result<(), SessionError>;
    fn put(&mut self, path: &str, contents: &[u8]) -> Result<(), SessionError>;
    /// Names inside a directory, as reported by NLST
    fn list(&mut self, path: &str) -> Result<Vec<String>, SessionError>;
    fn quit(&mut self) -> Result<(), SessionError>;
}

impl From<FtpError> for SessionError {
    fn from(err: FtpError) -> Self {
        match &err {
            FtpError::UnexpectedResponse(resp)
                if matches!(resp.status, Status::FileUnavailable) =>
            {
                Self::Unavailable(err.to_string())
            }
            _ => Self::Other(err.to_string()),
        }
    }
}

impl FtpSession for NativeTlsFtpStream {
    fn mkdir(&mut self, path: &str) -> Result<(), SessionError> {
        NativeTlsFtpStream::mkdir(self, path).map_err(Into::into)
    }

    fn rmdir(&mut self, path: &str) -> Result<(), SessionError> {
        NativeTlsFtpStream::rmdir(self, path).map_err(Into::into)
    }

    fn rm(&mut self, path: &str) -> Result<(), SessionError> {
        NativeTlsFtpStream::rm(self, path).map_err(Into::into)
    }

    fn put(&mut self, path: &str, contents: &[u8]) -> Result<(), SessionError> {
        let mut reader = Cursor::new(contents);
        self.put_file(path, &mut reader)?;
        Ok(())
    }

    fn list(&mut self, path: &str) -> Result<Vec<String>, SessionError> {
        self.nlst(Some(path)).map_err(Into::into)
    }

    fn quit(&mut self) -> Result<(), SessionError> {
        NativeTlsFtpStream::quit(self).map_err(Into::into)
    }
}

pub struct FtpDeployer {
    config: FtpConfig,
    session: Option<Box<dyn FtpSession>>,
}

impl FtpDeployer {
    pub fn new(config: FtpConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    /// Every required key that has no value, in a stable order
    fn missing_settings(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if blank(&self.config.host) {
            missing.push("ftp.host".to_string());
        }
        if self.config.port == 0 {
            missing.push("ftp.port".to_string());
        }
        if blank(&self.config.user) {
            missing.push("ftp.user".to_string());
        }
        if blank(&self.config.password) {
            missing.push("ftp.password".to_string());
        }
        missing
    }

    fn connect(
        &self,
        host: &str,
        user: &str,
        password: &str,
    ) -> Result<NativeTlsFtpStream, FtpError> {
        let addr = format!("{host}:{}", self.config.port);
        debug!(%addr, tls = self.config.tls, "connecting");
        let mut stream = NativeTlsFtpStream::connect(addr.as_str())?;

        if self.config.tls {
            let connector = TlsConnector::builder()
                .danger_accept_invalid_certs(self.config.accept_invalid_certs)
                .build()
                .map_err(|e| FtpError::SecureError(e.to_string()))?;
            stream = stream.into_secure(NativeTlsConnector::from(connector), host)?;
        } else {
            warn!(%addr, "FTP without TLS sends the password in clear text");
        }

        stream.login(user, password)?;
        stream.transfer_type(FileType::Binary)?;
        stream.cwd(self.config.root_dir.as_str())?;
        Ok(stream)
    }

    /// Session injected directly, bypassing `initialise`
    #[cfg(test)]
    pub(crate) fn with_session(config: FtpConfig, session: Box<dyn FtpSession>) -> Self {
        Self {
            config,
            session: Some(session),
        }
    }

    fn remote_path(&self, cmd: &DeployCommand) -> String {
        cmd.rel_path().to_remote(&self.config.root_dir)
    }
}

impl Deployer for FtpDeployer {
    fn name(&self) -> &'static str {
        "ftp"
    }

    fn initialise(&mut self) -> Result<(), DeployerError> {
        let missing = self.missing_settings();
        if !missing.is_empty() {
            return Err(DeployerError::MissingSettings(missing));
        }

        let host = self.config.host.clone().unwrap_or_default();
        let user = self.config.user.clone().unwrap_or_default();
        let password = self.config.password.clone().unwrap_or_default();
        let stream = self
            .connect(&host, &user, &password)
            .map_err(|e| DeployerError::Connection(format!("{host}: {e}")))?;

        debug!(%host, %user, root_dir = %self.config.root_dir, "ftp deployer ready");
        self.session = Some(Box::new(stream));
        Ok(())
    }

    fn apply_command(&mut self, cmd: &DeployCommand) -> Result<(), DeployerError> {
        let path = self.remote_path(cmd);
        let session = self
            .session
            .as_mut()
            .ok_or(DeployerError::NotInitialised("ftp"))?;
        trace!(%path, "{}", cmd.description());

        let result = match cmd.kind() {
            CommandKind::FileAdd | CommandKind::FileUpdate => session.put(&path, cmd.contents()),
            CommandKind::DirAdd => ignore_unavailable(session.mkdir(&path)),
            CommandKind::FileDelete => ignore_unavailable(session.rm(&path)),
            CommandKind::DirDelete => remove_dir_all(session.as_mut(), &path),
        };
        result.map_err(|e| {
            DeployerError::CommandFailed(format!("{} {path}: {e}", cmd.description()))
        })
    }

    fn cleanup(&mut self) -> Result<(), DeployerError> {
        let Some(mut session) = self.session.take() else {
            return Ok(());
        };
        session
            .quit()
            .map_err(|e| DeployerError::Connection(format!("QUIT failed: {e}")))
    }
}

/// Remove a directory; if the server refuses because it still has
/// contents, remove those first. An absent directory is fine.
fn remove_dir_all(session: &mut dyn FtpSession, path: &str) -> Result<(), SessionError> {
    match session.rmdir(path) {
        Ok(()) => return Ok(()),
        Err(SessionError::Unavailable(_)) => {}
        Err(e) => return Err(e),
    }

    let entries = match session.list(path) {
        Ok(entries) => entries,
        // nothing to list: already gone
        Err(SessionError::Unavailable(_)) => return Ok(()),
        Err(e) => return Err(e),
    };

    for entry in entries {
        // servers answer NLST with either bare names or full paths
        let name = entry.rsplit('/').next().unwrap_or(entry.as_str());
        if name.is_empty() || name == "." || name == ".." {
            continue;
        }
        let child = format!("{}/{name}", path.trim_end_matches('/'));
        if session.rm(&child).is_err() {
            remove_dir_all(session, &child)?;
        }
    }
    ignore_unavailable(session.rmdir(path))
}

fn ignore_unavailable(result: Result<(), SessionError>) -> Result<(), SessionError> {
    match result {
        Err(SessionError::Unavailable(msg)) => {
            trace!("ignoring: {msg}");
            Ok(())
        }
        other => other,
    }
}

fn blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, str::is_empty)
}
