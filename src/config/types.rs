//! Configuration type definitions

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{SkipPatterns, SyncSettings};
use crate::error::DeployResult;

use super::loader::{self, ConfigWarning};

/// Which transport `push` sends changes through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    #[default]
    Ftp,
    Ssh,
    /// Another local directory, e.g. a mounted web root
    File,
}

impl TargetKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ftp => "ftp",
            Self::Ssh => "ssh",
            Self::File => "file",
        }
    }
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ftp" | "ftps" => Ok(Self::Ftp),
            "ssh" | "sftp" => Ok(Self::Ssh),
            "file" | "local" => Ok(Self::File),
            other => Err(format!("unknown target kind '{other}' (expected ftp, ssh or file)")),
        }
    }
}

/// `[target]` section
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TargetConfig {
    #[serde(default)]
    pub kind: TargetKind,
}

/// `[ftp]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FtpConfig {
    #[serde(default)]
    pub host: Option<String>,

    #[serde(default = "default_ftp_port")]
    pub port: u16,

    #[serde(default)]
    pub user: Option<String>,

    #[serde(default, skip_serializing)]
    pub password: Option<String>,

    #[serde(default = "default_remote_root")]
    pub root_dir: String,

    /// Upgrade the control connection with explicit TLS (AUTH TLS)
    #[serde(default)]
    pub tls: bool,

    #[serde(default)]
    pub accept_invalid_certs: bool,
}

impl Default for FtpConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: default_ftp_port(),
            user: None,
            password: None,
            root_dir: default_remote_root(),
            tls: false,
            accept_invalid_certs: false,
        }
    }
}

/// `[ssh]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SshConfig {
    #[serde(default)]
    pub host: Option<String>,

    #[serde(default = "default_ssh_port")]
    pub port: u16,

    #[serde(default)]
    pub user: Option<String>,

    #[serde(default)]
    pub root_dir: Option<String>,

    #[serde(default)]
    pub identity_file: Option<PathBuf>,
}

impl Default for SshConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: default_ssh_port(),
            user: None,
            root_dir: None,
            identity_file: None,
        }
    }
}

/// `[file]` section
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileTargetConfig {
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Generated site to publish
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,

    /// Local mirror of what was last deployed
    #[serde(default = "default_record_dir")]
    pub record_dir: PathBuf,

    #[serde(default = "default_true")]
    pub minify: bool,

    #[serde(default = "default_skip")]
    pub skip: Vec<String>,

    #[serde(default)]
    pub verbose: bool,

    #[serde(default)]
    pub debug: bool,

    #[serde(default)]
    pub target: TargetConfig,

    #[serde(default)]
    pub ftp: FtpConfig,

    #[serde(default)]
    pub ssh: SshConfig,

    #[serde(default)]
    pub file: FileTargetConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            record_dir: default_record_dir(),
            minify: true,
            skip: default_skip(),
            verbose: false,
            debug: false,
            target: TargetConfig::default(),
            ftp: FtpConfig::default(),
            ssh: SshConfig::default(),
            file: FileTargetConfig::default(),
        }
    }
}

/// Values given on the command line. `None`/empty means "not given".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    pub source_dir: Option<PathBuf>,
    pub record_dir: Option<PathBuf>,
    pub no_minify: bool,
    pub skip: Vec<String>,
    pub ftp_password: Option<String>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> DeployResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> DeployResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Load `path` if it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> DeployResult<(Self, Vec<ConfigWarning>)> {
        loader::load_or_default(path)
    }

    /// Apply environment variable overrides (SITEPUSH_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self, |key| std::env::var(key).ok())
    }

    /// Make relative paths relative to `base` (the config file's directory)
    pub fn resolve_relative_to(mut self, base: &Path) -> Self {
        self.source_dir = loader::resolve_path(base, &self.source_dir);
        self.record_dir = loader::resolve_path(base, &self.record_dir);
        if let Some(dir) = self.file.dir.take() {
            self.file.dir = Some(loader::resolve_path(base, &dir));
        }
        if let Some(identity) = self.ssh.identity_file.take() {
            self.ssh.identity_file = Some(loader::expand_home(&identity));
        }
        self
    }

    /// Apply command line values on top of everything else
    pub fn with_cli_overrides(mut self, cli: &CliOverrides) -> Self {
        if let Some(dir) = &cli.source_dir {
            self.source_dir = dir.clone();
        }
        if let Some(dir) = &cli.record_dir {
            self.record_dir = dir.clone();
        }
        if cli.no_minify {
            self.minify = false;
        }
        if !cli.skip.is_empty() {
            self.skip = cli.skip.clone();
        }
        if let Some(password) = &cli.ftp_password {
            self.ftp.password = Some(password.clone());
        }
        self
    }

    /// Settings for one diff engine run against the record directory
    pub fn sync_settings(&self) -> SyncSettings {
        SyncSettings::new(&self.source_dir, &self.record_dir)
            .with_minify(self.minify)
            .with_skip(SkipPatterns::new(self.skip.iter().map(String::as_str)))
    }

    /// Commented starting point written by `sitepush init`
    pub fn template() -> &'static str {
        loader::TEMPLATE
    }
}

fn default_true() -> bool {
    true
}

fn default_source_dir() -> PathBuf {
    PathBuf::from("public")
}

fn default_record_dir() -> PathBuf {
    PathBuf::from("deployed")
}

fn default_skip() -> Vec<String> {
    vec![".git".to_string(), ".DS_Store".to_string()]
}

fn default_ftp_port() -> u16 {
    21
}

fn default_ssh_port() -> u16 {
    22
}

fn default_remote_root() -> String {
    "/".to_string()
}
