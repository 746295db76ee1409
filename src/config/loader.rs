//! Configuration loading

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{DeployError, DeployResult};

use super::types::{Config, TargetKind};

/// Default configuration file name, looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "sitepush.toml";

pub const ENV_SOURCE_DIR: &str = "SITEPUSH_SOURCE_DIR";
pub const ENV_RECORD_DIR: &str = "SITEPUSH_RECORD_DIR";
pub const ENV_MINIFY: &str = "SITEPUSH_MINIFY";
pub const ENV_SKIP: &str = "SITEPUSH_SKIP";
pub const ENV_TARGET: &str = "SITEPUSH_TARGET";
pub const ENV_FTP_PASSWORD: &str = "SITEPUSH_FTP_PASSWORD";

pub(super) const TEMPLATE: &str = r#"# sitepush configuration

# Generated site to publish, relative to this file
source_dir = "public"

# Local copy of what was last deployed. `sitepush init` empties it,
# which makes the next push send everything again.
record_dir = "deployed"

# Minify css, js, json, html, svg and xml before comparing and uploading
minify = true

# Paths containing any of these substrings are neither uploaded nor deleted
skip = [".git", ".DS_Store"]

[target]
# ftp, ssh or file
kind = "ftp"

[ftp]
host = "ftp.example.com"
port = 21
user = "deploy"
# Prefer SITEPUSH_FTP_PASSWORD or --ftp-password over storing it here
# password = ""
root_dir = "/"
tls = true
accept_invalid_certs = false

# [ssh]
# host = "example.com"
# port = 22
# user = "deploy"
# root_dir = "/var/www/site"
# identity_file = "~/.ssh/id_ed25519"

# [file]
# dir = "/mnt/webroot"
"#;

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> DeployResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|e| DeployError::io(path, e))?;
    parse_with_warnings(&content, path)
}

/// Load `path`, falling back to defaults when the file does not exist.
pub fn load_or_default(path: &Path) -> DeployResult<(Config, Vec<ConfigWarning>)> {
    match fs::read_to_string(path) {
        Ok(content) => {
            debug!(file = %path.display(), "loading configuration");
            parse_with_warnings(&content, path)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!(file = %path.display(), "no configuration file, using defaults");
            Ok((Config::default(), Vec::new()))
        }
        Err(e) => Err(DeployError::io(path, e)),
    }
}

pub(super) fn parse_with_warnings(
    content: &str,
    path: &Path,
) -> DeployResult<(Config, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| DeployError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Apply environment variable overrides (SITEPUSH_* prefix).
///
/// `lookup` is `std::env::var` in production.
pub fn with_env_overrides<F>(mut config: Config, lookup: F) -> Config
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(dir) = lookup(ENV_SOURCE_DIR) {
        config.source_dir = PathBuf::from(dir);
    }

    if let Some(dir) = lookup(ENV_RECORD_DIR) {
        config.record_dir = PathBuf::from(dir);
    }

    if let Some(val) = lookup(ENV_MINIFY) {
        let val = val.trim().to_lowercase();
        config.minify = !matches!(val.as_str(), "false" | "0" | "no" | "off");
    }

    // comma-separated
    if let Some(skip) = lookup(ENV_SKIP) {
        config.skip = skip
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
    }

    if let Some(kind) = lookup(ENV_TARGET) {
        match kind.parse::<TargetKind>() {
            Ok(kind) => config.target.kind = kind,
            Err(e) => warn!(variable = ENV_TARGET, "{e}; keeping '{}'", config.target.kind),
        }
    }

    if let Some(password) = lookup(ENV_FTP_PASSWORD) {
        config.ftp.password = Some(password);
    }

    config
}

/// Join a relative `path` onto `base`; absolute and `~` paths are kept.
pub(super) fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    let expanded = expand_home(path);
    if expanded.is_absolute() || base.as_os_str().is_empty() {
        expanded
    } else {
        base.join(expanded)
    }
}

pub(super) fn expand_home(path: &Path) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path.to_path_buf(),
    }
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "source_dir",
        "record_dir",
        "minify",
        "skip",
        "verbose",
        "debug",
        "target",
        "kind",
        "ftp",
        "ssh",
        "file",
        "host",
        "port",
        "user",
        "password",
        "root_dir",
        "tls",
        "accept_invalid_certs",
        "identity_file",
        "dir",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
