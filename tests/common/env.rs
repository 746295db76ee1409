//! Test environment builder for isolated sitepush runs.
//!
//! Provides `TestEnv` - a temp project directory holding a `public/` site,
//! a `deployed/` record directory and, for `file` targets, a `webroot/`.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

use super::fixtures::FILE_TARGET_CONFIG;

/// Environment variables that would leak the developer's settings into a run
const SITEPUSH_VARS: [&str; 6] = [
    "SITEPUSH_SOURCE_DIR",
    "SITEPUSH_RECORD_DIR",
    "SITEPUSH_MINIFY",
    "SITEPUSH_SKIP",
    "SITEPUSH_TARGET",
    "SITEPUSH_FTP_PASSWORD",
];

/// Result of running the sitepush binary
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// stdout parsed as one JSON document
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.stdout)
            .unwrap_or_else(|e| panic!("stdout is not JSON ({e}):\n{}", self.stdout))
    }

    /// Non-empty stdout lines
    pub fn lines(&self) -> Vec<&str> {
        self.stdout.lines().filter(|l| !l.is_empty()).collect()
    }
}

/// Isolated project directory
pub struct TestEnv {
    pub root: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn builder() -> TestEnvBuilder {
        TestEnvBuilder::default()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    /// Run sitepush from the project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    /// Run sitepush from the project root with extra environment variables
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(self.root.path())
            .args(args)
            .stdin(Stdio::null())
            .env_remove("RUST_LOG");
        for var in SITEPUSH_VARS {
            cmd.env_remove(var);
        }
        for (key, value) in env_vars {
            cmd.env(key, value);
        }
        let output = cmd.output().expect("Failed to execute sitepush");
        to_result(output)
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    pub fn mkdir(&self, relative: &str) {
        fs::create_dir_all(self.path(relative)).expect("Failed to create directory");
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative))
            .unwrap_or_else(|e| panic!("Failed to read {relative}: {e}"))
    }

    pub fn remove(&self, relative: &str) {
        let path = self.path(relative);
        if path.is_dir() {
            fs::remove_dir_all(&path).expect("Failed to remove directory");
        } else {
            fs::remove_file(&path).expect("Failed to remove file");
        }
    }

    /// Sorted `/`-joined paths of everything under `relative`; directories end in `/`
    pub fn tree(&self, relative: &str) -> Vec<String> {
        let mut out = Vec::new();
        collect_tree(&self.path(relative), "", &mut out);
        out.sort();
        out
    }
}

fn collect_tree(dir: &Path, prefix: &str, out: &mut Vec<String>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries {
        let entry = entry.expect("Failed to read directory entry");
        let name = entry.file_name().to_string_lossy().to_string();
        let rel = format!("{prefix}{name}");
        if entry.path().is_dir() {
            out.push(format!("{rel}/"));
            collect_tree(&entry.path(), &format!("{rel}/"), out);
        } else {
            out.push(rel);
        }
    }
}

fn to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

/// Builder for TestEnv with fluent API
#[derive(Default)]
pub struct TestEnvBuilder {
    site_files: Vec<(String, String)>,
    record_files: Vec<(String, String)>,
    config: Option<String>,
    create_record_dir: bool,
    create_webroot: bool,
}

impl TestEnvBuilder {
    /// Add a file under `public/`
    pub fn with_site_file(mut self, relative: &str, content: &str) -> Self {
        self.site_files.push((relative.to_string(), content.to_string()));
        self
    }

    /// Add a file under `deployed/`
    pub fn with_record_file(mut self, relative: &str, content: &str) -> Self {
        self.record_files.push((relative.to_string(), content.to_string()));
        self.create_record_dir = true;
        self
    }

    pub fn with_config(mut self, toml: &str) -> Self {
        self.config = Some(toml.to_string());
        self
    }

    /// Push to `webroot/` through a `file` target, with empty record and webroot
    pub fn with_file_target(mut self) -> Self {
        self.config = Some(FILE_TARGET_CONFIG.to_string());
        self.create_record_dir = true;
        self.create_webroot = true;
        self
    }

    pub fn with_record_dir(mut self) -> Self {
        self.create_record_dir = true;
        self
    }

    pub fn build(self) -> TestEnv {
        let env = TestEnv {
            root: TempDir::new().expect("Failed to create temp dir"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_sitepush")),
        };
        env.mkdir("public");
        for (rel, content) in &self.site_files {
            env.write(&format!("public/{rel}"), content);
        }
        if self.create_record_dir {
            env.mkdir("deployed");
        }
        for (rel, content) in &self.record_files {
            env.write(&format!("deployed/{rel}"), content);
        }
        if self.create_webroot {
            env.mkdir("webroot");
        }
        if let Some(config) = &self.config {
            env.write("sitepush.toml", config);
        }
        env
    }
}
