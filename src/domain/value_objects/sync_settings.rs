//! Sync settings value object
//!
//! Everything the diff engine needs for one run, resolved up front by the
//! caller. Constructed once per run and never mutated.

use std::path::{Path, PathBuf};

use super::SkipPatterns;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncSettings {
    source_dir: PathBuf,
    dest_dir: PathBuf,
    minify: bool,
    skip: SkipPatterns,
}

impl SyncSettings {
    pub fn new(source_dir: impl Into<PathBuf>, dest_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            dest_dir: dest_dir.into(),
            minify: false,
            skip: SkipPatterns::empty(),
        }
    }

    pub fn with_minify(mut self, minify: bool) -> Self {
        self.minify = minify;
        self
    }

    pub fn with_skip(mut self, skip: SkipPatterns) -> Self {
        self.skip = skip;
        self
    }

    /// Tree that is mirrored
    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Tree describing what is currently deployed
    pub fn dest_dir(&self) -> &Path {
        &self.dest_dir
    }

    pub fn minify(&self) -> bool {
        self.minify
    }

    pub fn skip(&self) -> &SkipPatterns {
        &self.skip
    }
}
