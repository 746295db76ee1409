//! Tree Diff Domain Service
//!
//! Walks a source tree and the tree describing what is currently deployed,
//! classifies every entry and hands the resulting commands to a caller
//! supplied handler, one at a time.
//!
//! Two passes:
//! 1. Top-down walk of the source. Directories are created before the files
//!    inside them; type conflicts become a delete followed by an add.
//! 2. Walk of the destination collecting entries with no source counterpart.
//!    File deletions are replayed last-seen first, then directory deletions
//!    the same way, so contents always go before their parent.
//!
//! The first error, internal or returned by the handler, ends the run.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, info, trace, warn};
use walkdir::WalkDir;

use super::equality::files_equal;
use crate::domain::entities::{CommandKind, DeployCommand};
use crate::domain::ports::ContentTransformer;
use crate::domain::value_objects::{MediaType, RelPath, SyncSettings};
use crate::error::{DeployError, DeployResult};

/// What a tree walk saw at one relative path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryInfo {
    pub is_dir: bool,
    pub size: u64,
}

/// Every non-skipped entry found by one source walk, keyed by relative path
#[derive(Debug, Clone, Default)]
pub struct DirectorySnapshot {
    entries: HashMap<RelPath, EntryInfo>,
}

impl DirectorySnapshot {
    fn insert(&mut self, path: RelPath, info: EntryInfo) {
        self.entries.insert(path, info);
    }

    pub fn get(&self, path: &RelPath) -> Option<EntryInfo> {
        self.entries.get(path).copied()
    }

    pub fn contains(&self, path: &RelPath) -> bool {
        self.entries.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total bytes of the files in the snapshot
    pub fn total_file_bytes(&self) -> u64 {
        self.entries
            .values()
            .filter(|e| !e.is_dir)
            .map(|e| e.size)
            .sum()
    }
}

/// Counters for a completed run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffSummary {
    /// Source entries compared
    pub compared: usize,
    /// Entries left alone because of a skip pattern
    pub skipped: usize,
    /// Source entries already matching the destination
    pub unchanged: usize,
    /// Commands handed to the handler
    pub commands: usize,
    /// Bytes of source files compared, before transformation
    pub source_bytes: u64,
}

/// The diff engine for one run
pub struct TreeDiff<'a, T: ContentTransformer + ?Sized> {
    settings: &'a SyncSettings,
    transformer: &'a T,
}

impl<'a, T: ContentTransformer + ?Sized> TreeDiff<'a, T> {
    pub fn new(settings: &'a SyncSettings, transformer: &'a T) -> Self {
        Self {
            settings,
            transformer,
        }
    }

    /// Run both passes, calling `handle` once per command.
    pub fn run<H>(&self, mut handle: H) -> DeployResult<DiffSummary>
    where
        H: FnMut(DeployCommand) -> DeployResult<()>,
    {
        validate_roots(self.settings)?;
        let source = self.settings.source_dir();
        let dest = self.settings.dest_dir();

        info!(
            source = %source.display(),
            dest = %dest.display(),
            minify = self.settings.minify(),
            "comparing trees"
        );

        let mut summary = DiffSummary::default();
        let snapshot = self.reconcile(&mut handle, &mut summary)?;
        summary.source_bytes = snapshot.total_file_bytes();
        self.remove_stale(&snapshot, &mut handle, &mut summary)?;

        info!(
            compared = summary.compared,
            unchanged = summary.unchanged,
            skipped = summary.skipped,
            commands = summary.commands,
            "comparison finished"
        );
        Ok(summary)
    }

    /// Pass 1: bring every source entry into the destination.
    fn reconcile<H>(
        &self,
        handle: &mut H,
        summary: &mut DiffSummary,
    ) -> DeployResult<DirectorySnapshot>
    where
        H: FnMut(DeployCommand) -> DeployResult<()>,
    {
        let source_root = self.settings.source_dir();
        let dest_root = self.settings.dest_dir();
        let mut snapshot = DirectorySnapshot::default();

        let mut walker = WalkDir::new(source_root)
            .min_depth(1)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter();

        while let Some(entry) = walker.next() {
            let entry = entry?;
            let rel = RelPath::within(entry.path(), source_root)?;
            let is_dir = entry.file_type().is_dir();
            if rel.is_lossy() {
                warn!(path = %rel, "name is not valid UTF-8, remote targets see it with replacement characters");
            }

            if self.settings.skip().should_skip(&rel) {
                debug!(path = %rel, "skipping");
                summary.skipped += 1;
                if is_dir {
                    walker.skip_current_dir();
                }
                continue;
            }

            let size = if is_dir { 0 } else { entry.metadata()?.len() };
            snapshot.insert(rel.clone(), EntryInfo { is_dir, size });
            summary.compared += 1;

            let dest_path = rel.to_native(dest_root);
            let dest_meta = stat_optional(&dest_path)?;
            trace!(
                source = %entry.path().display(),
                dest = %dest_path.display(),
                dest_exists = dest_meta.is_some(),
                "checking"
            );

            if is_dir {
                match dest_meta {
                    Some(meta) if meta.is_dir() => {
                        debug!(path = %rel, "directory present");
                        summary.unchanged += 1;
                    }
                    Some(_) => {
                        info!(path = %rel, "replacing file with directory");
                        emit(handle, summary, DeployCommand::file_delete(rel.clone()))?;
                        emit(handle, summary, DeployCommand::dir_add(rel))?;
                    }
                    None => {
                        emit(handle, summary, DeployCommand::dir_add(rel))?;
                    }
                }
                continue;
            }

            let payload = self.source_payload(entry.path())?;
            match dest_meta {
                Some(meta) if meta.is_dir() => {
                    info!(path = %rel, "replacing directory with file");
                    emit(handle, summary, DeployCommand::dir_delete(rel.clone()))?;
                    emit(handle, summary, DeployCommand::file_add(rel, payload))?;
                }
                Some(_) => {
                    if files_equal(entry.path(), &dest_path, &payload)? {
                        debug!(path = %rel, "unchanged");
                        summary.unchanged += 1;
                    } else {
                        emit(handle, summary, DeployCommand::file_update(rel, payload))?;
                    }
                }
                None => {
                    emit(handle, summary, DeployCommand::file_add(rel, payload))?;
                }
            }
        }

        Ok(snapshot)
    }

    /// Pass 2: delete destination entries the source no longer has.
    fn remove_stale<H>(
        &self,
        snapshot: &DirectorySnapshot,
        handle: &mut H,
        summary: &mut DiffSummary,
    ) -> DeployResult<()>
    where
        H: FnMut(DeployCommand) -> DeployResult<()>,
    {
        let dest_root = self.settings.dest_dir();
        let mut stale_files: Vec<RelPath> = Vec::new();
        let mut stale_dirs: Vec<RelPath> = Vec::new();
        let mut skipped: Vec<RelPath> = Vec::new();

        let mut walker = WalkDir::new(dest_root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter();

        while let Some(entry) = walker.next() {
            let entry = entry?;
            let rel = RelPath::within(entry.path(), dest_root)?;
            let is_dir = entry.file_type().is_dir();

            if self.settings.skip().should_skip(&rel) {
                debug!(path = %rel, "skipping deletion check");
                if is_dir {
                    walker.skip_current_dir();
                }
                skipped.push(rel);
                continue;
            }
            if let Some(source) = snapshot.get(&rel) {
                // Pass 1 already replaced this directory with a file.
                if is_dir && !source.is_dir {
                    walker.skip_current_dir();
                }
                continue;
            }

            trace!(path = %rel, is_dir, "no source counterpart");
            if is_dir {
                stale_dirs.push(rel);
            } else {
                stale_files.push(rel);
            }
        }

        for rel in stale_files.into_iter().rev() {
            emit(handle, summary, DeployCommand::file_delete(rel))?;
        }
        // A directory holding a skipped entry stays, or the skip would be undone
        // by the recursive delete.
        for rel in stale_dirs.into_iter().rev() {
            if skipped.iter().any(|s| rel.is_ancestor_of(s)) {
                debug!(path = %rel, "keeping directory with skipped contents");
                continue;
            }
            emit(handle, summary, DeployCommand::dir_delete(rel))?;
        }
        Ok(())
    }

    /// Read a source file and, when enabled, transform it.
    fn source_payload(&self, path: &Path) -> DeployResult<Vec<u8>> {
        let raw = fs::read(path).map_err(|e| DeployError::io(path, e))?;
        debug!(path = %path.display(), bytes = raw.len(), "read source");

        if !self.settings.minify() {
            return Ok(raw);
        }
        let Some(media_type) = MediaType::from_path(path) else {
            return Ok(raw);
        };

        let transformed = self
            .transformer
            .transform(media_type, &raw)
            .map_err(|e| DeployError::Transform {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        debug!(
            path = %path.display(),
            %media_type,
            before = raw.len(),
            after = transformed.len(),
            "minified"
        );
        Ok(transformed)
    }
}

/// Compare `settings.source_dir()` against `settings.dest_dir()` and hand
/// each resulting command to `handle`.
pub fn deploy_changes<T, H>(
    settings: &SyncSettings,
    transformer: &T,
    handle: H,
) -> DeployResult<DiffSummary>
where
    T: ContentTransformer + ?Sized,
    H: FnMut(DeployCommand) -> DeployResult<()>,
{
    TreeDiff::new(settings, transformer).run(handle)
}

/// Fail unless both tree roots exist and are directories.
pub fn validate_roots(settings: &SyncSettings) -> DeployResult<()> {
    check_dir_exists(settings.source_dir(), "Source")?;
    check_dir_exists(settings.dest_dir(), "Destination")
}

fn emit<H>(handle: &mut H, summary: &mut DiffSummary, cmd: DeployCommand) -> DeployResult<()>
where
    H: FnMut(DeployCommand) -> DeployResult<()>,
{
    match cmd.kind() {
        CommandKind::FileDelete | CommandKind::DirDelete => {
            info!(path = %cmd.rel_path(), "{}", cmd.description())
        }
        _ => info!(
            path = %cmd.rel_path(),
            bytes = cmd.contents().len(),
            "{}",
            cmd.description()
        ),
    }
    summary.commands += 1;
    handle(cmd)
}

fn check_dir_exists(path: &Path, role: &'static str) -> DeployResult<()> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(DeployError::NotADirectory {
            role,
            path: path.to_path_buf(),
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(DeployError::DirectoryNotFound {
            role,
            path: path.to_path_buf(),
        }),
        Err(e) => Err(DeployError::io(path, e)),
    }
}

/// Stat a destination path, treating "nothing there" as `None`.
///
/// A path below a destination *file* (left over from a type conflict that
/// the handler did not apply) also counts as nothing there.
fn stat_optional(path: &Path) -> DeployResult<Option<fs::Metadata>> {
    match fs::metadata(path) {
        Ok(meta) => Ok(Some(meta)),
        Err(e)
            if matches!(
                e.kind(),
                io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
            ) =>
        {
            Ok(None)
        }
        Err(e) => Err(DeployError::io(path, e)),
    }
}
