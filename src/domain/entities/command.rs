//! Deploy Command Entity
//!
//! A single structural change the diff engine asks a deployer to apply.
//! Commands are built at classification time and never mutated afterwards.

use std::fmt;

use crate::domain::value_objects::RelPath;

/// The kind of structural change carried by a [`DeployCommand`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// Create a file that does not exist at the destination
    FileAdd,
    /// Create a directory that does not exist at the destination
    DirAdd,
    /// Replace the contents of an existing destination file
    FileUpdate,
    /// Remove a destination file
    FileDelete,
    /// Remove a destination directory and anything left inside it
    DirDelete,
}

impl CommandKind {
    /// All kinds, in the order they are reported in summaries
    pub const ALL: [CommandKind; 5] = [
        CommandKind::DirAdd,
        CommandKind::FileAdd,
        CommandKind::FileUpdate,
        CommandKind::FileDelete,
        CommandKind::DirDelete,
    ];

    /// Human readable label used in logs and previews
    pub fn description(self) -> &'static str {
        match self {
            CommandKind::DirAdd => "ADD DIR",
            CommandKind::DirDelete => "DELETE DIR",
            CommandKind::FileAdd => "ADD FILE",
            CommandKind::FileDelete => "DELETE FILE",
            CommandKind::FileUpdate => "UPDATE FILE",
        }
    }

    /// Parse a label produced by [`CommandKind::description`].
    ///
    /// Returns `None` for anything else.
    pub fn from_description(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.description() == label)
    }

    /// Stable machine name used in JSON output
    pub fn as_str(self) -> &'static str {
        match self {
            CommandKind::DirAdd => "dir_add",
            CommandKind::DirDelete => "dir_delete",
            CommandKind::FileAdd => "file_add",
            CommandKind::FileDelete => "file_delete",
            CommandKind::FileUpdate => "file_update",
        }
    }

    /// Whether commands of this kind carry a payload
    pub fn carries_contents(self) -> bool {
        matches!(self, CommandKind::FileAdd | CommandKind::FileUpdate)
    }

    pub fn is_delete(self) -> bool {
        matches!(self, CommandKind::FileDelete | CommandKind::DirDelete)
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// A structural change to apply at the destination.
///
/// The payload is only ever non-empty for [`CommandKind::FileAdd`] and
/// [`CommandKind::FileUpdate`]; the constructors enforce this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployCommand {
    rel_path: RelPath,
    contents: Option<Vec<u8>>,
    kind: CommandKind,
}

impl DeployCommand {
    pub fn file_add(rel_path: RelPath, contents: Vec<u8>) -> Self {
        Self {
            rel_path,
            contents: Some(contents),
            kind: CommandKind::FileAdd,
        }
    }

    pub fn file_update(rel_path: RelPath, contents: Vec<u8>) -> Self {
        Self {
            rel_path,
            contents: Some(contents),
            kind: CommandKind::FileUpdate,
        }
    }

    pub fn dir_add(rel_path: RelPath) -> Self {
        Self::without_contents(rel_path, CommandKind::DirAdd)
    }

    pub fn file_delete(rel_path: RelPath) -> Self {
        Self::without_contents(rel_path, CommandKind::FileDelete)
    }

    pub fn dir_delete(rel_path: RelPath) -> Self {
        Self::without_contents(rel_path, CommandKind::DirDelete)
    }

    fn without_contents(rel_path: RelPath, kind: CommandKind) -> Self {
        Self {
            rel_path,
            contents: None,
            kind,
        }
    }

    /// Path relative to the tree root, always starting with `/`
    pub fn rel_path(&self) -> &RelPath {
        &self.rel_path
    }

    /// Payload bytes; empty for directory and delete commands
    pub fn contents(&self) -> &[u8] {
        self.contents.as_deref().unwrap_or(&[])
    }

    pub fn has_contents(&self) -> bool {
        self.contents.is_some()
    }

    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    /// Label for the command kind (e.g. `"ADD FILE"`)
    pub fn description(&self) -> &'static str {
        self.kind.description()
    }
}

impl fmt::Display for DeployCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.rel_path)
    }
}
