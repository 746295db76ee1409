//! Relative Path Value Object
//!
//! The backend-agnostic path carried by every deploy command:
//! - Always starts with `/`
//! - Uses `/` as the only separator, whatever the host OS
//! - Never contains the root prefix of either tree, `.` or `..`
//!
//! Names are kept exactly as the filesystem reported them, so a file whose
//! name is not valid UTF-8 still resolves to itself locally. The `/`-joined
//! text form is lossy for such names and is only used at the edges: output,
//! skip matching and remote transports.

use std::ffi::OsStr;
use std::fmt;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

/// Error when a filesystem path cannot be expressed as a [`RelPath`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// Path is not located under the given root
    #[error("Path '{}' is not inside '{}'", .path.display(), .root.display())]
    OutsideRoot { path: PathBuf, root: PathBuf },
    /// Path contains `..` or a root/prefix component
    #[error("Path '{}' is not a plain relative path", .0.display())]
    NotNormal(PathBuf),
}

/// A `/`-anchored path relative to a tree root
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelPath {
    text: String,
    native: PathBuf,
}

impl RelPath {
    pub const SEPARATOR: char = '/';

    /// The tree root itself (`/`)
    pub fn root() -> Self {
        Self {
            text: Self::SEPARATOR.to_string(),
            native: PathBuf::new(),
        }
    }

    /// Derive the relative path of `path` inside `root`.
    ///
    /// Uses component-wise prefix stripping, so trailing separators on
    /// either side do not matter.
    pub fn within(path: &Path, root: &Path) -> Result<Self, PathError> {
        let rel = path
            .strip_prefix(root)
            .map_err(|_| PathError::OutsideRoot {
                path: path.to_path_buf(),
                root: root.to_path_buf(),
            })?;
        Self::from_relative(rel)
    }

    /// Build from an already relative filesystem path
    pub fn from_relative(rel: &Path) -> Result<Self, PathError> {
        let mut names = Vec::new();
        for component in rel.components() {
            match component {
                Component::Normal(name) => names.push(name),
                Component::CurDir => {}
                _ => return Err(PathError::NotNormal(rel.to_path_buf())),
            }
        }
        Ok(Self::from_names(names))
    }

    /// Parse a `/`-separated string, normalising duplicate and missing separators.
    ///
    /// `.` segments are dropped; `..` segments are kept verbatim, so only use
    /// this for trusted input such as test fixtures.
    pub fn parse(s: &str) -> Self {
        Self::from_names(
            s.split(Self::SEPARATOR)
                .filter(|seg| !seg.is_empty() && *seg != ".")
                .map(OsStr::new),
        )
    }

    fn from_names<'a>(names: impl IntoIterator<Item = &'a OsStr>) -> Self {
        let mut out = Self::root();
        out.text.clear();
        for name in names {
            out.text.push(Self::SEPARATOR);
            out.text.push_str(&name.to_string_lossy());
            out.native.push(name);
        }
        if out.text.is_empty() {
            out.text.push(Self::SEPARATOR);
        }
        out
    }

    /// The `/`-joined text form. Names that are not valid UTF-8 appear
    /// with replacement characters.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether the text form had to replace bytes that are not UTF-8
    pub fn is_lossy(&self) -> bool {
        self.native.to_str().is_none()
    }

    pub fn is_root(&self) -> bool {
        self.native.as_os_str().is_empty()
    }

    /// Path segments, without the leading separator
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.text.split(Self::SEPARATOR).filter(|s| !s.is_empty())
    }

    /// Number of segments below the root
    pub fn depth(&self) -> usize {
        self.native.components().count()
    }

    /// Whether `other` lies strictly below this path
    pub fn is_ancestor_of(&self, other: &RelPath) -> bool {
        other.native.starts_with(&self.native) && other.depth() > self.depth()
    }

    /// Last segment, `None` for the root
    pub fn file_name(&self) -> Option<&str> {
        self.segments().last()
    }

    /// Resolve against a local directory, using the names as found on disk
    pub fn to_native(&self, base: &Path) -> PathBuf {
        if self.is_root() {
            return base.to_path_buf();
        }
        base.join(&self.native)
    }

    /// Resolve against a remote `/`-separated base directory
    pub fn to_remote(&self, base: &str) -> String {
        let base = base.trim_end_matches(Self::SEPARATOR);
        if self.is_root() {
            if base.is_empty() {
                return Self::SEPARATOR.to_string();
            }
            return base.to_string();
        }
        format!("{}{}", base, self.text)
    }
}

impl fmt::Display for RelPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for RelPath {
    fn as_ref(&self) -> &str {
        &self.text
    }
}
