//! Directory entry representation.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};
use std::path::Path;

use crate::fs::location::Location;

/// One listed child of a directory.
///
/// `DirectoryEntry` is immutable: the sort key and the row metadata are
/// captured once when the directory is listed. Equality, hashing and
/// ordering are consistent with each other: two entries are equal only when
/// they share a location.
///
/// Ordering puts names starting with `.` after all others; within each
/// group names compare case-insensitively.
///
/// # Examples
///
/// ```no_run
/// use filebrowser_core::DirectoryEntry;
/// use std::fs;
///
/// let metadata = fs::metadata("Cargo.toml").unwrap();
/// let entry = DirectoryEntry::new("Cargo.toml".into(), &metadata);
/// assert_eq!(entry.sort_key(), "cargo.toml");
/// assert!(!entry.is_dir());
/// ```
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    location: Location,
    sort_key: String,
    size: u64,
    is_dir: bool,
    is_symlink: bool,
}

impl DirectoryEntry {
    /// Creates an entry from a path and its metadata.
    ///
    /// Directory sizes are reported as `0`.
    pub fn new(path: std::path::PathBuf, metadata: &std::fs::Metadata) -> Self {
        let location = Location::new(path);
        let sort_key = location.filename().to_lowercase();

        Self {
            location,
            sort_key,
            size: if metadata.is_dir() { 0 } else { metadata.len() },
            is_dir: metadata.is_dir(),
            is_symlink: metadata.is_symlink(),
        }
    }

    /// Returns the location of this entry.
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Shorthand for `self.location().path()`.
    pub fn path(&self) -> &Path {
        self.location.path()
    }

    /// Returns the file or directory name as displayed.
    pub fn name(&self) -> String {
        self.location.filename()
    }

    /// Returns the lowercased name used for ordering.
    pub fn sort_key(&self) -> &str {
        &self.sort_key
    }

    /// Returns the file size in bytes. Always `0` for directories.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Returns `true` if this entry is a directory.
    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    /// Returns `true` if the name starts with `.`.
    pub fn is_hidden(&self) -> bool {
        self.sort_key.starts_with('.')
    }

    /// Returns `true` if this entry is a symbolic link.
    pub fn is_symlink(&self) -> bool {
        self.is_symlink
    }
}

impl PartialEq for DirectoryEntry {
    fn eq(&self, other: &Self) -> bool {
        self.location == other.location
    }
}

impl Eq for DirectoryEntry {}

impl Hash for DirectoryEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.location.hash(state);
    }
}

impl Ord for DirectoryEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.is_hidden()
            .cmp(&other.is_hidden())
            .then_with(|| self.sort_key.cmp(&other.sort_key))
            .then_with(|| self.location.path().cmp(other.location.path()))
    }
}

impl PartialOrd for DirectoryEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
