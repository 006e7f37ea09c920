//! Directory listing and deletion.

use std::path::Path;

use crate::error::{CoreError, CoreResult};
use crate::fs::entry::DirectoryEntry;
use crate::fs::location::Location;

/// Lists the immediate children of a directory, sorted for display.
///
/// Entries are ordered by [`DirectoryEntry`]'s `Ord`: dotfiles last, each
/// group case-insensitive ascending. Hidden entries are dropped when
/// `show_hidden` is `false`. Children whose metadata cannot be read are
/// skipped.
///
/// # Errors
///
/// - [`CoreError::NotFound`] — the path does not exist.
/// - [`CoreError::NotADirectory`] — the path is not a directory.
/// - [`CoreError::PermissionDenied`] — read access is denied.
/// - [`CoreError::Io`] — any other I/O error.
///
/// # Examples
///
/// ```no_run
/// use filebrowser_core::list_directory;
/// use std::path::Path;
///
/// let entries = list_directory(Path::new("/home/user"), false).unwrap();
/// for entry in &entries {
///     println!("{}", entry.name());
/// }
/// ```
pub fn list_directory(path: &Path, show_hidden: bool) -> CoreResult<Vec<DirectoryEntry>> {
    let metadata = std::fs::metadata(path).map_err(|e| CoreError::from_io(e, path))?;
    if !metadata.is_dir() {
        return Err(CoreError::NotADirectory(path.to_path_buf()));
    }

    let read_dir = std::fs::read_dir(path).map_err(|e| CoreError::from_io(e, path))?;

    let mut entries = Vec::new();
    for dir_entry in read_dir {
        let dir_entry = match dir_entry {
            Ok(e) => e,
            Err(e) => {
                tracing::debug!("skipping unreadable entry in {}: {e}", path.display());
                continue;
            }
        };
        let entry_path = dir_entry.path();
        let metadata = match std::fs::symlink_metadata(&entry_path) {
            Ok(m) => m,
            Err(e) => {
                tracing::debug!("skipping {}: {e}", entry_path.display());
                continue;
            }
        };
        let entry = DirectoryEntry::new(entry_path, &metadata);
        if show_hidden || !entry.is_hidden() {
            entries.push(entry);
        }
    }

    entries.sort();
    tracing::debug!("listed {} entries in {}", entries.len(), path.display());
    Ok(entries)
}

/// Deletes a file or directory (recursively). Symlinks are removed, never followed.
///
/// # Errors
///
/// - [`CoreError::NotFound`] if `path` does not exist.
/// - [`CoreError::PermissionDenied`] if removal is refused.
/// - [`CoreError::Io`] for any other I/O failure.
pub fn delete_path(path: &Path) -> CoreResult<()> {
    let meta = std::fs::symlink_metadata(path).map_err(|e| CoreError::from_io(e, path))?;

    let removal = if meta.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    };
    removal.map_err(|e| CoreError::from_io(e, path))
}

/// A location that could not be deleted, with the reason.
#[derive(Debug)]
pub struct DeleteFailure {
    pub location: Location,
    pub error: CoreError,
}

/// Outcome of a best-effort batch deletion.
#[derive(Debug, Default)]
pub struct DeleteReport {
    /// Number of locations removed.
    pub deleted: usize,
    /// One entry per location that could not be removed, in request order.
    pub failures: Vec<DeleteFailure>,
}

impl DeleteReport {
    /// Returns `true` if every requested location was removed.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Human-readable failure messages, one per failed location.
    pub fn messages(&self) -> Vec<String> {
        self.failures
            .iter()
            .map(|f| format!("{}: {}", f.location.filename(), f.error))
            .collect()
    }
}

/// Deletes every location, continuing past failures.
///
/// Never aborts early: each failure is recorded in the returned
/// [`DeleteReport`] and the remaining locations are still attempted.
pub fn delete_entries<'a>(locations: impl IntoIterator<Item = &'a Location>) -> DeleteReport {
    let mut report = DeleteReport::default();

    for location in locations {
        match delete_path(location.path()) {
            Ok(()) => {
                tracing::debug!("deleted {}", location.path().display());
                report.deleted += 1;
            }
            Err(error) => {
                tracing::warn!("failed to delete {}: {error}", location.path().display());
                report.failures.push(DeleteFailure {
                    location: location.clone(),
                    error,
                });
            }
        }
    }

    report
}

/// Deletes every child of `path` that a listing with `show_hidden` would show.
///
/// # Errors
///
/// Returns the listing error if the directory cannot be read; individual
/// deletion failures are reported in the [`DeleteReport`].
pub fn clear_directory(path: &Path, show_hidden: bool) -> CoreResult<DeleteReport> {
    let entries = list_directory(path, show_hidden)?;
    Ok(delete_entries(entries.iter().map(DirectoryEntry::location)))
}
