//! Error types for `filebrowser-core`.
//!
//! All fallible operations in the core library return [`CoreResult<T>`],
//! which is an alias for `Result<T, CoreError>`. Partial failures (such as
//! a batch delete where only some entries could be removed) are reported as
//! values, see [`crate::fs::ops::DeleteReport`].

use std::path::PathBuf;

use crate::fs::format::format_size;

/// Unified error type for all core operations.
///
/// Each variant captures just enough context for the caller to display
/// a meaningful inline message.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The target path does not exist.
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    /// The process lacks permission to access the path.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// A directory was expected but the path points to a file.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// File contents were requested but the path is a directory.
    #[error("is a directory: {0}")]
    IsADirectory(PathBuf),

    /// The file exceeds the size ceiling of the byte view.
    #[error("file too large to display ({}). Maximum size is {}.", human(.size), human(.limit))]
    TooLarge {
        /// Actual file size in bytes.
        size: u64,
        /// Configured ceiling in bytes.
        limit: u64,
    },

    /// File contents could not be decoded (image, text, JSON).
    #[error("decode error: {0}")]
    Decode(String),

    /// The action is disabled by the browser options.
    #[error("not permitted: {0}")]
    NotPermitted(&'static str),

    /// Failed to parse a TOML configuration file.
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// An I/O error that doesn't fit a more specific variant.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Maps an I/O error on `path` to the most specific variant.
    pub(crate) fn from_io(err: std::io::Error, path: &std::path::Path) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => CoreError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => CoreError::PermissionDenied(path.to_path_buf()),
            _ => CoreError::Io(err),
        }
    }
}

fn human(bytes: &u64) -> String {
    format_size(*bytes)
}

/// Convenience alias used throughout `filebrowser-core`.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    #[test]
    fn not_found_displays_path() {
        let err = CoreError::NotFound(PathBuf::from("/missing/file"));
        assert_eq!(err.to_string(), "path not found: /missing/file");
    }

    #[test]
    fn permission_denied_displays_path() {
        let err = CoreError::PermissionDenied(PathBuf::from("/secret"));
        assert_eq!(err.to_string(), "permission denied: /secret");
    }

    #[test]
    fn not_a_directory_displays_path() {
        let err = CoreError::NotADirectory(PathBuf::from("/some/file.txt"));
        assert_eq!(err.to_string(), "not a directory: /some/file.txt");
    }

    #[test]
    fn is_a_directory_displays_path() {
        let err = CoreError::IsADirectory(PathBuf::from("/some/dir"));
        assert_eq!(err.to_string(), "is a directory: /some/dir");
    }

    #[test]
    fn too_large_displays_human_sizes() {
        let err = CoreError::TooLarge {
            size: 12 * 1024 * 1024,
            limit: 10 * 1024 * 1024,
        };
        assert_eq!(
            err.to_string(),
            "file too large to display (12.0 MB). Maximum size is 10.0 MB."
        );
    }

    #[test]
    fn decode_displays_message() {
        let err = CoreError::Decode("bad png".to_string());
        assert_eq!(err.to_string(), "decode error: bad png");
    }

    #[test]
    fn not_permitted_displays_message() {
        let err = CoreError::NotPermitted("deletion is disabled");
        assert_eq!(err.to_string(), "not permitted: deletion is disabled");
    }

    #[test]
    fn config_parse_displays_message() {
        let err = CoreError::ConfigParse("unexpected token".to_string());
        assert_eq!(err.to_string(), "config parse error: unexpected token");
    }

    #[test]
    fn io_error_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "gone");
        let core_err: CoreError = io_err.into();
        assert!(matches!(core_err, CoreError::Io(_)));
        assert!(core_err.to_string().contains("gone"));
    }

    #[test]
    fn from_io_maps_specific_kinds() {
        let path = Path::new("/x");
        let nf = std::io::Error::new(std::io::ErrorKind::NotFound, "nf");
        assert!(matches!(CoreError::from_io(nf, path), CoreError::NotFound(_)));

        let pd = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "pd");
        assert!(matches!(
            CoreError::from_io(pd, path),
            CoreError::PermissionDenied(_)
        ));

        let other = std::io::Error::new(std::io::ErrorKind::Other, "other");
        assert!(matches!(CoreError::from_io(other, path), CoreError::Io(_)));
    }
}
