//! Locations: a path on the host filesystem plus a display title.

use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use unicode_normalization::UnicodeNormalization;

/// A file or folder the browser can show.
///
/// Immutable once created. Equality and hashing consider only the path, so
/// two locations with different titles for the same path are equal.
///
/// # Examples
///
/// ```
/// use filebrowser_core::Location;
///
/// let docs = Location::new("/home/user/Documents");
/// assert_eq!(docs.title(), "Documents");
///
/// let report = Location::with_title("/tmp/report.pdf", "Quarterly");
/// assert_eq!(report.filename(), "report.pdf");
/// assert_eq!(report, Location::new("/tmp/report.pdf"));
/// ```
#[derive(Debug, Clone)]
pub struct Location {
    path: PathBuf,
    title: String,
}

impl Location {
    /// Creates a location whose title is the last path component without
    /// its extension.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let title = default_title(&path);
        Self { path, title }
    }

    /// Creates a location with an explicit display title.
    pub fn with_title(path: impl Into<PathBuf>, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
        }
    }

    /// Returns the path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the display title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the last path component, NFC-normalised.
    ///
    /// The filesystem root has no file name and yields the full path instead.
    pub fn filename(&self) -> String {
        match self.path.file_name() {
            Some(name) => name.to_string_lossy().nfc().collect(),
            None => self.path.to_string_lossy().into_owned(),
        }
    }

    /// Returns the lowercase extension, if any.
    pub fn extension(&self) -> Option<String> {
        self.path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
    }

    /// Returns `true` if the path currently points to a regular file.
    pub fn is_file(&self) -> bool {
        self.path.is_file()
    }

    /// Returns `true` if the path currently points to a directory.
    pub fn is_dir(&self) -> bool {
        self.path.is_dir()
    }

    /// Returns `true` if this location is strictly below `ancestor`.
    pub fn is_below(&self, ancestor: &Location) -> bool {
        self.path != ancestor.path && self.path.starts_with(&ancestor.path)
    }

    /// Returns the directories from just below `ancestor` down to this
    /// location, outermost first, or `None` if this location is not below it.
    ///
    /// Used to pre-populate a navigation stack when the browser opens at a
    /// nested folder.
    pub fn components_below(&self, ancestor: &Location) -> Option<Vec<Location>> {
        if !self.is_below(ancestor) {
            return None;
        }
        let relative = self.path.strip_prefix(&ancestor.path).ok()?;
        let mut current = ancestor.path.clone();
        let steps = relative
            .components()
            .map(|component| {
                current.push(component);
                Location::new(current.clone())
            })
            .collect();
        Some(steps)
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for Location {}

impl Hash for Location {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

impl From<PathBuf> for Location {
    fn from(path: PathBuf) -> Self {
        Self::new(path)
    }
}

impl From<&Path> for Location {
    fn from(path: &Path) -> Self {
        Self::new(path)
    }
}

fn default_title(path: &Path) -> String {
    path.file_stem()
        .or_else(|| path.file_name())
        .map(|name| name.to_string_lossy().nfc().collect())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
