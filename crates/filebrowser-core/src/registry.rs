//! Extension points supplied by the embedding application.
//!
//! A [`ViewerRegistry`] is built by the host and handed to the
//! [`crate::Browser`] at construction; it lives exactly as long as that
//! browser. It holds two kinds of plug-ins:
//!
//! - [`FileFormat`]s parse files with a given extension into a custom
//!   [`FormatView`], shown as an extra tab in the details pane.
//! - [`FileDecorator`]s annotate rows in the listing or the details pane.

use std::fmt;
use std::path::Path;

use crate::error::CoreResult;
use crate::fs::location::Location;

/// Where a decoration will be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// A row of the directory listing.
    List,
    /// The file details pane.
    Details,
}

/// A parsed custom file, rendered as plain lines.
pub trait FormatView: Send {
    fn lines(&self) -> Vec<String>;
}

/// A viewer for one file extension.
pub trait FileFormat: Send + Sync {
    /// Extension handled by this format, without the dot. Matched case-insensitively.
    fn file_extension(&self) -> &str;

    /// Tab label for the parsed view.
    fn name(&self) -> &str;

    /// Parses the file at `path`.
    fn parse(&self, path: &Path) -> CoreResult<Box<dyn FormatView>>;
}

/// Adds host-specific annotations to files.
pub trait FileDecorator: Send + Sync {
    /// Returns an annotation for `location`, or `None` to add nothing.
    fn decorate(&self, location: &Location, placement: Placement) -> Option<String>;
}

/// Formats and decorators registered for one browser.
#[derive(Default)]
pub struct ViewerRegistry {
    formats: Vec<Box<dyn FileFormat>>,
    decorators: Vec<Box<dyn FileDecorator>>,
}

impl ViewerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the registry with `format` appended.
    #[must_use]
    pub fn with_format(mut self, format: impl FileFormat + 'static) -> Self {
        self.register_format(format);
        self
    }

    /// Returns the registry with `decorator` appended.
    #[must_use]
    pub fn with_decorator(mut self, decorator: impl FileDecorator + 'static) -> Self {
        self.register_decorator(decorator);
        self
    }

    /// Appends a format. Earlier registrations win for the same extension.
    pub fn register_format(&mut self, format: impl FileFormat + 'static) {
        tracing::debug!(
            "registered viewer {:?} for .{}",
            format.name(),
            format.file_extension()
        );
        self.formats.push(Box::new(format));
    }

    /// Appends a decorator.
    pub fn register_decorator(&mut self, decorator: impl FileDecorator + 'static) {
        self.decorators.push(Box::new(decorator));
    }

    /// Returns the first format registered for `extension`.
    pub fn format_for(&self, extension: &str) -> Option<&dyn FileFormat> {
        self.formats
            .iter()
            .find(|f| f.file_extension().eq_ignore_ascii_case(extension))
            .map(Box::as_ref)
    }

    /// Returns the format matching `location`'s extension, if any.
    pub fn format_for_location(&self, location: &Location) -> Option<&dyn FileFormat> {
        location.extension().and_then(|ext| self.format_for(&ext))
    }

    /// Collects every decorator's annotation for `location`.
    pub fn decorations(&self, location: &Location, placement: Placement) -> Vec<String> {
        self.decorators
            .iter()
            .filter_map(|d| d.decorate(location, placement))
            .collect()
    }

    /// Number of registered formats.
    pub fn format_count(&self) -> usize {
        self.formats.len()
    }
}

impl fmt::Debug for ViewerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formats: Vec<String> = self
            .formats
            .iter()
            .map(|fmt| format!("{} (.{})", fmt.name(), fmt.file_extension()))
            .collect();
        f.debug_struct("ViewerRegistry")
            .field("formats", &formats)
            .field("decorators", &self.decorators.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    struct LineCount;

    struct Lines(usize);

    impl FormatView for Lines {
        fn lines(&self) -> Vec<String> {
            vec![format!("{} lines", self.0)]
        }
    }

    impl FileFormat for LineCount {
        fn file_extension(&self) -> &str {
            "log"
        }

        fn name(&self) -> &str {
            "Line count"
        }

        fn parse(&self, path: &Path) -> CoreResult<Box<dyn FormatView>> {
            let text = std::fs::read_to_string(path).map_err(CoreError::Io)?;
            Ok(Box::new(Lines(text.lines().count())))
        }
    }

    struct Named(&'static str);

    impl FileFormat for Named {
        fn file_extension(&self) -> &str {
            "log"
        }

        fn name(&self) -> &str {
            self.0
        }

        fn parse(&self, _path: &Path) -> CoreResult<Box<dyn FormatView>> {
            Err(CoreError::Decode("unused".to_string()))
        }
    }

    struct ListOnly;

    impl FileDecorator for ListOnly {
        fn decorate(&self, location: &Location, placement: Placement) -> Option<String> {
            (placement == Placement::List).then(|| format!("[{}]", location.title()))
        }
    }

    #[test]
    fn format_lookup_is_case_insensitive() {
        let registry = ViewerRegistry::new().with_format(LineCount);
        assert!(registry.format_for("LOG").is_some());
        assert!(registry.format_for("log").is_some());
        assert!(registry.format_for("txt").is_none());
    }

    #[test]
    fn first_registration_wins() {
        let registry = ViewerRegistry::new()
            .with_format(Named("first"))
            .with_format(Named("second"));
        assert_eq!(registry.format_for("log").unwrap().name(), "first");
        assert_eq!(registry.format_count(), 2);
    }

    #[test]
    fn format_for_location_uses_extension() {
        let registry = ViewerRegistry::new().with_format(LineCount);
        assert!(registry
            .format_for_location(&Location::new("/var/app.LOG"))
            .is_some());
        assert!(registry
            .format_for_location(&Location::new("/var/README"))
            .is_none());
    }

    #[test]
    fn parse_produces_view() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("app.log");
        std::fs::write(&path, "a\nb\nc\n").unwrap();

        let registry = ViewerRegistry::new().with_format(LineCount);
        let view = registry.format_for("log").unwrap().parse(&path).unwrap();
        assert_eq!(view.lines(), vec!["3 lines".to_string()]);
    }

    #[test]
    fn decorations_respect_placement() {
        let registry = ViewerRegistry::new().with_decorator(ListOnly);
        let loc = Location::with_title("/a/b.txt", "B");
        assert_eq!(registry.decorations(&loc, Placement::List), vec!["[B]"]);
        assert!(registry.decorations(&loc, Placement::Details).is_empty());
    }

    #[test]
    fn separate_registries_are_independent() {
        let with = ViewerRegistry::new().with_format(LineCount);
        let without = ViewerRegistry::new();
        assert!(with.format_for("log").is_some());
        assert!(without.format_for("log").is_none());
    }

    #[test]
    fn debug_lists_formats() {
        let registry = ViewerRegistry::new().with_format(LineCount);
        let debug = format!("{registry:?}");
        assert!(debug.contains("Line count (.log)"));
    }
}
