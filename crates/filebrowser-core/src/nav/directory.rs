//! State of one directory listing as shown by the frontend.

use crate::error::{CoreError, CoreResult};
use crate::event::{Event, LoadTicket};
use crate::fs::entry::DirectoryEntry;
use crate::fs::location::Location;
use crate::fs::ops::{delete_entries, list_directory, DeleteReport};
use crate::loader::Loader;
use crate::options::BrowserOptions;

/// Listing state for a single directory.
///
/// Immutable: every transition consumes the view and returns a new one.
/// Errors are kept as display strings until the user dismisses them.
#[derive(Debug, Clone)]
pub struct DirectoryView {
    location: Location,
    entries: Option<Vec<DirectoryEntry>>,
    errors: Vec<String>,
    loading: bool,
    show_hidden: bool,
}

impl DirectoryView {
    /// Creates a view of `location` that has not been listed yet.
    pub fn new(location: Location, show_hidden: bool) -> Self {
        Self {
            location,
            entries: None,
            errors: Vec::new(),
            loading: true,
            show_hidden,
        }
    }

    /// Creates a view and lists it on the calling thread.
    pub fn listed(location: Location, show_hidden: bool) -> Self {
        Self::new(location, show_hidden).reload()
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Entries of the last successful listing, `None` before the first one.
    pub fn entries(&self) -> Option<&[DirectoryEntry]> {
        self.entries.as_deref()
    }

    /// Messages waiting to be dismissed.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Returns `true` once a listing has completed with no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.as_ref().is_some_and(Vec::is_empty)
    }

    /// Directory name followed by the entry count once listed, e.g. `"docs (3)"`.
    pub fn title(&self) -> String {
        let name = self.location.filename();
        match &self.entries {
            Some(entries) => format!("{name} ({})", entries.len()),
            None => name,
        }
    }

    /// Starts a background listing on `loader`.
    pub fn request(&self, loader: &Loader) -> LoadTicket {
        loader.request_listing(self.location.clone(), self.show_hidden)
    }

    /// Applies a loader event.
    ///
    /// Events for other locations or superseded tickets leave the view untouched.
    #[must_use]
    pub fn apply(self, event: Event, loader: &Loader) -> Self {
        if !loader.is_current(event.ticket()) || event.location() != &self.location {
            return self;
        }
        match event {
            Event::DirectoryLoaded { entries, .. } => self.with_listing(Ok(entries)),
            Event::DirectoryFailed { error, .. } => Self {
                loading: false,
                errors: vec![error],
                ..self
            },
            Event::PreviewLoaded { .. } | Event::PreviewFailed { .. } => self,
        }
    }

    /// Re-lists the directory on the calling thread.
    #[must_use]
    pub fn reload(self) -> Self {
        let result = list_directory(self.location.path(), self.show_hidden);
        self.with_listing(result)
    }

    /// Deletes `locations`, then re-lists.
    ///
    /// Deletion is best effort; every failure ends up in [`Self::errors`].
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotPermitted`] without touching anything when
    /// deletion is disabled.
    pub fn delete<'a>(
        self,
        locations: impl IntoIterator<Item = &'a Location>,
        options: BrowserOptions,
    ) -> CoreResult<Self> {
        if !options.contains(BrowserOptions::ALLOW_DELETE) {
            return Err(CoreError::NotPermitted("deleting files"));
        }
        let report = delete_entries(locations);
        Ok(self.after_delete(report))
    }

    /// Deletes every listed entry, then re-lists.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotPermitted`] unless the clear-directory action is
    /// enabled.
    pub fn clear(self, options: BrowserOptions) -> CoreResult<Self> {
        if !options.contains(BrowserOptions::SHOW_CLEAR_DIRECTORY) {
            return Err(CoreError::NotPermitted("clearing the directory"));
        }
        let report = delete_entries(
            self.entries
                .iter()
                .flatten()
                .map(DirectoryEntry::location),
        );
        Ok(self.after_delete(report))
    }

    /// Clears the error list.
    #[must_use]
    pub fn dismiss_errors(self) -> Self {
        Self {
            errors: Vec::new(),
            ..self
        }
    }

    fn after_delete(self, report: DeleteReport) -> Self {
        tracing::debug!(
            "deleted {} in {}, {} failed",
            report.deleted,
            self.location.path().display(),
            report.failures.len()
        );
        let view = self.reload();
        // A failed re-listing already replaced the errors.
        if view.errors.is_empty() && !report.is_complete() {
            return Self {
                errors: report.messages(),
                ..view
            };
        }
        view
    }

    fn with_listing(self, result: CoreResult<Vec<DirectoryEntry>>) -> Self {
        match result {
            Ok(entries) => Self {
                entries: Some(entries),
                loading: false,
                ..self
            },
            Err(e) => {
                tracing::debug!("listing {} failed: {e}", self.location.path().display());
                Self {
                    loading: false,
                    errors: vec![e.to_string()],
                    ..self
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn names(view: &DirectoryView) -> Vec<String> {
        view.entries()
            .unwrap()
            .iter()
            .map(DirectoryEntry::name)
            .collect()
    }

    #[test]
    fn new_view_is_loading() {
        let view = DirectoryView::new(Location::new("/tmp"), true);
        assert!(view.is_loading());
        assert!(view.entries().is_none());
        assert!(!view.is_empty());
        assert_eq!(view.title(), "tmp");
    }

    #[test]
    fn listed_view_has_count_in_title() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("docs");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join("a.txt"), "").unwrap();
        fs::write(dir.join("b.txt"), "").unwrap();

        let view = DirectoryView::listed(Location::new(&dir), true);
        assert!(!view.is_loading());
        assert_eq!(view.title(), "docs (2)");
    }

    #[test]
    fn empty_directory_is_empty() {
        let tmp = TempDir::new().unwrap();
        let view = DirectoryView::listed(Location::new(tmp.path()), true);
        assert!(view.is_empty());
        assert!(view.errors().is_empty());
    }

    #[test]
    fn hidden_files_follow_option() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".hidden"), "").unwrap();
        fs::write(tmp.path().join("shown"), "").unwrap();

        let view = DirectoryView::listed(Location::new(tmp.path()), false);
        assert_eq!(names(&view), vec!["shown"]);
    }

    #[test]
    fn missing_directory_reports_error() {
        let tmp = TempDir::new().unwrap();
        let view = DirectoryView::listed(Location::new(tmp.path().join("gone")), true);
        assert!(!view.is_loading());
        assert_eq!(view.errors().len(), 1);
        assert!(view.errors()[0].contains("not found"));

        let view = view.dismiss_errors();
        assert!(view.errors().is_empty());
    }

    #[test]
    fn delete_requires_option() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("keep.txt");
        fs::write(&file, "").unwrap();

        let view = DirectoryView::listed(Location::new(tmp.path()), true);
        let result = view.delete(
            [&Location::new(&file)],
            BrowserOptions::default().with(BrowserOptions::ALLOW_DELETE, false),
        );
        assert!(matches!(result, Err(CoreError::NotPermitted(_))));
        assert!(file.exists());
    }

    #[test]
    fn delete_relists() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.txt"), "").unwrap();
        fs::write(tmp.path().join("b.txt"), "").unwrap();

        let view = DirectoryView::listed(Location::new(tmp.path()), true);
        let doomed = Location::new(tmp.path().join("a.txt"));
        let view = view.delete([&doomed], BrowserOptions::default()).unwrap();

        assert_eq!(names(&view), vec!["b.txt"]);
        assert!(view.errors().is_empty());
    }

    #[test]
    fn partial_delete_failure_surfaces_messages() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.txt"), "").unwrap();
        fs::write(tmp.path().join("c.txt"), "").unwrap();

        let view = DirectoryView::listed(Location::new(tmp.path()), true);
        let a = Location::new(tmp.path().join("a.txt"));
        let b = Location::new(tmp.path().join("b.txt"));
        let c = Location::new(tmp.path().join("c.txt"));
        let view = view.delete([&a, &b, &c], BrowserOptions::default()).unwrap();

        assert_eq!(view.entries().unwrap().len(), 0);
        assert_eq!(view.errors().len(), 1);
        assert!(view.errors()[0].starts_with("b.txt: "));
    }

    #[cfg(unix)]
    #[test]
    fn undeletable_entry_stays_listed() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.txt"), "").unwrap();
        fs::write(tmp.path().join("c.txt"), "").unwrap();
        let locked = tmp.path().join("b");
        fs::create_dir(&locked).unwrap();
        fs::write(locked.join("inner.txt"), "").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

        // Permission bits do not bind a superuser.
        if fs::write(locked.join("canary"), "").is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let view = DirectoryView::listed(Location::new(tmp.path()), true);
        let a = Location::new(tmp.path().join("a.txt"));
        let b = Location::new(&locked);
        let c = Location::new(tmp.path().join("c.txt"));
        let view = view.delete([&a, &b, &c], BrowserOptions::default()).unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(names(&view), vec!["b"]);
        assert_eq!(view.errors().len(), 1);
        assert!(view.errors()[0].starts_with("b: "));
        assert!(locked.join("inner.txt").exists());
    }

    #[test]
    fn clear_requires_option() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.txt"), "").unwrap();

        let view = DirectoryView::listed(Location::new(tmp.path()), true);
        assert!(matches!(
            view.clear(BrowserOptions::default()),
            Err(CoreError::NotPermitted(_))
        ));
        assert!(tmp.path().join("a.txt").exists());
    }

    #[test]
    fn clear_removes_listed_entries() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.txt"), "").unwrap();
        fs::create_dir(tmp.path().join("sub")).unwrap();
        fs::write(tmp.path().join("sub").join("inner"), "").unwrap();

        let view = DirectoryView::listed(Location::new(tmp.path()), true);
        let view = view
            .clear(BrowserOptions::default() | BrowserOptions::SHOW_CLEAR_DIRECTORY)
            .unwrap();

        assert!(view.is_empty());
        assert_eq!(view.title(), format!("{} (0)", Location::new(tmp.path()).filename()));
    }

    #[test]
    fn clear_skips_unlisted_hidden_files() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(".keep"), "").unwrap();
        fs::write(tmp.path().join("a.txt"), "").unwrap();

        let view = DirectoryView::listed(Location::new(tmp.path()), false);
        let view = view
            .clear(BrowserOptions::SHOW_CLEAR_DIRECTORY)
            .unwrap();

        assert!(view.is_empty());
        assert!(tmp.path().join(".keep").exists());
    }

    #[tokio::test]
    async fn apply_ignores_stale_and_foreign_events() {
        let tmp = TempDir::new().unwrap();
        let (loader, _rx) = Loader::new();
        let view = DirectoryView::new(Location::new(tmp.path()), true);
        let stale = view.request(&loader);
        loader.cancel();

        let view = view.apply(
            Event::DirectoryLoaded {
                ticket: stale,
                location: Location::new(tmp.path()),
                entries: Vec::new(),
            },
            &loader,
        );
        assert!(view.is_loading());

        let view = view.apply(
            Event::DirectoryLoaded {
                ticket: loader.current(),
                location: Location::new("/somewhere/else"),
                entries: Vec::new(),
            },
            &loader,
        );
        assert!(view.is_loading());
    }

    #[tokio::test]
    async fn request_then_apply_fills_entries() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("one.txt"), "").unwrap();

        let (loader, mut rx) = Loader::new();
        let view = DirectoryView::new(Location::new(tmp.path()), true);
        view.request(&loader);

        let event = tokio::time::timeout(std::time::Duration::from_secs(5), rx.recv())
            .await
            .unwrap()
            .unwrap();
        let view = view.apply(event, &loader);

        assert!(!view.is_loading());
        assert_eq!(names(&view), vec!["one.txt"]);
    }
}
