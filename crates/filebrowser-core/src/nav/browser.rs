//! The top-level browser: roots, navigation stack and gated actions.

use std::path::{Path, PathBuf};

use crate::config::settings::Config;
use crate::error::{CoreError, CoreResult};
use crate::event::LoadTicket;
use crate::fs::classify::Renderer;
use crate::fs::entry::DirectoryEntry;
use crate::fs::location::Location;
use crate::fs::metadata::DEFAULT_DATE_FORMAT;
use crate::fs::preview::PreviewSettings;
use crate::loader::Loader;
use crate::nav::details::FileDetails;
use crate::nav::directory::DirectoryView;
use crate::nav::history::History;
use crate::options::BrowserOptions;
use crate::registry::{Placement, ViewerRegistry};
use crate::share::ShareTarget;

/// What opening a location leads to.
#[derive(Debug)]
pub enum Destination {
    /// A directory view, not yet listed.
    Directory(DirectoryView),
    /// The details of a file.
    File(FileDetails),
}

/// A navigable file browser over one or more roots.
///
/// The roots are shown as tabs; below the selected root a stack of opened
/// directories is kept, optionally topped by one open file.
#[derive(Debug)]
pub struct Browser {
    roots: Vec<Location>,
    root: usize,
    history: History,
    open_file: Option<Location>,
    options: BrowserOptions,
    registry: ViewerRegistry,
    preview: PreviewSettings,
    date_format: String,
}

impl Browser {
    /// Creates a browser over `roots`.
    ///
    /// An empty `roots` falls back to the home directory. When `current` is
    /// below the first root, the navigation stack starts opened down to it.
    pub fn new(
        roots: Vec<Location>,
        current: Option<&Path>,
        options: BrowserOptions,
        registry: ViewerRegistry,
    ) -> Self {
        let roots = if roots.is_empty() {
            vec![Location::new(home_dir())]
        } else {
            roots
        };

        let history = current
            .and_then(|path| Location::new(path).components_below(&roots[0]))
            .map(History::from_locations)
            .unwrap_or_default();

        tracing::debug!(
            "browser over {} root(s), starting {} deep",
            roots.len(),
            history.depth()
        );

        Self {
            roots,
            root: 0,
            history,
            open_file: None,
            options,
            registry,
            preview: PreviewSettings::default(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
        }
    }

    /// Creates a browser whose options, preview limits and date format come
    /// from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ConfigParse`] if the preview settings or the date
    /// format are invalid.
    pub fn from_config(
        roots: Vec<Location>,
        current: Option<&Path>,
        config: &Config,
        registry: ViewerRegistry,
    ) -> CoreResult<Self> {
        let preview = config.preview.settings()?;
        config.ui.validate()?;
        Ok(Self::new(roots, current, config.browser.options(), registry)
            .with_preview_settings(preview)
            .with_date_format(config.ui.date_format.clone()))
    }

    #[must_use]
    pub fn with_preview_settings(self, preview: PreviewSettings) -> Self {
        Self { preview, ..self }
    }

    #[must_use]
    pub fn with_date_format(self, date_format: impl Into<String>) -> Self {
        Self {
            date_format: date_format.into(),
            ..self
        }
    }

    pub fn roots(&self) -> &[Location] {
        &self.roots
    }

    /// The selected root.
    pub fn root(&self) -> &Location {
        &self.roots[self.root]
    }

    pub fn root_index(&self) -> usize {
        self.root
    }

    pub fn options(&self) -> BrowserOptions {
        self.options
    }

    pub fn registry(&self) -> &ViewerRegistry {
        &self.registry
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn preview_settings(&self) -> &PreviewSettings {
        &self.preview
    }

    /// Switches to the root at `index` and returns to its top.
    ///
    /// Returns `false` and changes nothing if `index` is out of range.
    pub fn select_root(&mut self, index: usize) -> bool {
        if index >= self.roots.len() {
            return false;
        }
        self.root = index;
        self.pop_to_root();
        true
    }

    /// Location on top of the navigation stack: the open file, the innermost
    /// opened directory, or the root.
    pub fn current(&self) -> &Location {
        self.open_file
            .as_ref()
            .unwrap_or_else(|| self.current_directory())
    }

    /// Innermost opened directory, or the root.
    pub fn current_directory(&self) -> &Location {
        self.history.current().unwrap_or_else(|| self.root())
    }

    /// Title for the current screen: the name of [`Self::current`].
    pub fn title(&self) -> String {
        self.current().filename()
    }

    /// A view of the current directory, ready to be listed.
    pub fn directory_view(&self) -> DirectoryView {
        DirectoryView::new(self.current_directory().clone(), self.show_hidden())
    }

    /// Re-lists the current directory on the calling thread.
    pub fn refresh(&self) -> DirectoryView {
        self.directory_view().reload()
    }

    /// Opens a listed entry.
    ///
    /// # Errors
    ///
    /// See [`Self::open_location`].
    pub fn open(&mut self, entry: &DirectoryEntry) -> CoreResult<Destination> {
        self.open_location(entry.location().clone())
    }

    /// Opens `location`: directories are pushed on the navigation stack,
    /// files are shown in the details view.
    ///
    /// # Errors
    ///
    /// Returns an error if a file's details cannot be read; the navigation
    /// stack is unchanged in that case.
    pub fn open_location(&mut self, location: Location) -> CoreResult<Destination> {
        if location.is_dir() {
            tracing::debug!("opening directory {}", location.path().display());
            self.open_file = None;
            self.history = self.history.push(location.clone());
            return Ok(Destination::Directory(DirectoryView::new(
                location,
                self.show_hidden(),
            )));
        }

        let details = self.details(&location)?;
        self.open_file = Some(location);
        Ok(Destination::File(details))
    }

    /// Leaves the open file or the innermost directory.
    ///
    /// Returns the new current location, or `None` if already at the root.
    pub fn go_back(&mut self) -> Option<&Location> {
        if self.open_file.take().is_none() {
            let (history, _) = self.history.pop()?;
            self.history = history;
        }
        Some(self.current())
    }

    /// Returns to the top of the selected root.
    pub fn pop_to_root(&mut self) {
        self.open_file = None;
        self.history = self.history.to_root();
    }

    /// Deletes `locations` from `view`'s directory and re-lists it.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotPermitted`] if deletion is disabled.
    pub fn delete<'a>(
        &self,
        view: DirectoryView,
        locations: impl IntoIterator<Item = &'a Location>,
    ) -> CoreResult<DirectoryView> {
        view.delete(locations, self.options)
    }

    /// Deletes everything listed in `view` and re-lists it.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotPermitted`] unless the clear action is enabled.
    pub fn clear_directory(&self, view: DirectoryView) -> CoreResult<DirectoryView> {
        view.clear(self.options)
    }

    /// Hands `location` to the host's sharing service.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotPermitted`] if sharing is disabled, otherwise
    /// whatever `target` returns.
    pub fn share(&self, location: &Location, target: &dyn ShareTarget) -> CoreResult<()> {
        if !self.options.contains(BrowserOptions::ALLOW_SHARE) {
            return Err(CoreError::NotPermitted("sharing files"));
        }
        tracing::debug!("sharing {}", location.path().display());
        target.share(location)
    }

    /// Builds the details model for `location`.
    ///
    /// # Errors
    ///
    /// Returns the metadata error if the file cannot be inspected.
    pub fn details(&self, location: &Location) -> CoreResult<FileDetails> {
        FileDetails::load(
            location.clone(),
            self.options,
            &self.registry,
            &self.date_format,
        )
    }

    /// Decorator annotations for a listing row.
    pub fn row_decorations(&self, entry: &DirectoryEntry) -> Vec<String> {
        self.registry.decorations(entry.location(), Placement::List)
    }

    /// Starts loading `location` for `renderer` on `loader`, using this
    /// browser's preview settings.
    pub fn request_preview(
        &self,
        loader: &Loader,
        location: &Location,
        renderer: Renderer,
    ) -> LoadTicket {
        loader.request_preview(location.clone(), renderer, self.preview)
    }

    fn show_hidden(&self) -> bool {
        self.options.contains(BrowserOptions::SHOW_HIDDEN)
    }
}

fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("/"))
}
