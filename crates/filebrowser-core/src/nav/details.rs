//! The file details model: metadata, contents and byte views of one file.

use crate::config::preferences::{DetailsTab, Preferences};
use crate::error::CoreResult;
use crate::fs::classify::{classify, select_renderer, FileKind, Renderer};
use crate::fs::location::Location;
use crate::fs::metadata::{read_metadata, MetadataRow};
use crate::options::BrowserOptions;
use crate::registry::{Placement, ViewerRegistry};

/// A pane of the details view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Tab {
    Metadata,
    Contents,
    Data,
    /// A registered custom format, labelled with its name.
    Format(String),
}

impl Tab {
    pub fn label(&self) -> &str {
        match self {
            Tab::Metadata => "Metadata",
            Tab::Contents => "Contents",
            Tab::Data => "Data",
            Tab::Format(name) => name,
        }
    }
}

impl From<DetailsTab> for Tab {
    fn from(tab: DetailsTab) -> Self {
        match tab {
            DetailsTab::Metadata => Tab::Metadata,
            DetailsTab::Contents => Tab::Contents,
            DetailsTab::Data => Tab::Data,
        }
    }
}

/// Output of a registered format parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatDetails {
    pub name: String,
    pub lines: Vec<String>,
}

/// Everything the details view shows for one file.
#[derive(Debug, Clone)]
pub struct FileDetails {
    location: Location,
    kind: FileKind,
    metadata: Vec<MetadataRow>,
    format: Option<FormatDetails>,
    decorations: Vec<String>,
    can_view: bool,
    can_share: bool,
}

impl FileDetails {
    /// Reads metadata and runs any registered format parser for `location`.
    ///
    /// A parser failure is logged and leaves the format tab out.
    ///
    /// # Errors
    ///
    /// Returns the metadata error if the file cannot be inspected.
    pub fn load(
        location: Location,
        options: BrowserOptions,
        registry: &ViewerRegistry,
        date_format: &str,
    ) -> CoreResult<Self> {
        let kind = classify(location.path());
        let metadata = read_metadata(location.path())?.rows(date_format);

        let format = registry.format_for_location(&location).and_then(|format| {
            match format.parse(location.path()) {
                Ok(view) => Some(FormatDetails {
                    name: format.name().to_string(),
                    lines: view.lines(),
                }),
                Err(e) => {
                    tracing::warn!(
                        "unable to parse {} as {}: {e}",
                        location.filename(),
                        format.name()
                    );
                    None
                }
            }
        });

        let decorations = registry.decorations(&location, Placement::Details);

        Ok(Self {
            kind,
            metadata,
            format,
            decorations,
            can_view: options.contains(BrowserOptions::ALLOW_VIEWING) && kind.is_viewable(),
            can_share: options.contains(BrowserOptions::ALLOW_SHARE),
            location,
        })
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Title of the details view: the file name with its extension.
    pub fn title(&self) -> String {
        self.location.filename()
    }

    pub fn kind(&self) -> FileKind {
        self.kind
    }

    pub fn metadata(&self) -> &[MetadataRow] {
        &self.metadata
    }

    /// Parsed custom format, if one is registered and parsing succeeded.
    pub fn format(&self) -> Option<&FormatDetails> {
        self.format.as_ref()
    }

    /// Annotations from registered decorators.
    pub fn decorations(&self) -> &[String] {
        &self.decorations
    }

    /// Whether the "view" action is offered.
    pub fn can_view(&self) -> bool {
        self.can_view
    }

    /// Whether the "share" action is offered.
    pub fn can_share(&self) -> bool {
        self.can_share
    }

    /// Available tabs, in display order.
    pub fn tabs(&self) -> Vec<Tab> {
        let mut tabs = vec![Tab::Metadata, Tab::Contents, Tab::Data];
        if let Some(format) = &self.format {
            tabs.push(Tab::Format(format.name.clone()));
        }
        tabs
    }

    /// Tab to show first, honouring the remembered choice.
    pub fn initial_tab(&self, preferences: &Preferences) -> Tab {
        Tab::from(preferences.details_tab)
    }

    /// Renderer that loads `tab`, or `None` for tabs that need no loading.
    pub fn renderer_for(&self, tab: &Tab) -> Option<Renderer> {
        match tab {
            Tab::Metadata | Tab::Format(_) => None,
            Tab::Contents => Some(select_renderer(self.kind, false)),
            Tab::Data => Some(Renderer::Hex),
        }
    }
}
