//! filebrowser core library — UI-agnostic file browser logic.
//!
//! `filebrowser-core` computes everything a file browser frontend displays:
//! sorted directory listings, file classification and previews, hex dumps,
//! metadata tables and the navigation stack. It is decoupled from any UI
//! framework; hosts render the state it produces.
//!
//! # Modules
//!
//! - [`fs`] — File system abstractions: [`Location`], [`DirectoryEntry`], listing, deletion, previews, hex dumps, metadata.
//! - [`nav`] — Navigation: the [`Browser`], directory views, file details and history.
//! - [`loader`] — Background loading with superseded results discarded.
//! - [`registry`] — Host-registered file formats and decorators.
//! - [`config`] — TOML configuration and persisted preferences.
//! - [`event`] — Events sent from background loads back to the view.
//! - [`error`] — Unified error type ([`CoreError`]) and result alias ([`CoreResult`]).

pub mod config;
pub mod error;
pub mod event;
pub mod fs;
pub mod loader;
pub mod nav;
pub mod options;
pub mod registry;
pub mod share;

pub use error::{CoreError, CoreResult};
pub use event::{Event, LoadTicket};
pub use fs::classify::{classify, select_renderer, FileKind, Renderer};
pub use fs::entry::DirectoryEntry;
pub use fs::hex::{format_hex, HexDump, HexRow, OffsetStyle};
pub use fs::location::Location;
pub use fs::metadata::{read_metadata, MetadataRow, ResourceKey, ResourceValue, ResourceValues};
pub use fs::ops::{clear_directory, delete_entries, list_directory, DeleteFailure, DeleteReport};
pub use fs::preview::{load_preview, ImageInfo, Preview, PreviewSettings, TextSyntax};
pub use loader::Loader;
pub use nav::browser::{Browser, Destination};
pub use nav::details::{FileDetails, FormatDetails, Tab};
pub use nav::directory::DirectoryView;
pub use nav::history::History;
pub use options::BrowserOptions;
pub use registry::{FileDecorator, FileFormat, FormatView, Placement, ViewerRegistry};
pub use share::ShareTarget;

pub use config::preferences::{DetailsTab, Preferences};
pub use config::settings::Config;
