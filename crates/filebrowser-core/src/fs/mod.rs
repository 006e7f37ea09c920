//! File system abstractions for the browser.
//!
//! This module provides the core value types ([`location::Location`],
//! [`entry::DirectoryEntry`]), directory listing and deletion ([`ops`]),
//! content classification ([`classify`]), preview loading ([`preview`]),
//! hex dumps ([`hex`]) and metadata queries ([`metadata`]).

pub mod classify;
pub mod entry;
pub mod format;
pub mod hex;
pub mod location;
pub mod metadata;
pub mod ops;
pub mod preview;

pub use classify::{FileKind, Renderer};
pub use ops::{DeleteFailure, DeleteReport};
pub use preview::{ImageInfo, Preview, PreviewSettings};
