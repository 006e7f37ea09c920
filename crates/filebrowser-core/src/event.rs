//! Notifications sent from background loads back to the owning view.
//!
//! Events flow **worker → view** over the channel returned by
//! [`crate::loader::Loader::new`]. Every event carries the [`LoadTicket`] of
//! the request that produced it; the view checks it with
//! [`crate::loader::Loader::is_current`] before applying anything.

use crate::fs::entry::DirectoryEntry;
use crate::fs::location::Location;
use crate::fs::preview::Preview;

/// Identifies one load request. Later requests carry larger tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(pub(crate) u64);

impl LoadTicket {
    /// Raw generation number.
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// A notification the loader sends back to the view.
#[derive(Debug, Clone)]
pub enum Event {
    /// A directory has been successfully read.
    DirectoryLoaded {
        ticket: LoadTicket,
        /// The directory that was listed.
        location: Location,
        /// Sorted entries of the directory.
        entries: Vec<DirectoryEntry>,
    },
    /// Listing a directory failed.
    DirectoryFailed {
        ticket: LoadTicket,
        location: Location,
        /// The error message.
        error: String,
    },
    /// File contents are ready for display.
    PreviewLoaded {
        ticket: LoadTicket,
        location: Location,
        preview: Preview,
    },
    /// Loading file contents failed.
    PreviewFailed {
        ticket: LoadTicket,
        location: Location,
        error: String,
    },
}

impl Event {
    /// Ticket of the request that produced this event.
    pub fn ticket(&self) -> LoadTicket {
        match self {
            Event::DirectoryLoaded { ticket, .. }
            | Event::DirectoryFailed { ticket, .. }
            | Event::PreviewLoaded { ticket, .. }
            | Event::PreviewFailed { ticket, .. } => *ticket,
        }
    }

    /// Location the request was made for.
    pub fn location(&self) -> &Location {
        match self {
            Event::DirectoryLoaded { location, .. }
            | Event::DirectoryFailed { location, .. }
            | Event::PreviewLoaded { location, .. }
            | Event::PreviewFailed { location, .. } => location,
        }
    }
}
