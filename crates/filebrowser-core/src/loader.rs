//! Background loading of listings and previews.
//!
//! Work runs on tokio's blocking pool and results come back as [`Event`]s
//! over an unbounded mpsc channel. Each request takes a fresh
//! [`LoadTicket`]; starting another request (or calling
//! [`Loader::cancel`]) supersedes every earlier one. Superseded results are
//! dropped by the worker before sending, and the receiving side filters
//! again with [`Loader::is_current`] since a result may already be in the
//! channel when it is superseded.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::event::{Event, LoadTicket};
use crate::fs::classify::Renderer;
use crate::fs::location::Location;
use crate::fs::ops::list_directory;
use crate::fs::preview::{load_preview, PreviewSettings};

/// Issues background loads for a single view.
///
/// Each view owns its own loader, so tickets from different views never
/// interfere. Request methods must be called from within a tokio runtime.
#[derive(Debug, Clone)]
pub struct Loader {
    generation: Arc<AtomicU64>,
    tx: UnboundedSender<Event>,
}

impl Loader {
    /// Creates a loader and the receiver its events arrive on.
    pub fn new() -> (Self, UnboundedReceiver<Event>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let loader = Self {
            generation: Arc::new(AtomicU64::new(0)),
            tx,
        };
        (loader, rx)
    }

    /// Ticket of the most recent request.
    pub fn current(&self) -> LoadTicket {
        LoadTicket(self.generation.load(Ordering::SeqCst))
    }

    /// Returns `true` if `ticket` has not been superseded.
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.current() == ticket
    }

    /// Supersedes every outstanding request.
    pub fn cancel(&self) {
        let ticket = self.next_ticket();
        tracing::debug!("cancelled loads up to generation {}", ticket.0);
    }

    /// Lists `location` in the background.
    pub fn request_listing(&self, location: Location, show_hidden: bool) -> LoadTicket {
        let ticket = self.next_ticket();
        let generation = Arc::clone(&self.generation);
        let tx = self.tx.clone();
        tracing::debug!("listing {} (generation {})", location.path().display(), ticket.0);

        tokio::task::spawn_blocking(move || {
            let event = match list_directory(location.path(), show_hidden) {
                Ok(entries) => Event::DirectoryLoaded {
                    ticket,
                    location,
                    entries,
                },
                Err(e) => Event::DirectoryFailed {
                    ticket,
                    location,
                    error: e.to_string(),
                },
            };
            deliver(&generation, &tx, event);
        });

        ticket
    }

    /// Loads the contents of `location` for `renderer` in the background.
    pub fn request_preview(
        &self,
        location: Location,
        renderer: Renderer,
        settings: PreviewSettings,
    ) -> LoadTicket {
        let ticket = self.next_ticket();
        let generation = Arc::clone(&self.generation);
        let tx = self.tx.clone();
        tracing::debug!(
            "loading {renderer:?} preview of {} (generation {})",
            location.path().display(),
            ticket.0
        );

        tokio::task::spawn_blocking(move || {
            let event = match load_preview(location.path(), renderer, &settings) {
                Ok(preview) => Event::PreviewLoaded {
                    ticket,
                    location,
                    preview,
                },
                Err(e) => Event::PreviewFailed {
                    ticket,
                    location,
                    error: e.to_string(),
                },
            };
            deliver(&generation, &tx, event);
        });

        ticket
    }

    fn next_ticket(&self) -> LoadTicket {
        LoadTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

/// Sends `event` unless its request has been superseded.
///
/// Returns `true` if the event was sent.
fn deliver(generation: &AtomicU64, tx: &UnboundedSender<Event>, event: Event) -> bool {
    let ticket = event.ticket();
    if generation.load(Ordering::SeqCst) != ticket.0 {
        tracing::debug!("dropping stale result (generation {})", ticket.0);
        return false;
    }
    // The receiver is gone once its view is dropped.
    tx.send(event).is_ok()
}
