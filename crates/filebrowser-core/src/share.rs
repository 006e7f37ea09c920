//! Hand-off to the host's sharing service.

use crate::error::CoreResult;
use crate::fs::location::Location;

/// A destination files can be shared to (share sheet, clipboard, mail...).
///
/// Implemented by the embedding application; the browser only checks the
/// [`crate::BrowserOptions::ALLOW_SHARE`] option and forwards the location.
pub trait ShareTarget {
    /// Shares `location`.
    fn share(&self, location: &Location) -> CoreResult<()>;
}

impl<F> ShareTarget for F
where
    F: Fn(&Location) -> CoreResult<()>,
{
    fn share(&self, location: &Location) -> CoreResult<()> {
        self(location)
    }
}
