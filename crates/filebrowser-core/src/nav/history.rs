//! Navigation stack of directories opened below a root.

use crate::fs::location::Location;

/// Immutable stack of the directories opened below the current root.
///
/// The root itself is never on the stack; an empty stack means the root is
/// showing. Every mutation returns a **new** `History`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    stack: Vec<Location>,
}

impl History {
    /// Creates an empty history (showing the root).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a history already opened through `locations`, outermost first.
    pub fn from_locations(locations: Vec<Location>) -> Self {
        Self { stack: locations }
    }

    /// Pushes `location` on top of the stack.
    ///
    /// Returns a new `History`.
    pub fn push(&self, location: Location) -> Self {
        let mut stack = self.stack.clone();
        stack.push(location);
        Self { stack }
    }

    /// Go back one step. Returns the new History and the location that was
    /// left, or `None` if the root is already showing.
    pub fn pop(&self) -> Option<(Self, Location)> {
        let mut stack = self.stack.clone();
        let location = stack.pop()?;
        Some((Self { stack }, location))
    }

    /// Returns an empty history.
    pub fn to_root(&self) -> Self {
        Self::new()
    }

    /// Top of the stack, or `None` at the root.
    pub fn current(&self) -> Option<&Location> {
        self.stack.last()
    }

    /// Returns `true` if there is at least one entry to go back from.
    pub fn can_go_back(&self) -> bool {
        !self.stack.is_empty()
    }

    /// Number of directories below the root.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Opened locations, outermost first.
    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.stack.iter()
    }
}
