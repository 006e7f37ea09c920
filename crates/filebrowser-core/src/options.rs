//! Option set controlling which browser affordances are enabled.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// A small bitmask of optional browser features.
///
/// Supplied once by the embedding application and fixed for the lifetime
/// of a [`crate::Browser`].
///
/// ```
/// use filebrowser_core::BrowserOptions;
///
/// let opts = BrowserOptions::ALLOW_DELETE | BrowserOptions::SHOW_HIDDEN;
/// assert!(opts.contains(BrowserOptions::ALLOW_DELETE));
/// assert!(!opts.contains(BrowserOptions::ALLOW_SHARE));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BrowserOptions(u8);

impl BrowserOptions {
    pub const ALLOW_DELETE: Self = Self(1 << 0);
    pub const ALLOW_SHARE: Self = Self(1 << 1);
    pub const SHOW_CLEAR_DIRECTORY: Self = Self(1 << 2);
    pub const SHOW_HIDDEN: Self = Self(1 << 3);
    pub const ALLOW_VIEWING: Self = Self(1 << 4);

    const NAMED: &'static [(Self, &'static str)] = &[
        (Self::ALLOW_DELETE, "ALLOW_DELETE"),
        (Self::ALLOW_SHARE, "ALLOW_SHARE"),
        (Self::SHOW_CLEAR_DIRECTORY, "SHOW_CLEAR_DIRECTORY"),
        (Self::SHOW_HIDDEN, "SHOW_HIDDEN"),
        (Self::ALLOW_VIEWING, "ALLOW_VIEWING"),
    ];

    /// No options set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Every option set.
    pub const fn all() -> Self {
        Self(0b1_1111)
    }

    /// Returns the raw bits.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns `true` if every bit of `other` is set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns `true` if no option is set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns a copy with `other` set or cleared.
    #[must_use]
    pub const fn with(self, other: Self, enabled: bool) -> Self {
        if enabled {
            Self(self.0 | other.0)
        } else {
            Self(self.0 & !other.0)
        }
    }
}

impl Default for BrowserOptions {
    /// Hidden files shown, sharing, deletion and viewing allowed.
    fn default() -> Self {
        Self::SHOW_HIDDEN | Self::ALLOW_SHARE | Self::ALLOW_DELETE | Self::ALLOW_VIEWING
    }
}

impl BitOr for BrowserOptions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for BrowserOptions {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for BrowserOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = Self::NAMED
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "BrowserOptions({})", names.join(" | "))
    }
}
