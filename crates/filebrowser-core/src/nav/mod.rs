//! Navigation logic.
//!
//! [`browser::Browser`] owns the roots and the navigation [`history::History`];
//! it hands out [`directory::DirectoryView`]s for listings and
//! [`details::FileDetails`] for files.

pub mod browser;
pub mod details;
pub mod directory;
pub mod history;
