//! Configuration management.
//!
//! Host-supplied settings ([`settings::Config`]) and persisted user toggles
//! ([`preferences::Preferences`]) are stored as TOML files.

pub mod preferences;
pub mod settings;
