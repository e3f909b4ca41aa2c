//! Persisted search preferences for QuillPad: the option flags and the
//! pattern history, stored as a small JSON document.

mod preferences;

pub use preferences::{SearchPreferences, SettingsError};
