#![deny(unsafe_code)]

//! archief-keys core.
//!
//! Single-key shortcuts for the archief site: the fixed route table, the key
//! router with its one key of memory, navigation backends, and the page
//! session tying them together. The CLI and TUI hosts are thin shells over
//! [`PageSession`].

/// Key-down events, digit keys, and crossterm key naming.
pub mod key;
/// In-memory log capture for the TUI.
pub mod logging;
/// Navigation backends and resolved locations.
pub mod navigator;
/// The fixed key to path table.
pub mod route;
/// Key router: classification and dispatch of key presses.
pub mod router;
/// Page sessions: one router per page load.
pub mod session;

pub use key::{Digit, KeyDown};
pub use logging::{LogCollector, LogEntry, LogReader};
pub use navigator::{
    CommandNavigator, Location, LogNavigator, NavigateError, Navigator, RecordingNavigator,
};
pub use route::{KeyRouteMap, ROUTES, Route};
pub use router::{KeyRouter, Keystroke, Navigation};
pub use session::{HISTORY_LIMIT, PageSession, Visit, navigator_from_config};
