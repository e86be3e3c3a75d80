//! Single-key shortcut routing.
//!
//! Maps key-down events to site navigations. Supports plain shortcuts from
//! the [`KeyRouteMap`], digit shortcuts (`3` opens the third-latest message)
//! and the two-key `n` + digit sequence (`n3` opens the third-latest object).

use std::fmt;

use serde::Serialize;
use tracing::{debug, info};

use crate::key::{Digit, KeyDown};
use crate::route::{KeyRouteMap, Route};

/// Where a key press sends the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    /// `/object/latest/{digit}`, reached with `n` followed by a digit.
    Object(Digit),
    /// `/bericht/latest/{digit}`, reached with a bare digit.
    Bericht(Digit),
    /// A fixed path from the route table.
    Mapped(&'static Route),
}

impl Navigation {
    /// The absolute site path of this navigation.
    pub fn path(&self) -> String {
        match self {
            Navigation::Object(d) => format!("/object/latest/{d}"),
            Navigation::Bericht(d) => format!("/bericht/latest/{d}"),
            Navigation::Mapped(route) => route.path.to_string(),
        }
    }
}

impl fmt::Display for Navigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl Serialize for Navigation {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.path())
    }
}

/// Classification of a key press, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keystroke {
    /// A digit right after `n`.
    DigitAfterN(Digit),
    /// A digit in any other position.
    Digit(Digit),
    /// A key present in the route table.
    Mapped(&'static Route),
    /// Anything else.
    Unmapped,
}

impl Keystroke {
    /// The navigation this keystroke triggers, `None` for [`Keystroke::Unmapped`].
    pub fn navigation(self) -> Option<Navigation> {
        match self {
            Keystroke::DigitAfterN(d) => Some(Navigation::Object(d)),
            Keystroke::Digit(d) => Some(Navigation::Bericht(d)),
            Keystroke::Mapped(route) => Some(Navigation::Mapped(route)),
            Keystroke::Unmapped => None,
        }
    }
}

/// Key the `n` + digit sequence starts with.
const OBJECT_PREFIX: &str = "n";

/// Key router holding the previously processed key.
#[derive(Debug, Default)]
pub struct KeyRouter {
    routes: KeyRouteMap,
    /// Last processed key, lowercased. `None` until the first event.
    prev_key: Option<String>,
}

impl KeyRouter {
    /// A router over [`KeyRouteMap`] with no previous key.
    pub fn new() -> Self {
        Self::default()
    }

    /// The last processed key, lowercased.
    pub fn prev_key(&self) -> Option<&str> {
        self.prev_key.as_deref()
    }

    /// Forget the previous key.
    pub fn reset(&mut self) {
        self.prev_key = None;
    }

    /// Classify a normalized key against a previous key. Does not touch state.
    pub fn classify(&self, prev: Option<&str>, key: &str) -> Keystroke {
        match Digit::parse(key) {
            Some(d) if prev == Some(OBJECT_PREFIX) => Keystroke::DigitAfterN(d),
            Some(d) => Keystroke::Digit(d),
            None => match self.routes.get(key) {
                Some(route) => Keystroke::Mapped(route),
                None => Keystroke::Unmapped,
            },
        }
    }

    /// Process one key-down event and return the navigation it triggers.
    ///
    /// The previous key is updated on every call, whether or not the key
    /// navigates.
    pub fn handle(&mut self, event: &KeyDown) -> Option<Navigation> {
        let key = event.normalized();
        debug!(key = %key, prev = ?self.prev_key, "key down");

        let keystroke = self.classify(self.prev_key.as_deref(), &key);
        let navigation = keystroke.navigation();
        if let Some(nav) = &navigation {
            info!(key = %key, path = %nav, "Key pressed, navigating");
        }

        self.prev_key = Some(key);
        navigation
    }
}
