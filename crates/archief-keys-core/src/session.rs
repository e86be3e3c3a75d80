//! Page sessions.
//!
//! A [`PageSession`] stands in for a browser tab showing the site. Each page
//! load gets its own [`KeyRouter`]; navigating unloads the page, so the next
//! key press is handled by a fresh router with no previous key.

use std::collections::VecDeque;

use archief_keys_config::{AppConfig, NavigatorBackend};
use tracing::debug;

use crate::key::KeyDown;
use crate::navigator::{CommandNavigator, Location, LogNavigator, NavigateError, Navigator};
use crate::router::{KeyRouter, Navigation};

/// One completed navigation, as kept in the session history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    /// Raw name of the key that triggered the navigation.
    pub key: String,
    /// Where the key navigated to.
    pub location: Location,
}

/// Number of recent visits a session keeps.
pub const HISTORY_LIMIT: usize = 256;

/// A tab on the site: router, navigator, and base URL.
pub struct PageSession<N> {
    base_url: String,
    router: KeyRouter,
    navigator: N,
    page_loads: usize,
    history: VecDeque<Visit>,
}

impl<N: Navigator> PageSession<N> {
    /// Open a session on `base_url`. The URL is checked up front so that a
    /// bad base never surfaces in the middle of a key sequence.
    pub fn new(base_url: impl Into<String>, navigator: N) -> Result<Self, NavigateError> {
        let base_url = base_url.into();
        Location::new(&base_url, "/")?;
        Ok(Self {
            base_url,
            router: KeyRouter::new(),
            navigator,
            page_loads: 0,
            history: VecDeque::with_capacity(HISTORY_LIMIT),
        })
    }

    /// Feed one key-down event to the current page.
    ///
    /// Returns the location navigated to, if any. When the key navigates the
    /// page is replaced by a new one even if the navigator fails.
    pub fn press(&mut self, event: &KeyDown) -> Result<Option<Location>, NavigateError> {
        let Some(navigation) = self.router.handle(event) else {
            return Ok(None);
        };
        self.load(event, navigation).map(Some)
    }

    fn load(&mut self, event: &KeyDown, navigation: Navigation) -> Result<Location, NavigateError> {
        let location = Location::new(&self.base_url, &navigation.path())?;
        self.router.reset();
        self.page_loads += 1;
        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(Visit {
            key: event.key().to_string(),
            location: location.clone(),
        });
        debug!(page_loads = self.page_loads, url = %location, "page replaced");
        self.navigator.navigate(&location)?;
        Ok(location)
    }

    /// Previous key of the current page.
    pub fn prev_key(&self) -> Option<&str> {
        self.router.prev_key()
    }

    /// Number of navigations since the session opened.
    pub fn page_loads(&self) -> usize {
        self.page_loads
    }

    /// The most recent navigations, oldest first, at most [`HISTORY_LIMIT`].
    pub fn history(&self) -> &VecDeque<Visit> {
        &self.history
    }

    /// The site base URL locations are resolved against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The navigator carrying out this session's navigations.
    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    /// Close the session and take back its navigator.
    pub fn into_navigator(self) -> N {
        self.navigator
    }
}

impl PageSession<Box<dyn Navigator>> {
    /// Open a session on the configured site with the configured backend.
    pub fn from_config(config: &AppConfig) -> Result<Self, NavigateError> {
        Self::new(config.site.base_url.clone(), navigator_from_config(config))
    }
}

/// Build the navigator selected by `config.navigator`.
pub fn navigator_from_config(config: &AppConfig) -> Box<dyn Navigator> {
    let nav = &config.navigator;
    match nav.backend {
        NavigatorBackend::Command => {
            Box::new(CommandNavigator::new(nav.program.clone(), nav.args.clone()))
        }
        NavigatorBackend::Log => Box::new(LogNavigator),
    }
}
