//! Key sequence helpers.

use archief_keys_core::{KeyDown, KeyRouter, PageSession, RecordingNavigator};

/// Base URL used by [`recording_session`].
pub const TEST_BASE_URL: &str = "http://archief.test";

/// Press each key in order on a fresh router and collect the navigated paths,
/// with `None` for keys that did not navigate.
pub fn route_keys(keys: &[&str]) -> Vec<Option<String>> {
    let mut router = KeyRouter::new();
    keys.iter()
        .map(|key| router.handle(&KeyDown::new(*key)).map(|nav| nav.path()))
        .collect()
}

/// A page session on [`TEST_BASE_URL`] recording every navigation.
pub fn recording_session() -> PageSession<RecordingNavigator> {
    match PageSession::new(TEST_BASE_URL, RecordingNavigator::new()) {
        Ok(session) => session,
        Err(e) => panic!("test base URL rejected: {e}"),
    }
}

/// Press `keys` on a recording session and return the visited URLs.
pub fn visited_urls(keys: &[&str]) -> Vec<String> {
    let mut session = recording_session();
    for key in keys {
        if let Err(e) = session.press(&KeyDown::new(*key)) {
            panic!("recording navigator failed on {key:?}: {e}");
        }
    }
    session
        .navigator()
        .urls()
        .into_iter()
        .map(String::from)
        .collect()
}
