//! Fuzz target for the key router.
//!
//! Run with: cargo +nightly fuzz run fuzz_key_router
//!
//! Splits the input on NUL bytes into key names and feeds them in order,
//! checking that the previous key always tracks the last event.

#![no_main]

use archief_keys_core::{KeyDown, KeyRouter};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let mut router = KeyRouter::new();
    for key in s.split('\0') {
        let event = KeyDown::new(key);
        if let Some(nav) = router.handle(&event) {
            assert!(nav.path().starts_with('/'));
        }
        assert_eq!(router.prev_key(), Some(event.normalized().as_str()));
    }
});
