//! End-to-end routing behaviour through the public API.

use archief_keys_core::{KeyDown, KeyRouter, PageSession, ROUTES, RecordingNavigator};
use archief_keys_test_utils::keys::{TEST_BASE_URL, route_keys, visited_urls};
use archief_keys_test_utils::tracing_setup::init_test_tracing;
use pretty_assertions::assert_eq;

#[test]
fn mapped_keys_navigate_once() {
    init_test_tracing();
    for route in &ROUTES {
        let key = route.key.to_string();
        let mut session = PageSession::new(TEST_BASE_URL, RecordingNavigator::new()).unwrap();
        session.press(&KeyDown::new(key.as_str())).unwrap();
        assert_eq!(
            session.navigator().urls(),
            vec![format!("{TEST_BASE_URL}{}", route.path)]
        );
    }
}

#[test]
fn digits_without_n_open_berichten() {
    for d in 0..=9 {
        let digit = d.to_string();
        for prev in ["x", "h", "0", "enter"] {
            assert_eq!(
                route_keys(&[prev, digit.as_str()])[1],
                Some(format!("/bericht/latest/{d}")),
                "prev {prev:?}, digit {d}"
            );
        }
    }
}

#[test]
fn digits_after_n_open_objects() {
    for d in 0..=9 {
        let digit = d.to_string();
        assert_eq!(
            route_keys(&["n", digit.as_str()]),
            vec![None, Some(format!("/object/latest/{d}"))]
        );
    }
}

#[test]
fn unmapped_keys_only_update_prev_key() {
    let mut router = KeyRouter::new();
    for key in ["z", "q", "Escape", " ", "/", "?"] {
        assert_eq!(router.handle(&KeyDown::new(key)), None);
        assert_eq!(router.prev_key(), Some(key.to_lowercase().as_str()));
    }
}

#[test]
fn scenario_n_then_3() {
    assert_eq!(
        route_keys(&["n", "3"]),
        vec![None, Some("/object/latest/3".to_string())]
    );
}

#[test]
fn scenario_x_then_3() {
    assert_eq!(
        route_keys(&["x", "3"]),
        vec![None, Some("/bericht/latest/3".to_string())]
    );
}

#[test]
fn scenario_h() {
    assert_eq!(route_keys(&["h"]), vec![Some("/".to_string())]);
}

#[test]
fn scenario_z() {
    let mut router = KeyRouter::new();
    assert_eq!(router.handle(&KeyDown::new("z")), None);
    assert_eq!(router.prev_key(), Some("z"));
}

#[test]
fn session_treats_each_navigation_as_page_load() {
    init_test_tracing();
    assert_eq!(
        visited_urls(&["n", "1", "x", "a", "N", "9"]),
        vec![
            format!("{TEST_BASE_URL}/object/latest/1"),
            format!("{TEST_BASE_URL}/archief"),
            format!("{TEST_BASE_URL}/object/latest/9"),
        ]
    );
}

#[test]
fn prefix_does_not_survive_navigation() {
    // `n` is unmapped, so `n` `h` navigates home and the new page has no
    // previous key when `4` arrives.
    assert_eq!(
        visited_urls(&["n", "h", "4"]),
        vec![
            format!("{TEST_BASE_URL}/"),
            format!("{TEST_BASE_URL}/bericht/latest/4"),
        ]
    );
}
