//! The fixed single-key route table.
//!
//! Each entry binds one lowercase character to an absolute site path. The
//! table is a `static` and is never mutated at runtime.

use serde::Serialize;

/// A single shortcut: key, target path, and the menu label shown on the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Route {
    /// Lowercase key character.
    pub key: char,
    /// Absolute site path, e.g. `/archief`.
    pub path: &'static str,
    /// Menu label of the target page.
    pub label: &'static str,
}

impl Route {
    const fn new(key: char, path: &'static str, label: &'static str) -> Self {
        Self { key, path, label }
    }
}

/// All shortcuts, in site menu order.
pub static ROUTES: [Route; 5] = [
    Route::new('h', "/", "Home"),
    Route::new('a', "/archief", "Archief"),
    Route::new('b', "/berichten", "Berichten"),
    Route::new('s', "/statistieken", "Statistieken"),
    Route::new('i', "/informatie", "Informatie"),
];

/// Lookup over [`ROUTES`].
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyRouteMap;

impl KeyRouteMap {
    /// Find the route bound to `key`.
    ///
    /// Only single-character keys can match; `key` is expected to be
    /// lowercased already.
    pub fn get(&self, key: &str) -> Option<&'static Route> {
        let mut chars = key.chars();
        let c = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        ROUTES.iter().find(|route| route.key == c)
    }

    /// Iterate the table in menu order.
    pub fn iter(&self) -> impl Iterator<Item = &'static Route> {
        ROUTES.iter()
    }

    /// Number of shortcuts in the table.
    pub fn len(&self) -> usize {
        ROUTES.len()
    }

    /// Always `false`; the table is fixed.
    pub fn is_empty(&self) -> bool {
        ROUTES.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fixed_entries() {
        let map = KeyRouteMap;
        assert_eq!(map.get("h").map(|r| r.path), Some("/"));
        assert_eq!(map.get("a").map(|r| r.path), Some("/archief"));
        assert_eq!(map.get("b").map(|r| r.path), Some("/berichten"));
        assert_eq!(map.get("s").map(|r| r.path), Some("/statistieken"));
        assert_eq!(map.get("i").map(|r| r.path), Some("/informatie"));
        assert_eq!(map.len(), 5);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        // Callers lowercase before lookup.
        assert!(KeyRouteMap.get("H").is_none());
    }

    #[test]
    fn test_multi_char_and_empty_keys_miss() {
        let map = KeyRouteMap;
        assert!(map.get("").is_none());
        assert!(map.get("hh").is_none());
        assert!(map.get("home").is_none());
    }

    #[test]
    fn test_keys_are_unique() {
        let mut keys: Vec<char> = ROUTES.iter().map(|r| r.key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), ROUTES.len());
    }

    #[test]
    fn test_iter_follows_menu_order() {
        let labels: Vec<&str> = KeyRouteMap.iter().map(|r| r.label).collect();
        assert_eq!(
            labels,
            vec!["Home", "Archief", "Berichten", "Statistieken", "Informatie"]
        );
    }
}
