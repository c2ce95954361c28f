//! Identifier extraction from the page location.

use percent_encoding::percent_decode_str;
use romsite_core::{IdentifierSource, LaunchSettings};
use url::Url;

/// Paths ending in one of these are pages, not identifiers
pub const PAGE_EXTENSIONS: &[&str] = &[".html", ".htm"];

/// Identifier from a path such as `/sonic2`.
///
/// Only the leading slash is removed. The rest is percent-decoded once, so
/// `/golden%20axe` names the record `golden axe`.
pub fn from_path(path: &str) -> Option<String> {
    let raw = path.strip_prefix('/').unwrap_or(path);
    let identifier = percent_decode_str(raw).decode_utf8_lossy();
    if identifier.is_empty() || PAGE_EXTENSIONS.iter().any(|ext| identifier.ends_with(ext)) {
        return None;
    }
    Some(identifier.into_owned())
}

/// Identifier from the `param` query parameter. An empty value counts as absent.
pub fn from_query(location: &Url, param: &str) -> Option<String> {
    location
        .query_pairs()
        .find(|(key, _)| key == param)
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

pub fn from_location(location: &Url, settings: &LaunchSettings) -> Option<String> {
    match settings.source {
        IdentifierSource::Path => from_path(location.path()),
        IdentifierSource::Query => from_query(location, &settings.query_param),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_path_identifier() {
        assert_eq!(from_path("/sonic2"), Some("sonic2".to_string()));
        assert_eq!(from_path("sonic2"), Some("sonic2".to_string()));
        assert_eq!(from_path("/games/sonic2"), Some("games/sonic2".to_string()));
    }

    #[test]
    fn test_path_rejects_index_and_pages() {
        assert_eq!(from_path("/"), None);
        assert_eq!(from_path(""), None);
        assert_eq!(from_path("/index.html"), None);
        assert_eq!(from_path("/admin.html"), None);
        assert_eq!(from_path("/play.htm"), None);
    }

    #[test]
    fn test_path_identifier_is_decoded_once() {
        let location = url("https://roms.example.com/golden axe");
        assert_eq!(location.path(), "/golden%20axe");
        assert_eq!(from_path(location.path()), Some("golden axe".to_string()));

        let location = url("https://roms.example.com/p%C3%A1gina");
        assert_eq!(from_path(location.path()), Some("página".to_string()));

        // A literal percent sign survives a single decode
        assert_eq!(from_path("/100%2525"), Some("100%25".to_string()));
    }

    #[test]
    fn test_query_identifier() {
        let location = url("https://roms.example.com/play.html?rom=sonic2&x=1");
        assert_eq!(from_query(&location, "rom"), Some("sonic2".to_string()));
        assert_eq!(from_query(&location, "game"), None);

        let empty = url("https://roms.example.com/play.html?rom=");
        assert_eq!(from_query(&empty, "rom"), None);

        let encoded = url("https://roms.example.com/play.html?rom=golden%20axe");
        assert_eq!(from_query(&encoded, "rom"), Some("golden axe".to_string()));
    }

    #[test]
    fn test_location_follows_settings() {
        let location = url("https://roms.example.com/play.html?rom=sonic2");
        let mut settings = LaunchSettings::default();
        assert_eq!(from_location(&location, &settings), None);

        settings.source = IdentifierSource::Query;
        assert_eq!(
            from_location(&location, &settings),
            Some("sonic2".to_string())
        );

        let location = url("https://roms.example.com/streets-of-rage");
        settings.source = IdentifierSource::Path;
        assert_eq!(
            from_location(&location, &settings),
            Some("streets-of-rage".to_string())
        );
    }
}
