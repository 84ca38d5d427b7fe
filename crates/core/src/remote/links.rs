//! Profile page links on the reading site.

use url::Url;

use crate::calendar::Profile;

const PROFILE_BASE: &str = "https://www.goodreads.com/user/show/";

/// Builds the public profile page link, e.g.
/// `https://www.goodreads.com/user/show/1234-ada%20lovelace`.
///
/// The display name is lowercased and percent-encoded.
pub fn profile_link(profile: &Profile) -> String {
    format!(
        "{PROFILE_BASE}{}-{}",
        profile.id,
        urlencoding::encode(&profile.name.to_lowercase())
    )
}

/// Extracts the numeric user id from a profile page URL.
///
/// Accepts full links (`https://www.goodreads.com/user/show/1234-ada`),
/// links without a scheme or name suffix, and bare numeric ids. Returns
/// `None` when no id can be found.
///
/// ```
/// use timelines_core::remote::parse_profile_uri;
///
/// assert_eq!(
///     parse_profile_uri("https://www.goodreads.com/user/show/1234-ada"),
///     Some("1234".to_string())
/// );
/// assert_eq!(parse_profile_uri("https://example.com/"), None);
/// ```
pub fn parse_profile_uri(uri: &str) -> Option<String> {
    let uri = uri.trim();
    if !uri.is_empty() && uri.bytes().all(|b| b.is_ascii_digit()) {
        return Some(uri.to_string());
    }

    // Links pasted without a scheme still carry a host.
    let url = Url::parse(uri)
        .or_else(|_| Url::parse(&format!("https://{uri}")))
        .ok()?;

    let segments: Vec<&str> = url.path_segments()?.collect();
    let slug = segments
        .windows(3)
        .find(|w| w[0] == "user" && w[1] == "show")
        .map(|w| w[2])?;

    let id: String = slug.chars().take_while(char::is_ascii_digit).collect();
    (!id.is_empty()).then_some(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_link() {
        let profile = Profile::new("1234", "Ada Lovelace");

        assert_eq!(
            profile_link(&profile),
            "https://www.goodreads.com/user/show/1234-ada%20lovelace"
        );
    }

    #[test]
    fn test_profile_link_encodes_non_ascii() {
        let profile = Profile::new("7", "Zoë");

        assert_eq!(
            profile_link(&profile),
            "https://www.goodreads.com/user/show/7-zo%C3%AB"
        );
    }

    #[test]
    fn test_parse_profile_uri_variants() {
        let cases = [
            ("https://www.goodreads.com/user/show/1234-ada", Some("1234")),
            ("http://goodreads.com/user/show/1234", Some("1234")),
            ("www.goodreads.com/user/show/98765-x?ref=nav", Some("98765")),
            ("  1234  ", Some("1234")),
            ("https://www.goodreads.com/user/show/42#shelves", Some("42")),
        ];

        for (uri, expected) in cases {
            assert_eq!(
                parse_profile_uri(uri).as_deref(),
                expected,
                "uri: {uri}"
            );
        }
    }

    #[test]
    fn test_parse_profile_uri_rejects() {
        for uri in [
            "",
            "https://www.goodreads.com/",
            "https://www.goodreads.com/user/show/ada",
            "ada lovelace",
            "https://example.com/users/show/1234",
            "https://example.com/blog/user/1234",
        ] {
            assert_eq!(parse_profile_uri(uri), None, "uri: {uri}");
        }
    }

    #[test]
    fn test_profile_link_encodes_reserved_characters() {
        let profile = Profile::new("9", "R&D/Books");

        assert_eq!(
            profile_link(&profile),
            "https://www.goodreads.com/user/show/9-r%26d%2Fbooks"
        );
    }

    #[test]
    fn test_link_roundtrips_through_parser() {
        let profile = Profile::new("1234", "Ada Lovelace");

        assert_eq!(
            parse_profile_uri(&profile_link(&profile)),
            Some("1234".to_string())
        );
    }
}
