// Pi-hole: A black hole for Internet advertisements
// (c) 2019 Pi-hole, LLC (https://pi-hole.net)
// Network-wide ad blocking via your own hardware.
//
// Blocklist Manager
// Domain Normalizer
//
// This file is copyright under the latest version of the EUPL.
// Please see LICENSE file for your rights under this license.

use url::Url;

/// Prefix of every stored exact-match pattern (the domain or any subdomain)
const PATTERN_PREFIX: &str = "(\\.|^)";
const PATTERN_SUFFIX: &str = "$";

/// Get the domain of a list entry. URLs (`http://` or `https://`) are reduced
/// to their host, anything else is returned trimmed.
///
/// Both forms are ASCII-lowercased, so `Ads.Example.com` and
/// `https://ADS.example.com/x` give the same domain. If no host can be parsed
/// out of a URL, the trimmed and lowercased entry is returned.
pub fn extract_base_domain(entry: &str) -> String {
    let entry = entry.trim();

    if entry.starts_with("http://") || entry.starts_with("https://") {
        if let Some(host) = Url::parse(entry)
            .ok()
            .as_ref()
            .and_then(Url::host_str)
            .filter(|host| !host.is_empty())
        {
            return host.to_owned();
        }
    }

    entry.to_ascii_lowercase()
}

/// Get the exact-match regex pattern which is stored for a domain. This is the
/// key used for every `domainlist` lookup.
pub fn to_pattern(domain: &str) -> String {
    format!("{}{}{}", PATTERN_PREFIX, regex::escape(domain), PATTERN_SUFFIX)
}

/// Get the domain back out of a stored pattern. Returns `None` if the pattern
/// was not made by [`to_pattern`](fn.to_pattern.html).
pub fn pattern_domain(pattern: &str) -> Option<String> {
    if !pattern.starts_with(PATTERN_PREFIX) || !pattern.ends_with(PATTERN_SUFFIX) {
        return None;
    }

    let escaped = &pattern[PATTERN_PREFIX.len()..pattern.len() - PATTERN_SUFFIX.len()];
    let mut domain = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            domain.push(chars.next()?);
        } else {
            domain.push(c);
        }
    }

    if domain.is_empty() {
        None
    } else {
        Some(domain)
    }
}

#[cfg(test)]
mod test {
    use super::{extract_base_domain, pattern_domain, to_pattern};

    /// Bare domains are trimmed and lowercased
    #[test]
    fn bare_domain() {
        assert_eq!(extract_base_domain("  ads.example.com \n"), "ads.example.com");
        assert_eq!(extract_base_domain("Ads.Example.COM"), "ads.example.com");
    }

    /// URLs are reduced to their host
    #[test]
    fn url_host() {
        assert_eq!(
            extract_base_domain("https://ads.example.com/x?y=z"),
            "ads.example.com"
        );
        assert_eq!(extract_base_domain("http://tracker.net"), "tracker.net");
        assert_eq!(extract_base_domain("http://tracker.net:8080/a"), "tracker.net");
    }

    /// URL-shaped input without a host falls back to the trimmed input
    #[test]
    fn url_without_host() {
        assert_eq!(extract_base_domain("https://"), "https://");
        assert_eq!(extract_base_domain("HTTP://"), "http://");
        assert_eq!(extract_base_domain(" http:// "), "http://");
    }

    /// Other schemes are not treated as URLs
    #[test]
    fn other_scheme() {
        assert_eq!(extract_base_domain("ftp://files.com/a"), "ftp://files.com/a");
    }

    /// Patterns escape the domain and match the domain or any subdomain
    #[test]
    fn pattern() {
        assert_eq!(to_pattern("ads.example.com"), "(\\.|^)ads\\.example\\.com$");

        let regex = regex::Regex::new(&to_pattern("example.com")).unwrap();
        assert!(regex.is_match("example.com"));
        assert!(regex.is_match("ads.example.com"));
        assert!(!regex.is_match("badexample.com"));
        assert!(!regex.is_match("example.com.evil"));
    }

    /// A URL and its bare host collide on the same pattern
    #[test]
    fn stable_normalization() {
        assert_eq!(
            to_pattern(&extract_base_domain("https://ads.example.com/x")),
            to_pattern("ads.example.com")
        );
    }

    /// Mixed-case bare and URL forms of a domain collide on the same pattern
    #[test]
    fn mixed_case_collides() {
        assert_eq!(
            to_pattern(&extract_base_domain("https://School.org/login")),
            to_pattern(&extract_base_domain("School.org"))
        );
        assert_eq!(
            extract_base_domain("https://Ads.Example.com/x"),
            extract_base_domain(" ADS.example.com ")
        );
    }

    /// The domain can be recovered from a pattern
    #[test]
    fn recover_domain() {
        assert_eq!(
            pattern_domain(&to_pattern("my-ads.example.com")),
            Some("my-ads.example.com".to_owned())
        );
        assert_eq!(pattern_domain("^ads\\.com$"), None);
        assert_eq!(pattern_domain("(\\.|^)$"), None);
        assert_eq!(pattern_domain("(\\.|^)bad\\$"), None);
    }
}
