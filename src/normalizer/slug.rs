use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static EVENT_SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/event/([^/?]+)").expect("event slug pattern"));
static MARKET_SLUG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/market/([^/?]+)").expect("market slug pattern"));

/// Extract the event/market slug from a Polymarket URL.
///
/// Event routes win over market routes. Returns `None` when the path matches
/// neither. The slug is percent-decoded so the HTTP client encodes it once.
pub fn extract_slug(url: &str) -> Option<String> {
    let path = url_path(url);

    [&*EVENT_SLUG, &*MARKET_SLUG]
        .iter()
        .find_map(|re| re.captures(&path))
        .map(|cap| decode_segment(&cap[1]))
}

fn decode_segment(segment: &str) -> String {
    match urlencoding::decode(segment) {
        Ok(decoded) => decoded.into_owned(),
        // Escapes that do not form UTF-8 are kept as written.
        Err(_) => segment.to_string(),
    }
}

fn url_path(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        // Relative input such as "/event/foo?tid=1"
        Err(_) => url
            .split(|c: char| c == '?' || c == '#')
            .next()
            .unwrap_or_default()
            .to_string(),
    }
}
