use url::Url;

// * Resolves a listing anchor's href into an absolute profile URL.
// * Only hrefs starting with "/" point at profiles; they are joined onto the
// * site root as-is ("//host/..." keeps its host). Query strings are kept.
// * The fragment is dropped so one profile page maps to one cache key.
// * Anything else (absolute, relative, mailto:, "#") resolves to "".
pub fn resolve_profile_url(href: &str, base_url: &str) -> String {
    let href = href.trim();
    if !href.starts_with('/') {
        return String::new();
    }

    join_without_fragment(href, base_url).unwrap_or_default()
}

fn join_without_fragment(href: &str, base_url: &str) -> Option<String> {
    let base = Url::parse(base_url).ok()?;
    let mut url = base.join(href).ok()?;
    url.set_fragment(None);
    Some(url.to_string())
}
