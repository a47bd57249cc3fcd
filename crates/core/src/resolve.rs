//! Relative-to-absolute URL resolution.
//!
//! [`resolve_url`] anchors references at the origin of the page rather than
//! performing full RFC 3986 reference resolution: a bare relative path such as
//! `img/a.png` on `https://site.com/blog/post` becomes
//! `https://site.com/img/a.png`, and `..` segments are left alone.

use url::Url;

/// Converts a possibly-relative URL into an absolute one against `base`.
///
/// An empty `raw` yields an empty string; callers treat that as "field absent".
///
/// # Example
///
/// ```rust
/// use page_zen_core::resolve_url;
/// use url::Url;
///
/// let base = Url::parse("https://site.com/articles/1").unwrap();
/// assert_eq!(resolve_url("/img/a.png", &base), "https://site.com/img/a.png");
/// assert_eq!(resolve_url("//cdn.example.com/x.png", &base), "https://cdn.example.com/x.png");
/// ```
pub fn resolve_url(raw: &str, base: &Url) -> String {
    if raw.is_empty() {
        return String::new();
    }

    if raw.starts_with("http://") || raw.starts_with("https://") {
        return raw.to_string();
    }

    if raw.starts_with("//") {
        return format!("https:{}", raw);
    }

    let origin = format!("{}://{}", base.scheme(), authority(base));

    if raw.starts_with('/') {
        format!("{}{}", origin, raw)
    } else {
        format!("{}/{}", origin, raw)
    }
}

/// Returns `true` when `value` has the `scheme://host` shape.
pub fn is_absolute_url(value: &str) -> bool {
    Url::parse(value).map(|u| u.has_host()).unwrap_or(false)
}

/// Host plus explicit port, as it appears after `scheme://`.
fn authority(base: &Url) -> String {
    let host = base.host_str().unwrap_or_default();
    match base.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    }
}
