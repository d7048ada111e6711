use url::Url;

/// Resolves a `Location` header value against the URL that produced it.
///
/// Absolute values are taken as they are; relative ones (`/path`, `page`,
/// `//host/path`, `?query`) are joined per RFC 3986. Returns `None` for
/// blank or unparseable values.
///
/// # Examples
///
/// ```
/// use htmlfetch::resolve_location;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/a/b").unwrap();
/// assert_eq!(
///     resolve_location(&base, "/c").unwrap().as_str(),
///     "https://example.com/c"
/// );
/// ```
pub fn resolve_location(base: &Url, location: &str) -> Option<Url> {
    let location = location.trim();
    if location.is_empty() {
        return None;
    }

    match Url::parse(location) {
        Ok(url) => Some(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => base.join(location).ok(),
        Err(_) => None,
    }
}
