use crate::data::ResponseHead;

/// Parses the status code out of a raw status line.
///
/// Accepts `HTTP/<version> <code> [reason]` where `<code>` is exactly three
/// digits. Anything else yields `None`.
///
/// # Examples
///
/// ```
/// use htmlfetch::parse_status_line;
///
/// assert_eq!(parse_status_line("HTTP/1.1 404 Not Found"), Some(404));
/// assert_eq!(parse_status_line("HTTP/2 200"), Some(200));
/// assert_eq!(parse_status_line("not a status line"), None);
/// ```
pub fn parse_status_line(line: &str) -> Option<u16> {
    let mut parts = line.split_whitespace();
    if !parts.next()?.starts_with("HTTP/") {
        return None;
    }

    let code = parts.next()?;
    if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    code.parse().ok()
}

/// Status code of the response, `None` when unknown.
pub fn status_code(head: &ResponseHead) -> Option<u16> { head.status() }

/// Returns `true` if the HTTP status code indicates a redirect.
///
/// # Recognized Redirect Codes
///
/// - 300: Multiple Choices
/// - 301: Moved Permanently
/// - 302: Found
/// - 303: See Other
/// - 304: Not Modified
/// - 305: Use Proxy
/// - 307: Temporary Redirect
/// - 308: Permanent Redirect
///
/// # Examples
///
/// ```
/// use htmlfetch::is_redirect_status;
///
/// assert!(is_redirect_status(301));
/// assert!(is_redirect_status(304));
/// assert!(!is_redirect_status(200));
/// assert!(!is_redirect_status(404));
/// ```
pub fn is_redirect_status(status: u16) -> bool {
    matches!(status, 300 | 301 | 302 | 303 | 304 | 305 | 307 | 308)
}

/// Returns `true` if the response carries a redirect status. An unknown
/// status is never a redirect.
pub fn is_redirect(head: &ResponseHead) -> bool { head.status().is_some_and(is_redirect_status) }

/// Media type of a `Content-Type` value: the part before any parameter,
/// trimmed and lower-cased.
pub fn media_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Returns `true` if the response declares a `text/html` media type.
///
/// Only the header is consulted; the body is never sniffed.
pub fn is_html(head: &ResponseHead) -> bool {
    head.content_type()
        .is_some_and(|ct| media_type(&ct) == "text/html")
}

/// Value of the `charset` parameter of a `Content-Type` value, unquoted.
pub fn charset(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("charset") {
            return None;
        }

        let value = value.trim().trim_matches('"').trim();
        (!value.is_empty()).then(|| value.to_string())
    })
}
