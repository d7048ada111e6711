use http::HeaderMap;
use http::header::{CONTENT_TYPE, LOCATION};

/// Status and headers of a single HTTP exchange.
///
/// The body is deliberately not part of this type: classification is
/// header-based only. `status` is `None` when the status line was missing or
/// could not be parsed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseHead {
    status:  Option<u16>,
    headers: HeaderMap,
}

impl ResponseHead {
    pub fn new(status: Option<u16>, headers: HeaderMap) -> Self { Self { status, headers } }

    /// Build a head from a raw status line such as `HTTP/1.1 404 Not Found`.
    ///
    /// A malformed line yields an unknown status rather than an error.
    pub fn from_status_line(line: &str, headers: HeaderMap) -> Self {
        Self::new(crate::core::parse_status_line(line), headers)
    }

    pub fn status(&self) -> Option<u16> { self.status }

    pub fn headers(&self) -> &HeaderMap { &self.headers }

    /// First `Content-Type` value, lower-cased.
    ///
    /// Values that are not visible ASCII are treated as absent.
    pub fn content_type(&self) -> Option<String> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim().to_ascii_lowercase())
    }

    /// `charset` parameter of the `Content-Type` header, if declared.
    pub fn charset(&self) -> Option<String> {
        self.content_type().as_deref().and_then(crate::core::charset)
    }

    /// First `Location` value, trimmed.
    ///
    /// `None` when the header is absent or not visible ASCII; check
    /// [`headers`](Self::headers) to tell the two apart.
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
    }
}
