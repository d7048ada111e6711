use thiserror::Error;
use url::Url;

/// Result of a fetch that reached a server and got an answer.
///
/// Transport failures are not represented here; they surface as
/// [`crate::FetchError`] from the URL-based entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Decoded body of the final HTML response.
    Document(String),
    /// No document is available; the reason is kept for diagnostics.
    Unavailable(Unavailable),
}

impl Outcome {
    pub fn is_document(&self) -> bool { matches!(self, Outcome::Document(_)) }

    pub fn document(&self) -> Option<&str> {
        match self {
            Outcome::Document(html) => Some(html),
            Outcome::Unavailable(_) => None,
        }
    }

    pub fn into_document(self) -> Option<String> {
        match self {
            Outcome::Document(html) => Some(html),
            Outcome::Unavailable(_) => None,
        }
    }
}

impl From<Unavailable> for Outcome {
    fn from(reason: Unavailable) -> Self { Outcome::Unavailable(reason) }
}

/// Why a fetch ended without a document.
///
/// Every variant carries the URL of the response that stopped the fetch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Unavailable {
    #[error("redirect budget exhausted at {url}")]
    RedirectLimit { url: Url },

    #[error("redirect from {url} has no Location header")]
    MissingLocation { url: Url },

    #[error("redirect from {url} has an invalid Location {location:?}")]
    InvalidLocation { url: Url, location: String },

    #[error("unexpected status {} from {url}", display_status(.status))]
    Status { url: Url, status: Option<u16> },

    #[error("{url} is not HTML (content type {content_type:?})")]
    NotHtml {
        url:          Url,
        content_type: Option<String>,
    },

    #[error("unsupported scheme {:?} in {url}", .url.scheme())]
    UnsupportedScheme { url: Url },
}

impl Unavailable {
    pub fn url(&self) -> &Url {
        match self {
            Unavailable::RedirectLimit { url }
            | Unavailable::MissingLocation { url }
            | Unavailable::InvalidLocation { url, .. }
            | Unavailable::Status { url, .. }
            | Unavailable::NotHtml { url, .. }
            | Unavailable::UnsupportedScheme { url } => url,
        }
    }
}

fn display_status(status: &Option<u16>) -> String {
    status.map_or_else(|| "unknown".to_string(), |s| s.to_string())
}
