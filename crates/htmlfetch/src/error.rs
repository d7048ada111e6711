//! Error types for htmlfetch.
//!
//! Only transport-level problems are errors. A response that simply is not
//! an HTML document is reported through [`crate::Outcome`] instead.

use std::io;
use thiserror::Error;
use url::Url;

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL {url:?}: {source}")]
    InvalidUrl {
        url:    String,
        #[source]
        source: url::ParseError,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] BoxError),

    #[error("request to {url} failed: {source}")]
    Transport {
        url:    Url,
        #[source]
        source: BoxError,
    },

    #[error("failed to read body of {url}: {source}")]
    Body {
        url:    Url,
        #[source]
        source: io::Error,
    },
}

impl FetchError {
    pub(crate) fn transport(url: &Url, source: impl Into<BoxError>) -> Self {
        FetchError::Transport {
            url:    url.clone(),
            source: source.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
