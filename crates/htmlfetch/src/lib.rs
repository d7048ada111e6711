//! Blocking HTML document fetching with explicit redirect budgets.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - [`data`] - Immutable response snapshots, outcomes and configuration
//! - [`core`] - Pure classification of status codes and content types
//! - [`effects`] - I/O operations with trait abstraction
//!
//! # Key Features
//!
//! - **Own redirect handling**: transport-level redirect following is
//!   disabled; the fetcher walks the chain itself and stops when the budget
//!   runs out. The budget is the only loop guard.
//! - **Header-only classification**: a response is HTML iff its
//!   `Content-Type` media type is `text/html`. Bodies are never sniffed.
//! - **Two failure tiers**: the string entry points return `Option`, the URL
//!   entry points return [`Outcome`] and propagate transport errors as
//!   [`FetchError`].
//!
//! # Example
//!
//! ```no_run
//! let html = htmlfetch::fetch_with_redirects("https://example.com/", 3);
//! println!("{}", html.unwrap_or_default());
//! ```

mod core;
mod data;
mod effects;
mod error;

pub use self::core::{
    charset, decode_body, is_html, is_redirect, is_redirect_status, media_type, parse_status_line,
    resolve_location, status_code,
};
pub use self::data::{
    ClientSetting, DEFAULT_MAX_REDIRECTS, FetchOptions, Outcome, ResponseHead, Timeouts, Unavailable,
};
pub use self::effects::{Fetcher, HttpClient, RawResponse};
pub use self::error::{BoxError, FetchError, Result};

#[cfg(feature = "reqwest")]
pub use self::effects::{ClientSettingError, ReqwestClient};

#[cfg(feature = "reqwest")]
fn default_fetcher() -> Result<Fetcher<ReqwestClient>> {
    let client = ReqwestClient::new().map_err(|e| FetchError::Client(e.into()))?;
    Ok(Fetcher::new(client))
}

/// Fetch `url` with the default redirect budget ([`DEFAULT_MAX_REDIRECTS`]).
///
/// Returns `None` if no HTML document is available for any reason.
#[cfg(feature = "reqwest")]
pub fn fetch(url: &str) -> Option<String> { fetch_with_redirects(url, DEFAULT_MAX_REDIRECTS) }

/// Fetch `url`, following at most `max_redirects` redirects.
///
/// Returns `None` if no HTML document is available for any reason,
/// including transport failures.
#[cfg(feature = "reqwest")]
pub fn fetch_with_redirects(url: &str, max_redirects: i32) -> Option<String> {
    match default_fetcher() {
        Ok(fetcher) => fetcher.fetch_with_redirects(url, max_redirects),
        Err(e) => {
            tracing::warn!(url, error = %e, "fetch failed");
            None
        }
    }
}

/// Fetch an already parsed URL, following at most `max_redirects` redirects.
///
/// # Errors
///
/// Transport failures are returned as [`FetchError`]; every other failure
/// is an [`Outcome::Unavailable`].
#[cfg(feature = "reqwest")]
pub fn fetch_url(url: &url::Url, max_redirects: i32) -> Result<Outcome> {
    default_fetcher()?.fetch_url(url, max_redirects)
}

/// Issue one GET request and return the response head, without following
/// redirects or reading the body.
#[cfg(feature = "reqwest")]
pub fn probe(url: &url::Url) -> Result<ResponseHead> { default_fetcher()?.probe(url) }
