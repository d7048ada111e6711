//! I/O operations for fetching.
//!
//! The network is only reached through the [`HttpClient`] trait, so the
//! redirect loop in [`Fetcher`] can be driven by any transport.

mod fetcher;
mod http;

pub use self::fetcher::Fetcher;
pub use self::http::{HttpClient, RawResponse};
#[cfg(feature = "reqwest")]
pub use self::http::{ClientSettingError, ReqwestClient};
