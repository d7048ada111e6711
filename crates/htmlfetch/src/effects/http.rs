use std::io::Read;

use url::Url;

use crate::data::ResponseHead;

/// One HTTP exchange as seen by the fetcher: the head, plus the unread body.
///
/// Dropping the body releases the underlying connection.
pub struct RawResponse<B> {
    pub head: ResponseHead,
    pub body: B,
}

impl<B> RawResponse<B> {
    pub fn new(head: ResponseHead, body: B) -> Self { Self { head, body } }
}

/// Blocking HTTP client abstraction.
///
/// This trait provides the minimal interface needed by
/// [`Fetcher`](crate::Fetcher): a single GET request.
///
/// # Contract
///
/// Implementations must NOT follow redirects. Redirect responses are
/// returned as they are so the fetcher can apply its own budget.
///
/// # Implementations
///
/// - [`ReqwestClient`]: Production implementation using `reqwest`
/// - Mock implementations for testing
pub trait HttpClient: Send + Sync {
    /// Error type for transport failures.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Response body reader.
    type Body: Read;

    /// Issue a GET request and return once the head has been received.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure only (DNS failure, connection
    /// error, malformed response, timeout). Any status code, including 4xx
    /// and 5xx, is a successful exchange.
    fn get(&self, url: &Url) -> Result<RawResponse<Self::Body>, Self::Error>;
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use super::*;
    use crate::data::ClientSetting;
    use reqwest::Proxy;
    use reqwest::blocking::{Client, Response};
    use reqwest::redirect::Policy;
    use thiserror::Error;

    const DEFAULT_USER_AGENT: &str = concat!("htmlfetch/", env!("CARGO_PKG_VERSION"));

    #[derive(Debug, Error)]
    pub enum ClientSettingError {
        #[error("Invalid proxy URL {url}: {source}")]
        Proxy {
            url:    String,
            #[source]
            source: reqwest::Error,
        },

        #[error("Failed to build client: {0}")]
        Build(#[from] reqwest::Error),
    }

    /// Production HTTP client implementation using reqwest's blocking API.
    ///
    /// Automatic redirect following is disabled at the transport layer.
    #[derive(Debug, Clone)]
    pub struct ReqwestClient {
        client: Client,
    }

    impl ReqwestClient {
        /// Create a new ReqwestClient with default configuration.
        pub fn new() -> Result<Self, ClientSettingError> {
            Self::with_setting(ClientSetting::default())
        }

        pub fn with_setting(setting: ClientSetting) -> Result<Self, ClientSettingError> {
            let mut cb = Client::builder()
                .redirect(Policy::none())
                .timeout(setting.timeouts.read)
                .user_agent(setting.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT));

            if let Some(connect) = setting.timeouts.connect {
                cb = cb.connect_timeout(connect);
            }

            let (secure, insecure): (Vec<Url>, Vec<Url>) =
                setting.proxies.into_iter().partition(|u| u.scheme() == "https");

            for u in secure {
                cb = cb.proxy(Proxy::https(u.as_str()).map_err(|source| {
                    ClientSettingError::Proxy {
                        url: u.to_string(),
                        source,
                    }
                })?);
            }

            for u in insecure {
                cb = cb.proxy(Proxy::http(u.as_str()).map_err(|source| {
                    ClientSettingError::Proxy {
                        url: u.to_string(),
                        source,
                    }
                })?);
            }

            let client = cb.build()?;
            Ok(Self { client })
        }
    }

    impl HttpClient for ReqwestClient {
        type Error = reqwest::Error;
        type Body = Response;

        fn get(&self, url: &Url) -> Result<RawResponse<Self::Body>, Self::Error> {
            let response = self.client.get(url.clone()).send()?;
            let head = ResponseHead::new(Some(response.status().as_u16()), response.headers().clone());

            Ok(RawResponse::new(head, response))
        }
    }

}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::{ClientSettingError, ReqwestClient};
