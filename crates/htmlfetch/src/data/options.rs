use std::time::Duration;

use url::Url;

/// Redirect budget used by the entry points that do not take one.
pub const DEFAULT_MAX_REDIRECTS: i32 = 5;

/// Per-fetcher configuration.
///
/// # Examples
///
/// ```
/// use htmlfetch::FetchOptions;
///
/// let options = FetchOptions::default().max_redirects(3);
/// assert_eq!(options.max_redirects, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Number of redirect hops followed before giving up.
    ///
    /// Zero or negative values mean that a redirect response ends the fetch
    /// immediately, without a single hop.
    ///
    /// Default: [`DEFAULT_MAX_REDIRECTS`]
    pub max_redirects: i32,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }
}

impl FetchOptions {
    #[must_use]
    pub fn max_redirects(mut self, max_redirects: i32) -> Self {
        self.max_redirects = max_redirects;
        self
    }
}

/// Transport timeouts. Both are disabled unless set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timeouts {
    /// Deadline for establishing the TCP (and TLS) connection.
    pub connect: Option<Duration>,
    /// Deadline for one whole request, from connecting until the body is
    /// read to the end. A slow but steady body still trips it.
    pub read:    Option<Duration>,
}

impl Timeouts {
    #[must_use]
    pub fn connect(mut self, timeout: Duration) -> Self {
        self.connect = Some(timeout);
        self
    }

    #[must_use]
    pub fn read(mut self, timeout: Duration) -> Self {
        self.read = Some(timeout);
        self
    }
}

/// Settings used to build the transport client.
#[derive(Debug, Clone, Default)]
pub struct ClientSetting {
    pub timeouts:   Timeouts,
    /// Overrides the default `htmlfetch/<version>` user agent.
    pub user_agent: Option<String>,
    /// Proxies, routed by their own scheme: `https` proxies serve HTTPS
    /// targets, everything else serves plain HTTP.
    pub proxies:    Vec<Url>,
}

impl ClientSetting {
    #[must_use]
    pub fn timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    #[must_use]
    pub fn proxy(mut self, proxy: Url) -> Self {
        self.proxies.push(proxy);
        self
    }
}
