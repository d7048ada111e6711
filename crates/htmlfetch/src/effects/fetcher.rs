use std::io::Read;

use http::header::LOCATION;
use tracing::{debug, warn};
use url::Url;

use crate::core::{decode_body, is_html, is_redirect, resolve_location};
use crate::data::{FetchOptions, Outcome, ResponseHead, Unavailable};
use crate::effects::http::{HttpClient, RawResponse};
use crate::error::{FetchError, Result};

/// Fetches HTML documents, following redirects up to a budget.
///
/// A `Fetcher` holds no mutable state; one instance can serve any number of
/// independent fetches, from several threads if the client allows it.
pub struct Fetcher<C: HttpClient> {
    client:  C,
    options: FetchOptions,
}

impl<C: HttpClient> Fetcher<C> {
    /// Create a new fetcher with the provided HTTP client and default options.
    pub fn new(client: C) -> Self {
        Self {
            client,
            options: FetchOptions::default(),
        }
    }

    pub fn with_options(mut self, options: FetchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &FetchOptions { &self.options }

    pub fn client(&self) -> &C { &self.client }

    /// Fetch `url` with the configured redirect budget.
    ///
    /// Returns `None` on any failure, including malformed URLs and transport
    /// errors.
    pub fn fetch(&self, url: &str) -> Option<String> {
        self.fetch_with_redirects(url, self.options.max_redirects)
    }

    /// Fetch `url`, following at most `max_redirects` redirects.
    ///
    /// Zero or negative budgets refuse every redirect. Returns `None` on any
    /// failure, including malformed URLs and transport errors.
    pub fn fetch_with_redirects(&self, url: &str, max_redirects: i32) -> Option<String> {
        match parse_url(url).and_then(|parsed| self.fetch_url(&parsed, max_redirects)) {
            Ok(outcome) => outcome.into_document(),
            Err(e) => {
                warn!(url, error = %e, "fetch failed");
                None
            }
        }
    }

    /// Fetch an already parsed URL, following at most `max_redirects`
    /// redirects.
    ///
    /// Business failures (bad status, wrong content type, exhausted budget,
    /// bad `Location`) come back as [`Outcome::Unavailable`]. Transport
    /// failures are propagated.
    pub fn fetch_url(&self, url: &Url, max_redirects: i32) -> Result<Outcome> {
        let mut current = url.clone();
        let mut remaining = max_redirects;

        loop {
            if !is_http(&current) {
                return Ok(unavailable(Unavailable::UnsupportedScheme { url: current }));
            }

            let RawResponse { head, body } = self.send(&current)?;

            if is_redirect(&head) {
                drop(body);

                if remaining <= 0 {
                    return Ok(unavailable(Unavailable::RedirectLimit { url: current }));
                }

                let Some(raw) = head.headers().get(LOCATION) else {
                    return Ok(unavailable(Unavailable::MissingLocation { url: current }));
                };

                let Some(next) = head.location().and_then(|l| resolve_location(&current, l)) else {
                    let location = String::from_utf8_lossy(raw.as_bytes()).trim().to_string();
                    return Ok(unavailable(Unavailable::InvalidLocation {
                        url: current,
                        location,
                    }));
                };

                remaining -= 1;
                debug!(from = %current, to = %next, remaining, "following redirect");
                current = next;
                continue;
            }

            return self.read_document(current, head, body);
        }
    }

    /// Issue one request and return the response head without reading the
    /// body.
    pub fn probe(&self, url: &Url) -> Result<ResponseHead> {
        let RawResponse { head, .. } = self.send(url)?;
        Ok(head)
    }

    fn send(&self, url: &Url) -> Result<RawResponse<C::Body>> {
        debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .map_err(|e| FetchError::transport(url, e))?;
        debug!(%url, status = ?response.head.status(), "received response head");
        Ok(response)
    }

    fn read_document(&self, url: Url, head: ResponseHead, mut body: C::Body) -> Result<Outcome> {
        if head.status() != Some(200) {
            return Ok(unavailable(Unavailable::Status {
                url,
                status: head.status(),
            }));
        }

        if !is_html(&head) {
            return Ok(unavailable(Unavailable::NotHtml {
                url,
                content_type: head.content_type(),
            }));
        }

        let mut bytes = Vec::new();
        if let Err(source) = body.read_to_end(&mut bytes) {
            return Err(FetchError::Body { url, source });
        }

        let charset = head.charset();
        debug!(%url, bytes = bytes.len(), charset = ?charset, "read HTML document");

        Ok(Outcome::Document(decode_body(&bytes, charset.as_deref())))
    }
}

fn parse_url(url: &str) -> Result<Url> {
    Url::parse(url).map_err(|source| FetchError::InvalidUrl {
        url: url.to_string(),
        source,
    })
}

fn is_http(url: &Url) -> bool { matches!(url.scheme(), "http" | "https") }

fn unavailable(reason: Unavailable) -> Outcome {
    debug!(%reason, "no document available");
    Outcome::Unavailable(reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::CONTENT_TYPE;
    use http::{HeaderMap, HeaderValue};
    use std::collections::HashMap;
    use std::io::Cursor;
    use std::sync::Mutex;

    #[derive(Debug, thiserror::Error)]
    #[error("connection refused: {0}")]
    struct MockError(String);

    #[derive(Clone)]
    struct Canned {
        status:       u16,
        content_type: Option<&'static str>,
        location:     Option<&'static [u8]>,
        body:         Vec<u8>,
    }

    /// In-memory client keyed by full URL; counts requests.
    #[derive(Default)]
    struct MockClient {
        routes:   HashMap<String, Canned>,
        requests: Mutex<Vec<String>>,
    }

    impl MockClient {
        fn page(mut self, url: &str, content_type: &'static str, body: &str) -> Self {
            self.routes.insert(url.to_string(), Canned {
                status:       200,
                content_type: Some(content_type),
                location:     None,
                body:         body.as_bytes().to_vec(),
            });
            self
        }

        fn status(mut self, url: &str, status: u16, content_type: &'static str) -> Self {
            self.routes.insert(url.to_string(), Canned {
                status,
                content_type: Some(content_type),
                location: None,
                body: b"<html>error</html>".to_vec(),
            });
            self
        }

        fn redirect(mut self, url: &str, status: u16, location: Option<&'static str>) -> Self {
            self.routes.insert(url.to_string(), Canned {
                status,
                content_type: Some("text/html"),
                location: location.map(str::as_bytes),
                body: Vec::new(),
            });
            self
        }

        fn raw_redirect(mut self, url: &str, location: &'static [u8]) -> Self {
            self.routes.insert(url.to_string(), Canned {
                status:       302,
                content_type: Some("text/html"),
                location:     Some(location),
                body:         Vec::new(),
            });
            self
        }

        fn bytes(mut self, url: &str, content_type: &'static str, body: Vec<u8>) -> Self {
            self.routes.insert(url.to_string(), Canned {
                status: 200,
                content_type: Some(content_type),
                location: None,
                body,
            });
            self
        }

        fn request_count(&self) -> usize { self.requests.lock().unwrap().len() }
    }

    impl HttpClient for MockClient {
        type Error = MockError;
        type Body = Cursor<Vec<u8>>;

        fn get(&self, url: &Url) -> std::result::Result<RawResponse<Self::Body>, Self::Error> {
            self.requests.lock().unwrap().push(url.to_string());

            let canned = self
                .routes
                .get(url.as_str())
                .cloned()
                .ok_or_else(|| MockError(url.to_string()))?;

            let mut headers = HeaderMap::new();
            if let Some(ct) = canned.content_type {
                headers.insert(CONTENT_TYPE, HeaderValue::from_static(ct));
            }
            if let Some(location) = canned.location {
                headers.insert(LOCATION, HeaderValue::from_bytes(location).unwrap());
            }

            Ok(RawResponse::new(
                ResponseHead::new(Some(canned.status), headers),
                Cursor::new(canned.body),
            ))
        }
    }

    const HELLO: &str = "<html><body>hello</body></html>";

    /// one -> two -> three -> hello.html, three hops.
    fn chain() -> MockClient {
        MockClient::default()
            .redirect("http://test.local/redirect/one", 301, Some("two"))
            .redirect("http://test.local/redirect/two", 302, Some("/redirect/three"))
            .redirect("http://test.local/redirect/three", 307, Some("http://test.local/hello.html"))
            .page("http://test.local/hello.html", "text/html; charset=utf-8", HELLO)
    }

    fn url(s: &str) -> Url { Url::parse(s).unwrap() }

    #[test]
    fn test_fetch_plain_page() {
        let fetcher = Fetcher::new(chain());
        assert_eq!(fetcher.fetch("http://test.local/hello.html").as_deref(), Some(HELLO));
        assert_eq!(fetcher.client().request_count(), 1);
    }

    #[test]
    fn test_redirect_chain_within_budget() {
        for budget in [3, 4, 10] {
            let fetcher = Fetcher::new(chain());
            let html = fetcher.fetch_with_redirects("http://test.local/redirect/one", budget);
            assert_eq!(html.as_deref(), Some(HELLO), "budget {}", budget);
            assert_eq!(fetcher.client().request_count(), 4);
        }
    }

    #[test]
    fn test_redirect_chain_over_budget() {
        for budget in [-1, 0, 1, 2] {
            let fetcher = Fetcher::new(chain());
            let html = fetcher.fetch_with_redirects("http://test.local/redirect/one", budget);
            assert_eq!(html, None, "budget {}", budget);
        }
    }

    #[test]
    fn test_non_positive_budget_makes_no_hop() {
        for budget in [i32::MIN, -1, 0] {
            let fetcher = Fetcher::new(chain());
            let outcome = fetcher
                .fetch_url(&url("http://test.local/redirect/one"), budget)
                .unwrap();

            assert_eq!(
                outcome,
                Outcome::Unavailable(Unavailable::RedirectLimit {
                    url: url("http://test.local/redirect/one"),
                })
            );
            assert_eq!(fetcher.client().request_count(), 1);
        }
    }

    #[test]
    fn test_budget_exhausted_mid_chain() {
        let fetcher = Fetcher::new(chain());
        let outcome = fetcher
            .fetch_url(&url("http://test.local/redirect/one"), 2)
            .unwrap();

        assert_eq!(
            outcome,
            Outcome::Unavailable(Unavailable::RedirectLimit {
                url: url("http://test.local/redirect/three"),
            })
        );
        assert_eq!(fetcher.client().request_count(), 3);
    }

    #[test]
    fn test_default_budget() {
        let fetcher = Fetcher::new(chain());
        assert_eq!(fetcher.fetch("http://test.local/redirect/one").as_deref(), Some(HELLO));

        let fetcher = Fetcher::new(chain()).with_options(FetchOptions::default().max_redirects(2));
        assert_eq!(fetcher.fetch("http://test.local/redirect/one"), None);
    }

    #[test]
    fn test_redirect_loop_terminates() {
        let client = MockClient::default()
            .redirect("http://test.local/loop1", 302, Some("/loop2"))
            .redirect("http://test.local/loop2", 302, Some("/loop1"));
        let fetcher = Fetcher::new(client);

        for budget in [0, 1, 5, 100] {
            assert_eq!(fetcher.fetch_with_redirects("http://test.local/loop1", budget), None);
        }
        // 1 + 2 + 6 + 101 requests: the budget is the only stop condition
        assert_eq!(fetcher.client().request_count(), 110);
    }

    #[test]
    fn test_redirect_to_non_html() {
        let client = MockClient::default()
            .redirect("http://test.local/go", 302, Some("/cover.jpg"))
            .bytes("http://test.local/cover.jpg", "image/jpeg", vec![0xff, 0xd8, 0xff]);
        let fetcher = Fetcher::new(client);

        let outcome = fetcher.fetch_url(&url("http://test.local/go"), 5).unwrap();
        assert_eq!(
            outcome,
            Outcome::Unavailable(Unavailable::NotHtml {
                url:          url("http://test.local/cover.jpg"),
                content_type: Some("image/jpeg".to_string()),
            })
        );
    }

    #[test]
    fn test_non_html_pages() {
        let client = MockClient::default()
            .page("http://test.local/double_extension.html.txt", "text/plain", "<html></html>")
            .page("http://test.local/no_extension", "text/plain; charset=utf-8", "plain");
        let fetcher = Fetcher::new(client);

        for budget in [0, 5] {
            assert_eq!(
                fetcher.fetch_with_redirects("http://test.local/double_extension.html.txt", budget),
                None
            );
            assert_eq!(fetcher.fetch_with_redirects("http://test.local/no_extension", budget), None);
        }
    }

    #[test]
    fn test_missing_content_type() {
        let mut client = MockClient::default();
        client.routes.insert("http://test.local/bare".to_string(), Canned {
            status:       200,
            content_type: None,
            location:     None,
            body:         HELLO.as_bytes().to_vec(),
        });
        let fetcher = Fetcher::new(client);

        let outcome = fetcher.fetch_url(&url("http://test.local/bare"), 5).unwrap();
        assert_eq!(
            outcome,
            Outcome::Unavailable(Unavailable::NotHtml {
                url:          url("http://test.local/bare"),
                content_type: None,
            })
        );
    }

    #[test]
    fn test_error_status_html_page() {
        let client = MockClient::default()
            .status("http://test.local/nowhere", 404, "text/html")
            .status("http://test.local/gone", 410, "text/html; charset=utf-8");
        let fetcher = Fetcher::new(client);

        let outcome = fetcher.fetch_url(&url("http://test.local/nowhere"), 5).unwrap();
        assert_eq!(
            outcome,
            Outcome::Unavailable(Unavailable::Status {
                url:    url("http://test.local/nowhere"),
                status: Some(404),
            })
        );
        assert_eq!(fetcher.fetch("http://test.local/gone"), None);
    }

    #[test]
    fn test_missing_location() {
        let client = MockClient::default().redirect("http://test.local/moved", 301, None);
        let fetcher = Fetcher::new(client);

        let outcome = fetcher.fetch_url(&url("http://test.local/moved"), 5).unwrap();
        assert_eq!(
            outcome,
            Outcome::Unavailable(Unavailable::MissingLocation {
                url: url("http://test.local/moved"),
            })
        );
    }

    #[test]
    fn test_invalid_location() {
        let client = MockClient::default().redirect("http://test.local/moved", 302, Some("http://[::1"));
        let fetcher = Fetcher::new(client);

        let outcome = fetcher.fetch_url(&url("http://test.local/moved"), 5).unwrap();
        assert_eq!(
            outcome,
            Outcome::Unavailable(Unavailable::InvalidLocation {
                url:      url("http://test.local/moved"),
                location: "http://[::1".to_string(),
            })
        );
    }

    #[test]
    fn test_non_ascii_location_is_invalid() {
        let client = MockClient::default().raw_redirect("http://test.local/moved", b"/caf\xe9");
        let fetcher = Fetcher::new(client);

        let outcome = fetcher.fetch_url(&url("http://test.local/moved"), 5).unwrap();
        assert_eq!(
            outcome,
            Outcome::Unavailable(Unavailable::InvalidLocation {
                url:      url("http://test.local/moved"),
                location: "/caf\u{fffd}".to_string(),
            })
        );
        assert_eq!(fetcher.client().request_count(), 1);
    }

    #[test]
    fn test_redirect_to_unsupported_scheme() {
        let client = MockClient::default().redirect("http://test.local/ftp", 302, Some("ftp://files.local/a"));
        let fetcher = Fetcher::new(client);

        let outcome = fetcher.fetch_url(&url("http://test.local/ftp"), 5).unwrap();
        assert_eq!(
            outcome,
            Outcome::Unavailable(Unavailable::UnsupportedScheme {
                url: url("ftp://files.local/a"),
            })
        );
        assert_eq!(fetcher.client().request_count(), 1);
    }

    #[test]
    fn test_transport_error_propagates_from_fetch_url() {
        let fetcher = Fetcher::new(MockClient::default());

        let err = fetcher
            .fetch_url(&url("http://unreachable.local/"), 5)
            .unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
    }

    #[test]
    fn test_transport_error_becomes_none() {
        let fetcher = Fetcher::new(MockClient::default());
        assert_eq!(fetcher.fetch("http://unreachable.local/"), None);
    }

    #[test]
    fn test_transport_error_mid_chain() {
        let client = MockClient::default().redirect("http://test.local/away", 302, Some("http://unreachable.local/"));
        let fetcher = Fetcher::new(client);

        let err = fetcher.fetch_url(&url("http://test.local/away"), 5).unwrap_err();
        match err {
            FetchError::Transport { url: failed, .. } => {
                assert_eq!(failed, url("http://unreachable.local/"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_url_is_none() {
        let fetcher = Fetcher::new(chain());
        assert_eq!(fetcher.fetch("not a url"), None);
        assert_eq!(fetcher.fetch(""), None);
        assert_eq!(fetcher.client().request_count(), 0);
    }

    #[test]
    fn test_parse_url_reports_invalid_url() {
        let err = parse_url("not a url").unwrap_err();
        match &err {
            FetchError::InvalidUrl { url, .. } => assert_eq!(url, "not a url"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().starts_with("invalid URL \"not a url\""));

        assert!(parse_url("http://test.local/").is_ok());
    }

    #[test]
    fn test_charset_from_content_type() {
        let client = MockClient::default().bytes(
            "http://test.local/latin1.html",
            "text/html; charset=ISO-8859-1",
            vec![b'c', b'a', b'f', 0xe9],
        );
        let fetcher = Fetcher::new(client);

        assert_eq!(fetcher.fetch("http://test.local/latin1.html").as_deref(), Some("caf\u{e9}"));
    }

    #[test]
    fn test_probe_returns_head_without_following() {
        let fetcher = Fetcher::new(chain());

        let head = fetcher.probe(&url("http://test.local/redirect/one")).unwrap();
        assert_eq!(head.status(), Some(301));
        assert_eq!(head.location(), Some("two"));
        assert!(is_redirect(&head));
        assert_eq!(fetcher.client().request_count(), 1);
    }
}
