//! # Short-link Expansion
//!
//! Repository URLs may be given as `https://git.io/<id>` short-links. These
//! are expanded with a single GET that does not follow redirects; the
//! `Location` header of the response is the expanded URL.
//!
//! The lookup sits behind the [`RedirectLookup`] trait so resolution can be
//! exercised without network access. [`HttpRedirectLookup`] is the real
//! implementation.

use std::sync::LazyLock;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use regex::Regex;
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;

use crate::error::{Error, Result};

/// Short-links that are expanded before use.
pub static SHORT_LINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://git\.io/[\dA-Za-z-]+$").expect("short-link pattern is valid")
});

/// Upper bound on the single lookup request.
pub const REDIRECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Returns true if `url` is a short-link that needs expanding.
pub fn is_short_link(url: &str) -> bool {
    SHORT_LINK_PATTERN.is_match(url)
}

/// Resolves the redirect target of a URL.
#[async_trait]
pub trait RedirectLookup: Send + Sync {
    /// Issue one request to `url` and return its redirect target.
    async fn location(&self, url: &str) -> Result<String>;
}

/// [`RedirectLookup`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpRedirectLookup {
    client: reqwest::Client,
}

impl HttpRedirectLookup {
    /// Build a client that never follows redirects and gives up after
    /// [`REDIRECT_TIMEOUT`].
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .redirect(Policy::none())
            .timeout(REDIRECT_TIMEOUT)
            .build()
            .map_err(|e| Error::Network {
                url: String::new(),
                message: format!("failed to build HTTP client: {}", e),
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl RedirectLookup for HttpRedirectLookup {
    async fn location(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Network {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| Error::Redirect {
                url: url.to_string(),
                message: format!("response {} has no Location header", status),
            })
    }
}

/// Expand `url` if it is a short-link, otherwise return it unchanged.
///
/// There is no retry: a failed lookup is returned to the caller as is.
pub async fn expand_short_link(url: &str, lookup: &dyn RedirectLookup) -> Result<String> {
    if !is_short_link(url) {
        return Ok(url.to_string());
    }

    let expanded = lookup.location(url).await?;
    debug!("expanded short-link {} to {}", url, expanded);
    Ok(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct CountingLookup {
        target: String,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl RedirectLookup for CountingLookup {
        async fn location(&self, _url: &str) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.target.clone())
        }
    }

    fn counting(target: &str) -> CountingLookup {
        CountingLookup {
            target: target.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    #[test]
    fn test_is_short_link() {
        assert!(is_short_link("https://git.io/JE3mQ"));
        assert!(is_short_link("https://git.io/abc-123"));
        assert!(!is_short_link("http://git.io/JE3mQ"));
        assert!(!is_short_link("https://git.io/"));
        assert!(!is_short_link("https://git.io/JE3mQ/extra"));
        assert!(!is_short_link("https://github.com/foo/bar"));
        assert!(!is_short_link(""));
    }

    #[tokio::test]
    async fn test_expand_short_link_uses_lookup_once() {
        let lookup = counting("https://github.com/foo/bar");
        let expanded = expand_short_link("https://git.io/abc", &lookup).await.unwrap();
        assert_eq!(expanded, "https://github.com/foo/bar");
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_expand_short_link_passes_through_regular_urls() {
        let lookup = counting("unused");
        let expanded = expand_short_link("https://github.com/foo/bar.git", &lookup)
            .await
            .unwrap();
        assert_eq!(expanded, "https://github.com/foo/bar.git");
        assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_http_lookup_reads_location_without_following() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/JE3mQ"))
            .respond_with(
                ResponseTemplate::new(302)
                    .insert_header("Location", "https://github.com/dougkulak/repo"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let lookup = HttpRedirectLookup::new().unwrap();
        let target = lookup
            .location(&format!("{}/JE3mQ", server.uri()))
            .await
            .unwrap();
        assert_eq!(target, "https://github.com/dougkulak/repo");
    }

    #[tokio::test]
    async fn test_http_lookup_without_location_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let lookup = HttpRedirectLookup::new().unwrap();
        let err = lookup
            .location(&format!("{}/missing", server.uri()))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Redirect { .. }));
    }

    #[tokio::test]
    async fn test_http_lookup_transport_failure_is_network_error() {
        let lookup = HttpRedirectLookup::new().unwrap();
        let err = lookup.location("http://127.0.0.1:1/nothing").await.unwrap_err();
        match err {
            Error::Network { url, .. } => assert_eq!(url, "http://127.0.0.1:1/nothing"),
            other => panic!("expected network error, got {:?}", other),
        }
    }
}
