//! Conventional-path probing for llms.txt.
//!
//! Given a base URL (usually a package homepage) the prober tries a fixed,
//! ordered list of candidates and returns the first one whose response passes
//! the [`ContentValidator`]:
//!
//! 1. `{base}/llms.txt`
//! 2. `{base}/docs/llms.txt`
//! 3. `{origin}/llms.txt`
//! 4. `{origin}/docs/llms.txt`
//!
//! `base` has trailing slashes stripped; `origin` is scheme + host (+ port).
//! The origin candidates cover homepages that point at a deep path while the
//! file lives at the site root.

use std::sync::Arc;
use url::Url;

use crate::fetcher::HttpFetch;
use crate::reporter::Reporter;
use crate::types::FetchResult;
use crate::validator::ContentValidator;

/// Path suffixes tried against each base, in order.
pub const STANDARD_PATHS: [&str; 2] = ["llms.txt", "docs/llms.txt"];

/// Probes a site for llms.txt at the standard locations.
#[derive(Clone)]
pub struct StandardUrlProber {
    fetcher: Arc<dyn HttpFetch>,
    reporter: Arc<dyn Reporter>,
}

impl StandardUrlProber {
    /// Create a prober issuing requests through `fetcher`.
    pub fn new(fetcher: Arc<dyn HttpFetch>, reporter: Arc<dyn Reporter>) -> Self {
        Self { fetcher, reporter }
    }

    /// Try each candidate derived from `base_url`; first accepted wins.
    ///
    /// Transport failures and rejected responses move on to the next
    /// candidate. Returns `None` once the list is exhausted.
    pub async fn probe(&self, base_url: &str) -> Option<FetchResult> {
        for candidate in candidate_urls(base_url) {
            let response = match self.fetcher.get(&candidate).await {
                Ok(response) => response,
                Err(err) => {
                    self.reporter
                        .debug(&candidate, &format!("transport failure: {err}"));
                    continue;
                },
            };

            match ContentValidator::check(&response) {
                Ok(()) => {
                    self.reporter.debug(&candidate, "accepted");
                    return Some(FetchResult::found(candidate, response.body));
                },
                Err(err) => self.reporter.debug(&candidate, &format!("rejected: {err}")),
            }
        }

        None
    }
}

/// Ordered candidate URLs for `base_url`, without repeats.
///
/// When `base_url` is at the site root the origin candidates coincide with
/// the base candidates and are not listed twice. An unparseable base yields
/// only the base-relative candidates.
///
/// ```rust
/// use llmsfetch_core::probe::candidate_urls;
///
/// assert_eq!(
///     candidate_urls("https://example.com/guide/"),
///     vec![
///         "https://example.com/guide/llms.txt",
///         "https://example.com/guide/docs/llms.txt",
///         "https://example.com/llms.txt",
///         "https://example.com/docs/llms.txt",
///     ]
/// );
/// ```
pub fn candidate_urls(base_url: &str) -> Vec<String> {
    let base = base_url.trim().trim_end_matches('/');

    let mut candidates: Vec<String> = STANDARD_PATHS
        .iter()
        .map(|suffix| format!("{base}/{suffix}"))
        .collect();

    if let Some(origin) = origin_of(base) {
        for suffix in STANDARD_PATHS {
            let candidate = format!("{origin}/{suffix}");
            if !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        }
    }

    candidates
}

/// Scheme, host and non-default port of `url`.
fn origin_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let origin = parsed.origin();
    origin.is_tuple().then(|| origin.ascii_serialization())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::fetcher::{CannedFetcher, HttpResponse};
    use crate::reporter::SilentReporter;

    fn prober(fetcher: &Arc<CannedFetcher>) -> StandardUrlProber {
        StandardUrlProber::new(fetcher.clone(), Arc::new(SilentReporter))
    }

    #[test]
    fn test_candidates_for_site_root() {
        assert_eq!(
            candidate_urls("https://y.io"),
            vec!["https://y.io/llms.txt", "https://y.io/docs/llms.txt"]
        );
        assert_eq!(candidate_urls("https://y.io///"), candidate_urls("https://y.io"));
    }

    #[test]
    fn test_candidates_keep_port_in_origin() {
        let candidates = candidate_urls("http://127.0.0.1:8080/pkg/");
        assert_eq!(candidates[2], "http://127.0.0.1:8080/llms.txt");
        assert_eq!(candidates[3], "http://127.0.0.1:8080/docs/llms.txt");
    }

    #[test]
    fn test_candidates_for_unparseable_base() {
        assert_eq!(
            candidate_urls("/docs"),
            vec!["/docs/llms.txt", "/docs/docs/llms.txt"]
        );
    }

    #[tokio::test]
    async fn test_probe_finds_root_llms_txt() {
        let fetcher = Arc::new(
            CannedFetcher::new().route("https://testsite.com/llms.txt", HttpResponse::plain("# Root")),
        );

        let result = prober(&fetcher).probe("https://testsite.com").await.unwrap();
        assert_eq!(result.location(), "https://testsite.com/llms.txt");
        assert_eq!(result.content(), "# Root");
        assert!(!result.is_fallback());
        assert_eq!(fetcher.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_probe_falls_through_to_docs_path() {
        let fetcher = Arc::new(
            CannedFetcher::new()
                .route("https://y.io/docs/llms.txt", HttpResponse::markdown("# Y docs")),
        );

        let result = prober(&fetcher).probe("https://y.io").await.unwrap();
        assert_eq!(result.location(), "https://y.io/docs/llms.txt");
        assert_eq!(result.content(), "# Y docs");
    }

    #[tokio::test]
    async fn test_probe_earlier_candidate_wins() {
        let fetcher = Arc::new(
            CannedFetcher::new()
                .route("https://a.dev/guide/docs/llms.txt", HttpResponse::plain("# nested"))
                .route("https://a.dev/llms.txt", HttpResponse::plain("# root")),
        );

        let result = prober(&fetcher).probe("https://a.dev/guide").await.unwrap();
        assert_eq!(result.content(), "# nested");
        assert_eq!(
            fetcher.requests(),
            vec![
                "https://a.dev/guide/llms.txt",
                "https://a.dev/guide/docs/llms.txt"
            ]
        );
    }

    #[tokio::test]
    async fn test_probe_reaches_origin_candidates_in_order() {
        let fetcher = Arc::new(
            CannedFetcher::new()
                .fail("https://a.dev/guide/llms.txt")
                .route("https://a.dev/guide/docs/llms.txt", HttpResponse::html("<html></html>"))
                .route("https://a.dev/docs/llms.txt", HttpResponse::plain("# origin docs")),
        );

        let result = prober(&fetcher).probe("https://a.dev/guide/").await.unwrap();
        assert_eq!(result.location(), "https://a.dev/docs/llms.txt");
        assert_eq!(
            fetcher.requests(),
            vec![
                "https://a.dev/guide/llms.txt",
                "https://a.dev/guide/docs/llms.txt",
                "https://a.dev/llms.txt",
                "https://a.dev/docs/llms.txt"
            ]
        );
    }

    #[tokio::test]
    async fn test_probe_skips_html_catch_all() {
        let fetcher = Arc::new(
            CannedFetcher::new()
                .route(
                    "https://htmlsite.com/llms.txt",
                    HttpResponse::html("<html><body>404 Not Found</body></html>"),
                )
                .route(
                    "https://htmlsite.com/docs/llms.txt",
                    HttpResponse::ok(None, "<!DOCTYPE html><html></html>"),
                ),
        );

        assert!(prober(&fetcher).probe("https://htmlsite.com").await.is_none());
    }

    #[tokio::test]
    async fn test_probe_returns_none_when_nothing_exists() {
        let fetcher = Arc::new(CannedFetcher::new());
        assert!(prober(&fetcher).probe("https://nofile.com").await.is_none());
        assert_eq!(fetcher.requests().len(), 2);
    }
}
