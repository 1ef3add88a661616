//! GitHub README scraping.
//!
//! GitHub repositories rarely publish llms.txt at a guessable path. Instead
//! the locator reads the repository README, picks the first link that looks
//! like a documentation site, and probes that site's standard locations.
//!
//! ```text
//! homepage ─► coordinates ─► README (main|master × 4 names) ─► docs link ─► probe
//! ```
//!
//! Any missing step ends the search; there is no further fallback here.

use regex::Regex;
use std::fmt;
use std::sync::{Arc, LazyLock};

use crate::fetcher::HttpFetch;
use crate::probe::StandardUrlProber;
use crate::reporter::Reporter;
use crate::types::{FallbackType, FetchResult};

/// Raw-content host serving repository files.
pub const DEFAULT_RAW_BASE: &str = "https://raw.githubusercontent.com";

/// Branches tried, in order.
pub const README_BRANCHES: [&str; 2] = ["main", "master"];

/// README filenames tried on each branch, in order.
pub const README_FILENAMES: [&str; 4] = ["README.md", "readme.md", "README.txt", "readme.txt"];

/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static GITHUB_REPO_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"github\.com/([^/?#]+)/([^/?#]+)").unwrap());

/// Regex for inline markdown links: [text](url)
///
/// SAFETY: Pattern is a compile-time constant that is known to be valid.
#[allow(clippy::unwrap_used)]
static MARKDOWN_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\(([^)]+)\)").unwrap());

/// Owner and repository name of a GitHub project.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GithubCoordinates {
    /// Account or organisation.
    pub owner: String,
    /// Repository name, without `.git`.
    pub repo: String,
}

impl fmt::Display for GithubCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// A README fetched from raw.githubusercontent.com.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Readme {
    /// README text.
    pub content: String,
    /// Raw URL it was fetched from.
    pub source_url: String,
}

/// Extract GitHub coordinates from a homepage or repository URL.
///
/// Strips a leading `git+`, any `#fragment` and a trailing `.git`, then
/// matches `github.com/<owner>/<repo>`.
///
/// ```rust
/// use llmsfetch_core::github::parse_coordinates;
///
/// let coords = parse_coordinates("git+https://github.com/a/b.git#readme").unwrap();
/// assert_eq!((coords.owner.as_str(), coords.repo.as_str()), ("a", "b"));
/// assert!(parse_coordinates("https://gitlab.com/a/b").is_none());
/// ```
pub fn parse_coordinates(url: &str) -> Option<GithubCoordinates> {
    let url = url.trim();
    let url = url.strip_prefix("git+").unwrap_or(url);
    let url = url.split('#').next().unwrap_or(url);
    let url = url.strip_suffix(".git").unwrap_or(url);

    let caps = GITHUB_REPO_RE.captures(url)?;
    let owner = caps.get(1)?.as_str();
    let repo = caps.get(2)?.as_str();
    let repo = repo.strip_suffix(".git").unwrap_or(repo);

    Some(GithubCoordinates {
        owner: owner.to_string(),
        repo: repo.to_string(),
    })
}

/// Expand npm's `github:owner/repo` repository shorthand to a full URL.
///
/// Anything else is returned unchanged.
pub fn expand_shorthand(url: &str) -> String {
    url.strip_prefix("github:").map_or_else(
        || url.to_string(),
        |rest| format!("https://github.com/{rest}"),
    )
}

/// First inline link whose text or URL mentions `docs` (case-insensitive).
///
/// ```rust
/// use llmsfetch_core::github::find_docs_link;
///
/// let readme = "[Home](https://x.dev) · [API Docs](https://api.x.dev)";
/// assert_eq!(find_docs_link(readme).as_deref(), Some("https://api.x.dev"));
/// ```
pub fn find_docs_link(readme: &str) -> Option<String> {
    MARKDOWN_LINK_RE.captures_iter(readme).find_map(|cap| {
        let text = cap.get(1).map_or("", |m| m.as_str());
        let url = cap.get(2)?.as_str();
        let mentions_docs = text.to_lowercase().contains("docs") || url.to_lowercase().contains("docs");
        mentions_docs.then(|| url.to_string())
    })
}

/// Turn a README link into a URL to probe.
///
/// - `http…` links are used as-is.
/// - `/…` links are site-root-relative; there is no site base to resolve them
///   against, so they are passed through unchanged and will fail to fetch.
/// - Anything else is assumed to be a repository path and mapped to
///   `https://github.com/{owner}/{repo}/blob/main/{link}`. This cannot tell a
///   repository path from a relative link on an external site.
pub fn resolve_link(link: &str, coords: &GithubCoordinates) -> String {
    if link.starts_with("http") || link.starts_with('/') {
        link.to_string()
    } else {
        format!(
            "https://github.com/{}/{}/blob/main/{link}",
            coords.owner, coords.repo
        )
    }
}

/// Finds llms.txt for packages whose homepage is a GitHub repository.
#[derive(Clone)]
pub struct GithubReadmeLocator {
    fetcher: Arc<dyn HttpFetch>,
    reporter: Arc<dyn Reporter>,
    prober: StandardUrlProber,
    raw_base: String,
}

impl GithubReadmeLocator {
    /// Create a locator against raw.githubusercontent.com.
    pub fn new(fetcher: Arc<dyn HttpFetch>, reporter: Arc<dyn Reporter>) -> Self {
        let prober = StandardUrlProber::new(fetcher.clone(), reporter.clone());
        Self {
            fetcher,
            reporter,
            prober,
            raw_base: DEFAULT_RAW_BASE.to_string(),
        }
    }

    /// Serve README files from `raw_base` instead (mock servers, mirrors).
    #[must_use]
    pub fn with_raw_base(mut self, raw_base: impl Into<String>) -> Self {
        self.raw_base = raw_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Raw URL for one branch/filename combination.
    pub fn raw_url(&self, coords: &GithubCoordinates, branch: &str, filename: &str) -> String {
        format!(
            "{}/{}/{}/{branch}/{filename}",
            self.raw_base, coords.owner, coords.repo
        )
    }

    /// Fetch the README, trying `main` then `master`, each with all four
    /// filenames. The first `200` with a non-blank body wins; transport
    /// errors and blank bodies move on.
    pub async fn fetch_readme(&self, coords: &GithubCoordinates) -> Option<Readme> {
        for branch in README_BRANCHES {
            for filename in README_FILENAMES {
                let url = self.raw_url(coords, branch, filename);
                match self.fetcher.get(&url).await {
                    Ok(response) if response.status == 200 => {
                        if response.body.trim().is_empty() {
                            self.reporter.debug(&url, "README candidate is empty");
                            continue;
                        }
                        return Some(Readme {
                            content: response.body,
                            source_url: url,
                        });
                    },
                    Ok(response) => {
                        self.reporter
                            .debug(&url, &format!("README candidate returned {}", response.status));
                    },
                    Err(err) => {
                        self.reporter
                            .debug(&url, &format!("transport failure: {err}"));
                    },
                }
            }
        }
        None
    }

    /// Resolve llms.txt through the README's documentation link.
    pub async fn locate(&self, homepage: &str) -> Option<FetchResult> {
        let Some(coords) = parse_coordinates(homepage) else {
            self.reporter.debug(homepage, "no GitHub coordinates in URL");
            return None;
        };

        let Some(readme) = self.fetch_readme(&coords).await else {
            self.reporter.debug(homepage, &format!("no README found for {coords}"));
            return None;
        };

        let Some(link) = find_docs_link(&readme.content) else {
            self.reporter
                .debug(&readme.source_url, "README has no documentation link");
            return None;
        };

        let target = resolve_link(&link, &coords);
        self.reporter
            .debug(&readme.source_url, &format!("probing documentation link {target}"));
        self.prober.probe(&target).await
    }

    /// The README itself as a `readme` fallback for the repository at `url`.
    pub async fn readme_fallback(&self, url: &str) -> Option<FetchResult> {
        let coords = parse_coordinates(url)?;
        let readme = self.fetch_readme(&coords).await?;
        FetchResult::fallback(readme.source_url, readme.content, FallbackType::Readme)
    }
}
