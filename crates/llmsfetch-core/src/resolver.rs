//! The resolution cascade.
//!
//! For one package the engine fetches registry metadata, then runs a fixed
//! sequence of stages until one produces a result:
//!
//! | Stage | Looks at | Finds |
//! |-------|----------|-------|
//! | [`Stage::Declared`] | `llms` field | the declared URL, if it validates |
//! | [`Stage::Homepage`] | `homepage` | GitHub docs link, or a standard path on the site |
//! | [`Stage::Fallback`] | strategy | README or placeholder substitute |
//!
//! Stages return a [`StageOutcome`]. `NotFound` moves on to the next stage;
//! transport failures and rejected content inside a stage are reported and
//! collapse to `NotFound`. Only missing metadata fails a resolution.

use futures::stream::{self, StreamExt};
use std::sync::Arc;
use url::Url;

use crate::fallback::FallbackPolicy;
use crate::fetcher::HttpFetch;
use crate::github::{GithubReadmeLocator, parse_coordinates};
use crate::probe::StandardUrlProber;
use crate::registry::MetadataProvider;
use crate::reporter::Reporter;
use crate::types::{FallbackStrategy, FetchResult, PackageMetadata};
use crate::validator::ContentValidator;
use crate::{Error, Result};

/// Result of running one stage.
#[derive(Debug)]
pub enum StageOutcome {
    /// The stage produced a result; the cascade stops.
    Found(FetchResult),
    /// Nothing here; try the next stage.
    NotFound,
    /// The resolution cannot continue.
    Failed(Error),
}

impl From<Option<FetchResult>> for StageOutcome {
    fn from(result: Option<FetchResult>) -> Self {
        result.map_or(Self::NotFound, Self::Found)
    }
}

/// Cascade stages after the metadata fetch, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// The package's declared `llms` URL.
    Declared,
    /// Homepage: GitHub README scraping or standard path probing.
    Homepage,
    /// The requested fallback strategy.
    Fallback,
}

impl Stage {
    /// Every stage, in the order they run.
    pub const CASCADE: [Self; 3] = [Self::Declared, Self::Homepage, Self::Fallback];

    const fn label(self) -> &'static str {
        match self {
            Self::Declared => "declared llms field",
            Self::Homepage => "homepage",
            Self::Fallback => "fallback",
        }
    }
}

/// Resolves packages to their llms.txt.
///
/// Holds no mutable state; one engine can serve any number of concurrent
/// resolutions.
///
/// ```rust,no_run
/// use llmsfetch_core::{
///     FallbackStrategy, NpmRegistry, ReqwestFetcher, ResolutionEngine, TracingReporter,
/// };
/// use std::sync::Arc;
///
/// # async fn demo() -> llmsfetch_core::Result<()> {
/// let fetcher = Arc::new(ReqwestFetcher::new()?);
/// let registry = Arc::new(NpmRegistry::new(fetcher.clone()));
/// let engine = ResolutionEngine::new(fetcher, registry, Arc::new(TracingReporter));
///
/// if let Some(found) = engine.resolve("zod", FallbackStrategy::None).await? {
///     println!("{}", found.location());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct ResolutionEngine {
    fetcher: Arc<dyn HttpFetch>,
    provider: Arc<dyn MetadataProvider>,
    reporter: Arc<dyn Reporter>,
    prober: StandardUrlProber,
    locator: GithubReadmeLocator,
    fallback: FallbackPolicy,
}

impl ResolutionEngine {
    /// Build an engine from its three collaborators.
    pub fn new(
        fetcher: Arc<dyn HttpFetch>,
        provider: Arc<dyn MetadataProvider>,
        reporter: Arc<dyn Reporter>,
    ) -> Self {
        let locator = GithubReadmeLocator::new(fetcher.clone(), reporter.clone());
        Self {
            prober: StandardUrlProber::new(fetcher.clone(), reporter.clone()),
            fallback: FallbackPolicy::new(locator.clone()),
            locator,
            fetcher,
            provider,
            reporter,
        }
    }

    /// Read GitHub README files from `raw_base` instead of
    /// raw.githubusercontent.com.
    #[must_use]
    pub fn with_raw_base(mut self, raw_base: impl Into<String>) -> Self {
        self.locator = self.locator.with_raw_base(raw_base);
        self.fallback = FallbackPolicy::new(self.locator.clone());
        self
    }

    /// Resolve `name`, applying `strategy` when no real llms.txt exists.
    ///
    /// # Errors
    ///
    /// [`Error::MetadataUnavailable`] when the provider has no metadata for
    /// `name`. Every other failure advances the cascade.
    pub async fn resolve(
        &self,
        name: &str,
        strategy: FallbackStrategy,
    ) -> Result<Option<FetchResult>> {
        let metadata = match self.provider.get(name).await {
            Ok(metadata) => metadata,
            Err(err) => {
                self.reporter.error(name, &err.to_string());
                return Err(err);
            },
        };

        for stage in Stage::CASCADE {
            match self.run_stage(stage, &metadata, strategy).await {
                StageOutcome::Found(result) => {
                    self.reporter
                        .info(name, &format!("{} → {}", stage.label(), result.location()));
                    return Ok(Some(result));
                },
                StageOutcome::NotFound => {
                    self.reporter
                        .debug(name, &format!("{}: nothing found", stage.label()));
                },
                StageOutcome::Failed(err) => {
                    self.reporter.error(name, &err.to_string());
                    return Err(err);
                },
            }
        }

        Ok(None)
    }

    /// Resolve every name, at most `concurrency` at a time.
    ///
    /// Results come back in input order, one per name. A failure for one
    /// package never affects the others.
    pub async fn resolve_many<S>(
        &self,
        names: &[S],
        strategy: FallbackStrategy,
        concurrency: usize,
    ) -> Vec<Result<Option<FetchResult>>>
    where
        S: AsRef<str> + Sync,
    {
        stream::iter(names)
            .map(|name| self.resolve(name.as_ref(), strategy))
            .buffered(concurrency.max(1))
            .collect()
            .await
    }

    /// Run a single stage against `metadata`.
    pub async fn run_stage(
        &self,
        stage: Stage,
        metadata: &PackageMetadata,
        strategy: FallbackStrategy,
    ) -> StageOutcome {
        match stage {
            Stage::Declared => self.declared_stage(metadata).await,
            Stage::Homepage => self.homepage_stage(metadata).await,
            Stage::Fallback => self.fallback.apply(metadata, strategy).await.into(),
        }
    }

    async fn declared_stage(&self, metadata: &PackageMetadata) -> StageOutcome {
        let Some(url) = metadata.declared_llms_url() else {
            if let Some(raw) = metadata.llms.as_deref() {
                self.reporter.warn(
                    &metadata.name,
                    &format!("ignoring non-http llms field '{raw}'"),
                );
            }
            return StageOutcome::NotFound;
        };

        match self.fetcher.get(url).await {
            Ok(response) => match ContentValidator::check(&response) {
                Ok(()) => StageOutcome::Found(FetchResult::found(url, response.body)),
                Err(err) => {
                    self.reporter
                        .warn(&metadata.name, &format!("declared {url} rejected: {err}"));
                    StageOutcome::NotFound
                },
            },
            Err(err) => {
                self.reporter
                    .warn(&metadata.name, &format!("declared {url} unreachable: {err}"));
                StageOutcome::NotFound
            },
        }
    }

    async fn homepage_stage(&self, metadata: &PackageMetadata) -> StageOutcome {
        let Some(homepage) = metadata.homepage.as_deref() else {
            return StageOutcome::NotFound;
        };

        if is_github_homepage(homepage) {
            self.reporter
                .debug(&metadata.name, "homepage is on GitHub, scanning README");
            self.locator.locate(homepage).await.into()
        } else {
            self.prober.probe(homepage).await.into()
        }
    }
}

/// Whether `homepage` is hosted on github.com.
fn is_github_homepage(homepage: &str) -> bool {
    Url::parse(homepage).map_or_else(
        |_| parse_coordinates(homepage).is_some(),
        |url| url.host_str().is_some_and(|host| host.contains("github.com")),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::fetcher::{CannedFetcher, HttpResponse};
    use crate::registry::StaticMetadata;
    use crate::reporter::{Level, MemoryReporter};
    use crate::types::FallbackType;

    fn engine(
        fetcher: &Arc<CannedFetcher>,
        packages: StaticMetadata,
    ) -> (ResolutionEngine, Arc<MemoryReporter>) {
        let reporter = Arc::new(MemoryReporter::new());
        let engine = ResolutionEngine::new(fetcher.clone(), Arc::new(packages), reporter.clone());
        (engine, reporter)
    }

    #[tokio::test]
    async fn test_declared_field_wins() {
        let fetcher = Arc::new(
            CannedFetcher::new().route("https://x.dev/llms.txt", HttpResponse::plain("# X")),
        );
        let packages = StaticMetadata::new().with(
            PackageMetadata::named("x")
                .with_llms("https://x.dev/llms.txt")
                .with_homepage("https://x.dev"),
        );
        let (engine, _) = engine(&fetcher, packages);

        let result = engine.resolve("x", FallbackStrategy::None).await.unwrap().unwrap();
        assert_eq!(result.location(), "https://x.dev/llms.txt");
        assert_eq!(result.content(), "# X");
        assert!(!result.is_fallback());
        assert_eq!(fetcher.requests(), vec!["https://x.dev/llms.txt"]);
    }

    #[tokio::test]
    async fn test_declared_failure_continues_to_homepage() {
        let mut broken = HttpResponse::plain("oops");
        broken.status = 500;
        let fetcher = Arc::new(
            CannedFetcher::new()
                .route("https://x.dev/files/llms.txt", broken)
                .route("https://x.dev/llms.txt", HttpResponse::plain("# from homepage")),
        );
        let packages = StaticMetadata::new().with(
            PackageMetadata::named("x")
                .with_llms("https://x.dev/files/llms.txt")
                .with_homepage("https://x.dev"),
        );
        let (engine, reporter) = engine(&fetcher, packages);

        let result = engine.resolve("x", FallbackStrategy::None).await.unwrap().unwrap();
        assert_eq!(result.location(), "https://x.dev/llms.txt");
        assert!(reporter.contains(Level::Warn, "status 500"));
    }

    #[tokio::test]
    async fn test_non_http_declared_field_is_ignored() {
        let fetcher = Arc::new(CannedFetcher::new());
        let packages =
            StaticMetadata::new().with(PackageMetadata::named("rel").with_llms("./llms.txt"));
        let (engine, reporter) = engine(&fetcher, packages);

        assert!(engine.resolve("rel", FallbackStrategy::None).await.unwrap().is_none());
        assert!(fetcher.requests().is_empty());
        assert!(reporter.contains(Level::Warn, "non-http"));
    }

    #[tokio::test]
    async fn test_homepage_probe_scenario() {
        let fetcher = Arc::new(
            CannedFetcher::new()
                .route("https://y.io/docs/llms.txt", HttpResponse::markdown("# Y docs")),
        );
        let packages =
            StaticMetadata::new().with(PackageMetadata::named("y").with_homepage("https://y.io"));
        let (engine, _) = engine(&fetcher, packages);

        let result = engine.resolve("y", FallbackStrategy::None).await.unwrap().unwrap();
        assert_eq!(result.location(), "https://y.io/docs/llms.txt");
        assert_eq!(result.content(), "# Y docs");
    }

    #[tokio::test]
    async fn test_github_homepage_scenario() {
        let fetcher = Arc::new(
            CannedFetcher::new()
                .route(
                    "https://raw.githubusercontent.com/o/r/main/README.md",
                    HttpResponse::plain("# r\n\n[Documentation](https://docs.o.dev)\n"),
                )
                .route("https://docs.o.dev/llms.txt", HttpResponse::plain("# Docs")),
        );
        let packages = StaticMetadata::new()
            .with(PackageMetadata::named("r").with_homepage("https://github.com/o/r"));
        let (engine, _) = engine(&fetcher, packages);

        let result = engine.resolve("r", FallbackStrategy::None).await.unwrap().unwrap();
        assert_eq!(result.content(), "# Docs");
    }

    #[tokio::test]
    async fn test_github_homepage_is_never_probed_as_site() {
        let fetcher = Arc::new(
            CannedFetcher::new()
                .route("https://github.com/o/r/llms.txt", HttpResponse::plain("# wrong")),
        );
        let packages = StaticMetadata::new()
            .with(PackageMetadata::named("r").with_homepage("https://github.com/o/r"));
        let (engine, _) = engine(&fetcher, packages);

        assert!(engine.resolve("r", FallbackStrategy::None).await.unwrap().is_none());
        assert!(
            fetcher
                .requests()
                .iter()
                .all(|url| url.starts_with("https://raw.githubusercontent.com/"))
        );
    }

    #[tokio::test]
    async fn test_empty_fallback_scenario() {
        let fetcher = Arc::new(CannedFetcher::new());
        let packages = StaticMetadata::new().with(PackageMetadata::named("bare"));
        let (engine, _) = engine(&fetcher, packages);

        let result = engine.resolve("bare", FallbackStrategy::Empty).await.unwrap().unwrap();
        assert!(result.content().contains("bare"));
        assert!(result.content().contains("No llms.txt found"));
        assert_eq!(result.fallback_type(), Some(FallbackType::Empty));
        assert!(fetcher.requests().is_empty());
    }

    #[tokio::test]
    async fn test_nothing_found_is_none() {
        let mut broken = HttpResponse::with_status(500);
        broken.content_type = Some("text/plain".to_string());
        let fetcher = Arc::new(
            CannedFetcher::new()
                .route("https://z.dev/broken/llms.txt", broken)
                .route(
                    "https://raw.githubusercontent.com/z/z/main/README.md",
                    HttpResponse::plain("# z\n\nno links here"),
                ),
        );
        let packages = StaticMetadata::new().with(
            PackageMetadata::named("z")
                .with_llms("https://z.dev/broken/llms.txt")
                .with_homepage("https://z.dev/site")
                .with_repository("https://github.com/z/z"),
        );
        let (engine, _) = engine(&fetcher, packages);

        assert!(engine.resolve("z", FallbackStrategy::None).await.unwrap().is_none());
        assert_eq!(fetcher.requests().len(), 5);
    }

    #[tokio::test]
    async fn test_missing_metadata_is_error() {
        let fetcher = Arc::new(CannedFetcher::new());
        let (engine, reporter) = engine(&fetcher, StaticMetadata::new());

        let err = engine
            .resolve("ghost", FallbackStrategy::Empty)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MetadataUnavailable { .. }));
        assert!(reporter.contains(Level::Error, "ghost"));
    }

    #[tokio::test]
    async fn test_resolve_many_preserves_order_and_isolates_failures() {
        let fetcher = Arc::new(
            CannedFetcher::new().route("https://a.dev/llms.txt", HttpResponse::plain("# A")),
        );
        let packages = StaticMetadata::new()
            .with(PackageMetadata::named("a").with_homepage("https://a.dev"))
            .with(PackageMetadata::named("b"));
        let (engine, _) = engine(&fetcher, packages);

        let results = engine
            .resolve_many(&["a", "missing", "b"], FallbackStrategy::None, 2)
            .await;
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().as_ref().unwrap().content(), "# A");
        assert!(results[1].is_err());
        assert!(results[2].as_ref().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_stages_run_individually() {
        let fetcher = Arc::new(CannedFetcher::new());
        let (engine, _) = engine(&fetcher, StaticMetadata::new());
        let metadata = PackageMetadata::named("solo");

        assert!(matches!(
            engine.run_stage(Stage::Homepage, &metadata, FallbackStrategy::None).await,
            StageOutcome::NotFound
        ));
        assert!(matches!(
            engine.run_stage(Stage::Fallback, &metadata, FallbackStrategy::Empty).await,
            StageOutcome::Found(_)
        ));
    }

    #[test]
    fn test_is_github_homepage() {
        assert!(is_github_homepage("https://github.com/o/r#readme"));
        assert!(is_github_homepage("https://www.github.com/o/r"));
        assert!(!is_github_homepage("https://o.github.io/r"));
        assert!(!is_github_homepage("https://zod.dev"));
    }
}
