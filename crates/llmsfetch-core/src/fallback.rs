//! Substitutes for packages without a real llms.txt.

use crate::github::{GithubReadmeLocator, expand_shorthand, parse_coordinates};
use crate::types::{EMPTY_FALLBACK_LOCATION, FallbackStrategy, FallbackType, FetchResult, PackageMetadata};

/// Placeholder document for `name` used by the `empty` strategy.
pub fn empty_placeholder(name: &str) -> String {
    format!("# {name}\n\nNo llms.txt found for this package.\n")
}

/// Applies a [`FallbackStrategy`] once every real lookup has failed.
#[derive(Clone)]
pub struct FallbackPolicy {
    locator: GithubReadmeLocator,
}

impl FallbackPolicy {
    /// Create a policy fetching READMEs through `locator`.
    pub const fn new(locator: GithubReadmeLocator) -> Self {
        Self { locator }
    }

    /// Produce a substitute for `metadata` per `strategy`.
    ///
    /// - `readme`: README of a GitHub homepage, else of a GitHub repository.
    /// - `empty`: a synthesized placeholder, no network.
    /// - `none` / `skip`: nothing.
    pub async fn apply(
        &self,
        metadata: &PackageMetadata,
        strategy: FallbackStrategy,
    ) -> Option<FetchResult> {
        match strategy {
            FallbackStrategy::None | FallbackStrategy::Skip => None,
            FallbackStrategy::Empty => FetchResult::fallback(
                EMPTY_FALLBACK_LOCATION,
                empty_placeholder(&metadata.name),
                FallbackType::Empty,
            ),
            FallbackStrategy::Readme => self.readme(metadata).await,
        }
    }

    async fn readme(&self, metadata: &PackageMetadata) -> Option<FetchResult> {
        let homepage = metadata
            .homepage
            .as_deref()
            .filter(|url| parse_coordinates(url).is_some());
        if let Some(homepage) = homepage {
            if let Some(result) = self.locator.readme_fallback(homepage).await {
                return Some(result);
            }
        }

        let repository = expand_shorthand(metadata.repository_url()?);
        self.locator.readme_fallback(&repository).await
    }
}
