//! Core data types shared across the resolution cascade.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Location recorded for synthesized placeholder content.
pub const EMPTY_FALLBACK_LOCATION: &str = "fallback:empty";

/// Package registry metadata consumed by the resolver.
///
/// Only the fields the cascade reads are modelled; every other registry field
/// is ignored during deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageMetadata {
    /// Registry name of the package.
    pub name: String,
    /// Project homepage, if declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    /// Declared location of the package's llms.txt.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llms: Option<String>,
    /// Source repository reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<RepositoryRef>,
}

impl PackageMetadata {
    /// Metadata carrying only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the homepage.
    #[must_use]
    pub fn with_homepage(mut self, homepage: impl Into<String>) -> Self {
        self.homepage = Some(homepage.into());
        self
    }

    /// Set the declared llms.txt URL.
    #[must_use]
    pub fn with_llms(mut self, llms: impl Into<String>) -> Self {
        self.llms = Some(llms.into());
        self
    }

    /// Set the repository reference.
    #[must_use]
    pub fn with_repository(mut self, repository: impl Into<RepositoryRef>) -> Self {
        self.repository = Some(repository.into());
        self
    }

    /// The declared `llms` value when it is an absolute `http(s)` URL.
    pub fn declared_llms_url(&self) -> Option<&str> {
        self.llms
            .as_deref()
            .filter(|url| url.starts_with("http://") || url.starts_with("https://"))
    }

    /// Repository URL regardless of the registry's representation.
    pub fn repository_url(&self) -> Option<&str> {
        self.repository.as_ref().map(RepositoryRef::url)
    }
}

/// A repository reference as registries publish it.
///
/// npm accepts both `"repository": "github:o/r"`-style strings and
/// `"repository": { "type": "git", "url": "..." }` objects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RepositoryRef {
    /// Bare URL string.
    Url(String),
    /// Object form with a `url` member.
    Object {
        /// Repository URL.
        url: String,
        /// VCS type, usually `git`.
        #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
        kind: Option<String>,
    },
}

impl RepositoryRef {
    /// The repository URL.
    pub fn url(&self) -> &str {
        match self {
            Self::Url(url) | Self::Object { url, .. } => url,
        }
    }
}

impl From<&str> for RepositoryRef {
    fn from(url: &str) -> Self {
        Self::Url(url.to_string())
    }
}

impl From<String> for RepositoryRef {
    fn from(url: String) -> Self {
        Self::Url(url)
    }
}

/// Which substitute was produced when no real llms.txt exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackType {
    /// The repository README stands in for llms.txt.
    Readme,
    /// A synthesized placeholder.
    Empty,
}

impl fmt::Display for FallbackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Readme => write!(f, "readme"),
            Self::Empty => write!(f, "empty"),
        }
    }
}

/// Outcome of a successful resolution.
///
/// Constructed only through [`FetchResult::found`] and
/// [`FetchResult::fallback`], which keeps `fallback_type` present exactly
/// when the result is a fallback and a fallback's content non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchResult {
    location: String,
    content: String,
    is_fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    fallback_type: Option<FallbackType>,
}

impl FetchResult {
    /// A real llms.txt fetched from `location`.
    pub fn found(location: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            content: content.into(),
            is_fallback: false,
            fallback_type: None,
        }
    }

    /// A substitute of the given kind, or `None` when `content` is blank.
    pub fn fallback(
        location: impl Into<String>,
        content: impl Into<String>,
        kind: FallbackType,
    ) -> Option<Self> {
        let content = content.into();
        if content.trim().is_empty() {
            return None;
        }
        Some(Self {
            location: location.into(),
            content,
            is_fallback: true,
            fallback_type: Some(kind),
        })
    }

    /// Source URI, or [`EMPTY_FALLBACK_LOCATION`] for synthesized content.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Document body.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume the result, keeping only the body.
    pub fn into_content(self) -> String {
        self.content
    }

    /// Whether the content is a substitute.
    pub const fn is_fallback(&self) -> bool {
        self.is_fallback
    }

    /// Kind of substitute, present iff [`is_fallback`](Self::is_fallback).
    pub const fn fallback_type(&self) -> Option<FallbackType> {
        self.fallback_type
    }
}

/// Policy applied when no real llms.txt is found.
///
/// `None` and `Skip` behave identically. Deserialization is lenient: any
/// unknown value becomes `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum FallbackStrategy {
    /// Report not found.
    #[default]
    None,
    /// Substitute the repository README.
    Readme,
    /// Synthesize a placeholder document.
    Empty,
    /// Alias of `None`.
    Skip,
}

impl FallbackStrategy {
    /// All accepted spellings, in display order.
    pub const VARIANTS: [&'static str; 4] = ["none", "readme", "empty", "skip"];

    /// Parse `value`, mapping anything unrecognised to [`FallbackStrategy::None`].
    pub fn lenient(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    /// Whether this strategy can produce a result at all.
    pub const fn produces_result(self) -> bool {
        matches!(self, Self::Readme | Self::Empty)
    }
}

impl FromStr for FallbackStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "readme" => Ok(Self::Readme),
            "empty" => Ok(Self::Empty),
            "skip" => Ok(Self::Skip),
            other => Err(Error::Config(format!(
                "unknown fallback strategy '{other}' (expected one of: {})",
                Self::VARIANTS.join(", ")
            ))),
        }
    }
}

impl From<String> for FallbackStrategy {
    fn from(value: String) -> Self {
        Self::lenient(&value)
    }
}

impl fmt::Display for FallbackStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Readme => write!(f, "readme"),
            Self::Empty => write!(f, "empty"),
            Self::Skip => write!(f, "skip"),
        }
    }
}
