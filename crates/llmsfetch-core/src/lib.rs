//! # llmsfetch-core
//!
//! Locates the `llms.txt` documentation file for npm packages.
//!
//! Given a package name, the [`ResolutionEngine`] reads registry metadata and
//! walks a fixed cascade of heuristics until one yields acceptable content:
//!
//! 1. the `llms` URL declared in the package metadata
//! 2. the homepage: standard paths on the site, or for GitHub homepages the
//!    documentation link found in the repository README
//! 3. a fallback substitute (the README itself, or a placeholder)
//!
//! ## Architecture
//!
//! - **HTTP**: every request goes through the [`HttpFetch`] trait
//! - **Metadata**: [`MetadataProvider`], backed by the npm registry
//! - **Heuristics**: [`ContentValidator`], [`StandardUrlProber`],
//!   [`GithubReadmeLocator`], [`FallbackPolicy`]
//! - **Diagnostics**: an injected [`Reporter`]; the crate installs no global
//!   logger
//! - **Support**: [`Config`], [`naming`] and [`manifest`] for the CLI
//!
//! ## Quick Start
//!
//! ```rust
//! use llmsfetch_core::{
//!     CannedFetcher, FallbackStrategy, HttpResponse, PackageMetadata, ResolutionEngine,
//!     SilentReporter, StaticMetadata,
//! };
//! use std::sync::Arc;
//!
//! let fetcher = Arc::new(
//!     CannedFetcher::new().route("https://y.io/docs/llms.txt", HttpResponse::markdown("# Y")),
//! );
//! let packages = StaticMetadata::new()
//!     .with(PackageMetadata::named("y").with_homepage("https://y.io"));
//! let engine = ResolutionEngine::new(fetcher, Arc::new(packages), Arc::new(SilentReporter));
//!
//! let found = futures::executor::block_on(engine.resolve("y", FallbackStrategy::None))?;
//! assert_eq!(found.map(|r| r.location().to_string()).as_deref(), Some("https://y.io/docs/llms.txt"));
//! # Ok::<(), llmsfetch_core::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! Only [`Error::MetadataUnavailable`] escapes a resolution. Unreachable or
//! rejected candidates are reported and skipped.

/// Layered TOML configuration
pub mod config;
/// Error types and result aliases
pub mod error;
/// Fallback substitutes
pub mod fallback;
/// HTTP access seam and implementations
pub mod fetcher;
/// GitHub README scraping
pub mod github;
/// `package.json` dependency extraction
pub mod manifest;
/// Output filename generation
pub mod naming;
/// Standard-path probing
pub mod probe;
/// Package metadata providers
pub mod registry;
/// Injected diagnostics
pub mod reporter;
/// The resolution cascade
pub mod resolver;
/// Core data types
pub mod types;
/// Content acceptance heuristics
pub mod validator;

pub use config::{Config, OutputConfig, ResolveConfig};
pub use error::{Error, Result};
pub use fallback::FallbackPolicy;
pub use fetcher::{CannedFetcher, HttpFetch, HttpResponse, ReqwestFetcher};
pub use github::{GithubCoordinates, GithubReadmeLocator, Readme};
pub use manifest::{DependencyType, PackageManifest};
pub use naming::SanitizerOptions;
pub use probe::StandardUrlProber;
pub use registry::{MetadataProvider, NpmRegistry, StaticMetadata};
pub use reporter::{Level, MemoryReporter, Reporter, SilentReporter, TracingReporter};
pub use resolver::{ResolutionEngine, Stage, StageOutcome};
pub use types::*;
pub use validator::{ContentValidator, Verdict};
