//! Package metadata providers.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;

use crate::fetcher::HttpFetch;
use crate::types::PackageMetadata;
use crate::{Error, Result};

/// Public npm registry.
pub const DEFAULT_REGISTRY: &str = "https://registry.npmjs.org";

/// Source of [`PackageMetadata`] for a package name.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Metadata for `name`.
    ///
    /// # Errors
    ///
    /// [`Error::MetadataUnavailable`] when the package is unknown or the
    /// registry cannot be read or decoded.
    async fn get(&self, name: &str) -> Result<PackageMetadata>;
}

/// Reads the `latest` manifest of a package from an npm-compatible registry.
#[derive(Clone)]
pub struct NpmRegistry {
    fetcher: Arc<dyn HttpFetch>,
    base: String,
}

impl NpmRegistry {
    /// Registry client for [`DEFAULT_REGISTRY`].
    pub fn new(fetcher: Arc<dyn HttpFetch>) -> Self {
        Self {
            fetcher,
            base: DEFAULT_REGISTRY.to_string(),
        }
    }

    /// Use a different registry base URL.
    #[must_use]
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into().trim_end_matches('/').to_string();
        self
    }

    /// Registry base URL without trailing slash.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// URL of the `latest` manifest for `name`.
    pub fn manifest_url(&self, name: &str) -> String {
        format!("{}/{name}/latest", self.base)
    }
}

#[async_trait]
impl MetadataProvider for NpmRegistry {
    async fn get(&self, name: &str) -> Result<PackageMetadata> {
        let url = self.manifest_url(name);
        let response = self
            .fetcher
            .get(&url)
            .await
            .map_err(|e| Error::metadata_unavailable(name, e.to_string()))?;

        if !response.is_success() {
            return Err(Error::metadata_unavailable(
                name,
                format!("registry returned status {}", response.status),
            ));
        }

        let mut metadata: PackageMetadata = serde_json::from_str(&response.body).map_err(|e| {
            Error::metadata_unavailable(name, format!("invalid registry response: {e}"))
        })?;
        if metadata.name.is_empty() {
            metadata.name = name.to_string();
        }
        Ok(metadata)
    }
}

/// In-memory provider keyed by package name.
#[derive(Debug, Clone, Default)]
pub struct StaticMetadata {
    packages: HashMap<String, PackageMetadata>,
}

impl StaticMetadata {
    /// No packages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `metadata` under its own name.
    #[must_use]
    pub fn with(mut self, metadata: PackageMetadata) -> Self {
        self.packages.insert(metadata.name.clone(), metadata);
        self
    }
}

#[async_trait]
impl MetadataProvider for StaticMetadata {
    async fn get(&self, name: &str) -> Result<PackageMetadata> {
        self.packages
            .get(name)
            .cloned()
            .ok_or_else(|| Error::metadata_unavailable(name, "package not found"))
    }
}
