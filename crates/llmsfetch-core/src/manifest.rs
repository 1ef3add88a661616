//! `package.json` dependency extraction.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::{Error, Result};

/// A dependency section of `package.json`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyType {
    /// `dependencies`
    Prod,
    /// `devDependencies`
    Dev,
    /// `peerDependencies`
    Peer,
    /// `optionalDependencies`
    Optional,
    /// Every section.
    All,
}

impl DependencyType {
    /// Accepted spellings.
    pub const VARIANTS: [&'static str; 5] = ["prod", "dev", "peer", "optional", "all"];
}

impl FromStr for DependencyType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prod" => Ok(Self::Prod),
            "dev" => Ok(Self::Dev),
            "peer" => Ok(Self::Peer),
            "optional" => Ok(Self::Optional),
            "all" => Ok(Self::All),
            other => Err(Error::Config(format!("unknown dependency type '{other}'"))),
        }
    }
}

impl fmt::Display for DependencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Prod => "prod",
            Self::Dev => "dev",
            Self::Peer => "peer",
            Self::Optional => "optional",
            Self::All => "all",
        };
        f.write_str(label)
    }
}

/// Outcome of [`parse_deps`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDeps {
    /// Recognised types, never empty.
    pub types: Vec<DependencyType>,
    /// Entries that were not recognised, as written.
    pub unknown: Vec<String>,
}

/// Parse a comma-separated list such as `"prod, dev"`.
///
/// Unknown entries are dropped and returned in [`ParsedDeps::unknown`]. When
/// nothing valid remains the result is `[All]`.
///
/// ```rust
/// use llmsfetch_core::manifest::{DependencyType, parse_deps};
///
/// let parsed = parse_deps("Prod, bogus");
/// assert_eq!(parsed.types, vec![DependencyType::Prod]);
/// assert_eq!(parsed.unknown, vec!["bogus"]);
/// ```
pub fn parse_deps(list: &str) -> ParsedDeps {
    let mut types = Vec::new();
    let mut unknown = Vec::new();

    for entry in list.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        match entry.parse::<DependencyType>() {
            Ok(kind) => {
                if !types.contains(&kind) {
                    types.push(kind);
                }
            },
            Err(_) => unknown.push(entry.to_string()),
        }
    }

    if types.is_empty() {
        types.push(DependencyType::All);
    }
    ParsedDeps { types, unknown }
}

/// The dependency sections of a `package.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PackageManifest {
    /// Package name, if any.
    pub name: Option<String>,
    /// `dependencies`
    pub dependencies: BTreeMap<String, String>,
    /// `devDependencies`
    pub dev_dependencies: BTreeMap<String, String>,
    /// `peerDependencies`
    pub peer_dependencies: BTreeMap<String, String>,
    /// `optionalDependencies`
    pub optional_dependencies: BTreeMap<String, String>,
}

impl PackageManifest {
    /// Read and parse the manifest at `path`.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if the file cannot be read, [`Error::Serialization`] if
    /// it is not valid JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse manifest JSON.
    ///
    /// # Errors
    ///
    /// [`Error::Serialization`] if `json` is not a valid manifest.
    pub fn parse(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Merge the requested sections into one name → version map.
    ///
    /// Later sections win on duplicate names, in the order prod, dev, peer,
    /// optional.
    pub fn dependencies(&self, types: &[DependencyType]) -> BTreeMap<String, String> {
        let all = types.contains(&DependencyType::All);
        let wants = |kind| all || types.contains(&kind);

        let sections = [
            (DependencyType::Prod, &self.dependencies),
            (DependencyType::Dev, &self.dev_dependencies),
            (DependencyType::Peer, &self.peer_dependencies),
            (DependencyType::Optional, &self.optional_dependencies),
        ];

        let mut merged = BTreeMap::new();
        for (kind, section) in sections {
            if wants(kind) {
                merged.extend(section.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
        }
        merged
    }
}
