//! Output filenames for package names.
//!
//! Scoped npm names (`@scope/pkg`) contain characters that are awkward or
//! illegal in filenames. [`sanitize_filename`] rewrites them and
//! [`generate_filename`] applies a user pattern and extension.

use serde::{Deserialize, Serialize};

/// Characters stripped from filenames outright.
const FORBIDDEN: [char; 8] = ['<', '>', ':', '"', '|', '?', '*', '\\'];

/// Placeholder in filename patterns.
pub const NAME_PLACEHOLDER: &str = "{name}";

/// Replacement strings used by [`sanitize_filename`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizerOptions {
    /// Replaces spaces.
    pub space_replacement: String,
    /// Replaces `/`.
    pub slash_replacement: String,
    /// Replaces a leading `@`.
    pub at_replacement: String,
}

impl Default for SanitizerOptions {
    fn default() -> Self {
        Self {
            space_replacement: "_".to_string(),
            slash_replacement: "-".to_string(),
            at_replacement: String::new(),
        }
    }
}

/// Make `name` safe to use as a filename.
///
/// ```rust
/// use llmsfetch_core::naming::{SanitizerOptions, sanitize_filename};
///
/// let opts = SanitizerOptions::default();
/// assert_eq!(sanitize_filename("@scope/my pkg", &opts), "scope-my_pkg");
/// ```
pub fn sanitize_filename(name: &str, opts: &SanitizerOptions) -> String {
    let (prefix, rest) = name
        .strip_prefix('@')
        .map_or(("", name), |rest| (opts.at_replacement.as_str(), rest));

    let mut out = String::with_capacity(name.len());
    out.push_str(prefix);
    for ch in rest.chars() {
        match ch {
            '/' => out.push_str(&opts.slash_replacement),
            ' ' => out.push_str(&opts.space_replacement),
            c if FORBIDDEN.contains(&c) => {},
            c => out.push(c),
        }
    }
    out
}

/// Build `{pattern with name}.{extension}`.
///
/// Only the first `{name}` in `pattern` is substituted. A leading dot on
/// `extension` is ignored.
pub fn generate_filename(
    pattern: &str,
    name: &str,
    extension: &str,
    opts: &SanitizerOptions,
) -> String {
    let sanitized = sanitize_filename(name, opts);
    let base = pattern.replacen(NAME_PLACEHOLDER, &sanitized, 1);
    let extension = extension.strip_prefix('.').unwrap_or(extension);
    format!("{base}.{extension}")
}
