//! The fetch run: collect packages, resolve them, write results.

use anyhow::{Context, Result, anyhow};
use llmsfetch_core::manifest::parse_deps;
use llmsfetch_core::naming::generate_filename;
use llmsfetch_core::{
    FetchResult, NpmRegistry, PackageManifest, ReqwestFetcher, ResolutionEngine, TracingReporter,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::cli::Cli;
use crate::error::CliError;
use crate::output::{PackageOutcome, Printer, Summary};
use crate::settings::Settings;

/// Run the fetch command for `cli`.
pub async fn execute(cli: &Cli) -> Result<()> {
    let settings = Settings::load(cli)?;
    let packages = collect_packages(cli)?;
    let printer = Printer::new(settings.verbosity);

    for line in settings.describe() {
        printer.detail(&line);
    }
    printer.info(&format!(
        "Processing {} package{}...",
        packages.len(),
        if packages.len() == 1 { "" } else { "s" }
    ));

    let fetcher = Arc::new(
        ReqwestFetcher::with_timeout(settings.timeout).map_err(CliError::internal)?,
    );
    let registry = Arc::new(NpmRegistry::new(fetcher.clone()).with_base(settings.registry.as_str()));
    let engine = ResolutionEngine::new(fetcher, registry, Arc::new(TracingReporter));

    let results = engine
        .resolve_many(packages.as_slice(), settings.fallback, settings.jobs)
        .await;

    let mut summary = Summary::default();
    for (name, result) in packages.iter().zip(results) {
        let outcome = match result {
            Ok(Some(found)) => store(&settings, &printer, name, &found),
            Ok(None) => PackageOutcome::NotFound,
            Err(err) => PackageOutcome::Failed {
                error: err.to_string(),
            },
        };
        printer.outcome(name, &outcome);
        summary.record(&outcome);
    }

    printer.summary(&summary);
    Ok(())
}

/// Write `found` for `name`, or announce it on a dry run.
///
/// A failed write only fails this package.
fn store(settings: &Settings, printer: &Printer, name: &str, found: &FetchResult) -> PackageOutcome {
    let target = output_path(settings, name);
    if settings.dry_run {
        printer.info(&format!(
            "[DRY RUN] Would write {name} to {}",
            target.display()
        ));
        return PackageOutcome::from_result(found);
    }

    match write_result(&target, found) {
        Ok(()) => {
            debug!("wrote {name} to {}", target.display());
            PackageOutcome::from_result(found)
        },
        Err(err) => {
            error!("{name}: {err:#}");
            PackageOutcome::Failed {
                error: format!("{err:#}"),
            }
        },
    }
}

/// Package names from the command line, or from the manifest when none were
/// given.
pub fn collect_packages(cli: &Cli) -> Result<Vec<String>> {
    if !cli.packages.is_empty() {
        return Ok(cli.packages.clone());
    }

    let parsed = parse_deps(&cli.deps);
    for unknown in &parsed.unknown {
        warn!("Unknown dependency type: {unknown}");
    }

    let manifest = load_manifest(&cli.package_path)?;
    let packages: Vec<String> = manifest.dependencies(&parsed.types).into_keys().collect();
    if packages.is_empty() {
        return Err(CliError::usage(anyhow!(
            "No packages to fetch: pass package names or add dependencies to {}",
            cli.package_path.display()
        ))
        .into());
    }
    Ok(packages)
}

fn load_manifest(path: &Path) -> Result<PackageManifest> {
    if !path.exists() {
        return Err(CliError::usage(anyhow!("package.json not found at {}", path.display())).into());
    }
    PackageManifest::load(path)
        .with_context(|| format!("Failed to read {}", path.display()))
        .map_err(|e| anyhow::Error::from(CliError::usage(e)))
}

/// Destination file for `name`.
pub fn output_path(settings: &Settings, name: &str) -> PathBuf {
    settings.output_dir.join(generate_filename(
        &settings.filename,
        name,
        &settings.extension,
        &settings.sanitizer,
    ))
}

fn write_result(target: &Path, result: &FetchResult) -> Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(target, result.content())
        .with_context(|| format!("Failed to write {}", target.display()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::error::exit_code_from_error;
    use clap::Parser;
    use llmsfetch_core::Config;
    use tempfile::TempDir;

    fn cli(args: &[String]) -> Cli {
        let mut argv = vec!["llmsfetch".to_string()];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_explicit_packages_skip_manifest() {
        let cli = cli(&["zod".into(), "-p".into(), "/definitely/missing.json".into()]);
        assert_eq!(collect_packages(&cli).unwrap(), vec!["zod"]);
    }

    #[test]
    fn test_manifest_dependencies_filtered() {
        let dir = TempDir::new().unwrap();
        let manifest = dir.path().join("package.json");
        fs::write(
            &manifest,
            r#"{"dependencies": {"zod": "^3"}, "devDependencies": {"typescript": "^5"}}"#,
        )
        .unwrap();
        let path = manifest.display().to_string();

        let dev = cli(&["-p".into(), path.clone(), "-d".into(), "dev".into()]);
        assert_eq!(collect_packages(&dev).unwrap(), vec!["typescript"]);

        let all = cli(&["-p".into(), path]);
        assert_eq!(collect_packages(&all).unwrap(), vec!["typescript", "zod"]);
    }

    #[test]
    fn test_missing_manifest_is_usage_error() {
        let cli = cli(&["-p".into(), "/definitely/missing.json".into()]);
        let err = collect_packages(&cli).unwrap_err();
        assert_eq!(exit_code_from_error(&err), 2);
        assert!(err.to_string().contains("package.json not found"));
    }

    #[test]
    fn test_empty_manifest_is_usage_error() {
        let dir = TempDir::new().unwrap();
        let manifest = dir.path().join("package.json");
        fs::write(&manifest, r#"{"name": "empty"}"#).unwrap();

        let cli = cli(&["-p".into(), manifest.display().to_string()]);
        let err = collect_packages(&cli).unwrap_err();
        assert_eq!(exit_code_from_error(&err), 2);
    }

    #[test]
    fn test_output_path_sanitizes_scoped_names() {
        let cli = cli(&["-o".into(), "out".into(), "-e".into(), ".md".into()]);
        let settings = Settings::from_parts(&cli, Config::default());
        assert_eq!(
            output_path(&settings, "@types/node"),
            PathBuf::from("out").join("types-node.md")
        );
    }

    #[test]
    fn test_store_turns_write_error_into_failed_outcome() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();

        let cli = cli(&["-o".into(), blocker.join("docs").display().to_string()]);
        let settings = Settings::from_parts(&cli, Config::default());
        let printer = Printer::new(settings.verbosity);
        let found = FetchResult::found("https://zod.dev/llms.txt", "# Zod");

        let outcome = store(&settings, &printer, "zod", &found);
        match outcome {
            PackageOutcome::Failed { error } => {
                assert!(error.contains("Failed to create directory"), "{error}");
            },
            other => panic!("expected a failed outcome, got {other:?}"),
        }
    }

    #[test]
    fn test_store_on_dry_run_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out");
        let cli = cli(&[
            "-o".into(),
            out.display().to_string(),
            "--dry-run".into(),
            "-q".into(),
        ]);
        let settings = Settings::from_parts(&cli, Config::default());
        let printer = Printer::new(settings.verbosity);
        let found = FetchResult::found("https://zod.dev/llms.txt", "# Zod");

        let outcome = store(&settings, &printer, "zod", &found);
        assert!(outcome.is_success());
        assert!(!out.exists());
    }

    #[test]
    fn test_write_result_creates_nested_directories() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("a").join("b").join("zod.txt");
        write_result(&target, &FetchResult::found("https://zod.dev/llms.txt", "# Zod")).unwrap();
        assert_eq!(fs::read_to_string(target).unwrap(), "# Zod");
    }
}
