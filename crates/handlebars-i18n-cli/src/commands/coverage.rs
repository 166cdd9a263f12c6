//! Coverage command implementation.

use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::Args;
use i18n_catalog::Catalog;
use miette::{miette, IntoDiagnostic, Result};
use serde::Serialize;

use crate::output::table::{format_coverage_table, LanguageCoverage};

/// CLDR plural suffixes, folded away so languages with different plural
/// rules compare equal.
const PLURAL_SUFFIXES: [&str; 6] = ["_zero", "_one", "_two", "_few", "_many", "_other"];

/// Arguments for the coverage command.
#[derive(Debug, Args)]
pub struct CoverageArgs {
    /// Resource directory laid out as `<dir>/<language>/<namespace>.json`.
    #[arg(long)]
    pub locales: PathBuf,

    /// Source language every other language is compared against.
    #[arg(long)]
    pub source: String,

    /// Languages to check coverage for (comma-separated).
    #[arg(long, value_delimiter = ',', required = true)]
    pub lang: Vec<String>,

    /// Exit with non-zero code if any translation is incomplete.
    #[arg(long)]
    pub strict: bool,

    /// Output results as JSON.
    #[arg(long)]
    pub json: bool,
}

/// JSON output format for coverage data.
#[derive(Debug, Serialize)]
struct CoverageJson {
    language: String,
    translated: usize,
    total: usize,
    missing: Vec<String>,
    extra: Vec<String>,
}

/// Run the coverage command.
pub fn run_coverage(args: CoverageArgs) -> Result<i32> {
    let mut catalog = Catalog::new();
    catalog
        .load_dir(&args.locales)
        .map_err(|e| miette!("Failed to load resources from {}: {}", args.locales.display(), e))?;

    let source_keys = language_keys(&catalog, &args.source);
    if source_keys.is_empty() {
        return Err(miette!(
            "No resources found for source language '{}' in {}",
            args.source,
            args.locales.display()
        ));
    }
    let source_count = source_keys.len();

    let coverage_data: Vec<LanguageCoverage> = args
        .lang
        .iter()
        .map(|lang| {
            let keys = language_keys(&catalog, lang);
            tracing::debug!(language = lang.as_str(), keys = keys.len(), "collected keys");
            LanguageCoverage {
                language: lang.clone(),
                translated: source_keys.intersection(&keys).count(),
                missing: source_keys.difference(&keys).cloned().collect(),
                extra: keys.difference(&source_keys).cloned().collect(),
            }
        })
        .collect();

    let any_incomplete = coverage_data.iter().any(|c| !c.missing.is_empty());

    if args.json {
        let json_data: Vec<CoverageJson> = coverage_data
            .iter()
            .map(|c| CoverageJson {
                language: c.language.clone(),
                translated: c.translated,
                total: source_count,
                missing: c.missing.clone(),
                extra: c.extra.clone(),
            })
            .collect();

        let json_output = serde_json::to_string_pretty(&json_data).into_diagnostic()?;
        println!("{}", json_output);
    } else {
        let table = format_coverage_table(source_count, &coverage_data);
        println!("{}", table);

        for lang_coverage in &coverage_data {
            if !lang_coverage.missing.is_empty() {
                println!("\nMissing in {}:", lang_coverage.language);
                for key in &lang_coverage.missing {
                    println!("  - {}", key);
                }
            }
        }
    }

    if args.strict && any_incomplete {
        Ok(exitcode::DATAERR)
    } else {
        Ok(exitcode::OK)
    }
}

/// Every key of a language as `namespace:key`, with plural suffixes folded.
fn language_keys(catalog: &Catalog, language: &str) -> BTreeSet<String> {
    catalog
        .namespaces(language)
        .into_iter()
        .flat_map(|namespace| {
            catalog
                .keys(language, namespace)
                .into_iter()
                .map(move |key| format!("{}:{}", namespace, fold_plural(&key)))
        })
        .collect()
}

fn fold_plural(key: &str) -> &str {
    PLURAL_SUFFIXES
        .iter()
        .find_map(|suffix| key.strip_suffix(suffix))
        .filter(|base| !base.is_empty())
        .unwrap_or(key)
}
