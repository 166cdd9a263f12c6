//! Implementation of the `hbs-i18n check` command.

use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use i18n_catalog::{Catalog, LoadError};
use miette::{IntoDiagnostic, Report};
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::output::JsonDiagnostic;

/// Arguments for the check command.
#[derive(Debug, clap::Args)]
pub struct CheckArgs {
    /// Resource files to check (.json)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON output for one checked file.
#[derive(Debug, Serialize)]
struct FileReport {
    file: String,
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    keys: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Outcome of checking one file.
enum Outcome {
    Valid { keys: usize },
    Invalid(Report),
}

/// Run the check command.
pub fn run_check(args: CheckArgs) -> miette::Result<i32> {
    let mut reports = Vec::new();
    let mut failed = false;

    for path in &args.files {
        let outcome = check_file(path);
        let file = path.display().to_string();
        match outcome {
            Outcome::Valid { keys } => {
                if !args.json {
                    println!("{} {} ({} keys)", "ok".green(), file, keys);
                }
                reports.push(FileReport {
                    file,
                    ok: true,
                    keys: Some(keys),
                    error: None,
                });
            }
            Outcome::Invalid(report) => {
                failed = true;
                if !args.json {
                    eprintln!("{:?}", report);
                }
                reports.push(FileReport {
                    file,
                    ok: false,
                    keys: None,
                    error: Some(report.to_string()),
                });
            }
        }
    }

    if args.json {
        let output = serde_json::to_string_pretty(&reports).into_diagnostic()?;
        println!("{}", output);
    }

    Ok(if failed {
        exitcode::DATAERR
    } else {
        exitcode::OK
    })
}

fn check_file(path: &Path) -> Outcome {
    let content = match read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            return Outcome::Invalid(miette::miette!("cannot read {}: {}", path.display(), e));
        }
    };
    tracing::debug!(file = %path.display(), bytes = content.len(), "checking resource file");

    match Catalog::new().load_json_str("check", "check", &content) {
        Ok(keys) => Outcome::Valid { keys },
        Err(LoadError::Json {
            line,
            column,
            message,
            ..
        }) => Outcome::Invalid(
            JsonDiagnostic::at(path, &content, line, column, message)
                .with_help("resource files must be valid JSON objects")
                .into(),
        ),
        Err(LoadError::Bundle { source, .. }) => Outcome::Invalid(
            JsonDiagnostic::at(path, &content, 1, 1, source.to_string())
                .with_help("values must be strings, numbers, booleans or nested objects")
                .into(),
        ),
        Err(other) => Outcome::Invalid(Report::msg(other.to_string())),
    }
}
