//! Implementation of the `hbs-i18n render` command.

use std::fs::read_to_string;
use std::path::{Path, PathBuf};

use handlebars::Handlebars;
use handlebars_i18n::{register_helpers, Environment};
use i18n_catalog::Catalog;
use miette::{miette, Report};
use serde_json::Value;

use crate::output::JsonDiagnostic;

/// Arguments for the render command.
#[derive(Debug, clap::Args)]
pub struct RenderArgs {
    /// Template file to render (.hbs)
    pub template: PathBuf,

    /// Resource directory laid out as `<dir>/<language>/<namespace>.json`
    #[arg(long)]
    pub locales: Option<PathBuf>,

    /// Active language
    #[arg(long, required = true)]
    pub lang: String,

    /// Fallback language for missing keys
    #[arg(long)]
    pub fallback: Option<String>,

    /// JSON file with the template data
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// JSON configuration table with extra resources and format presets
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Fail on missing template variables
    #[arg(long)]
    pub strict: bool,
}

/// Run the render command.
pub fn run_render(args: RenderArgs) -> miette::Result<i32> {
    let mut catalog = Catalog::builder()
        .language(args.lang.clone())
        .maybe_fallback_language(args.fallback.clone())
        .build();
    if let Some(locales) = &args.locales {
        let bundles = catalog
            .load_dir(locales)
            .map_err(|e| miette!("Failed to load resources from {}: {}", locales.display(), e))?;
        tracing::debug!(bundles, dir = %locales.display(), "loaded resources");
    }

    let env = Environment::new(catalog);
    if let Some(config) = &args.config {
        let table = read_json(config)?;
        env.try_configure(&[table])
            .map_err(|e| miette!("Invalid configuration in {}: {}", config.display(), e))?;
    }

    let data = match &args.data {
        Some(path) => read_json(path)?,
        None => Value::Object(Default::default()),
    };

    let template = read_to_string(&args.template).map_err(|e| {
        miette!("Cannot read template {}: {}", args.template.display(), e)
    })?;

    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(args.strict);
    register_helpers(&mut handlebars, &env.init());

    match handlebars.render_template(&template, &data) {
        Ok(output) => {
            print!("{}", output);
            Ok(exitcode::OK)
        }
        Err(e) => {
            eprintln!("Render error in {}: {}", args.template.display(), e);
            Ok(exitcode::DATAERR)
        }
    }
}

/// Read a JSON file, reporting syntax errors with the offending location.
fn read_json(path: &Path) -> miette::Result<Value> {
    let content = read_to_string(path)
        .map_err(|e| miette!("Cannot read {}: {}", path.display(), e))?;
    serde_json::from_str(&content).map_err(|e| {
        Report::from(JsonDiagnostic::at(
            path,
            &content,
            e.line(),
            e.column(),
            e.to_string(),
        ))
    })
}
