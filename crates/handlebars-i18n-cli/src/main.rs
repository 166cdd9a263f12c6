//! `hbs-i18n` entry point.
//!
//! Command-line tools for localized Handlebars templates:
//! - `hbs-i18n render` - Render a template with translation helpers
//! - `hbs-i18n check` - Validate JSON resource files
//! - `hbs-i18n coverage` - Compare translation coverage across languages

mod commands;
mod output;

use std::io::stderr;
use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{run_check, run_coverage, run_render, CheckArgs, CoverageArgs, RenderArgs};
use tracing_subscriber::EnvFilter;

/// Localized Handlebars template tools.
#[derive(Debug, Parser)]
#[command(name = "hbs-i18n")]
#[command(about = "Localized Handlebars template tools", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Color output control
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true)]
    pub color: ColorWhen,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// When to use colored output.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render a Handlebars template with the i18n helpers
    Render(RenderArgs),
    /// Check JSON resource files
    Check(CheckArgs),
    /// Report translation coverage across languages
    Coverage(CoverageArgs),
}

impl ColorWhen {
    /// Apply the preference to owo-colors. `Auto` leaves detection of TTY,
    /// `NO_COLOR` and `FORCE_COLOR` to owo-colors.
    fn apply(self) {
        match self {
            ColorWhen::Auto => {}
            ColorWhen::Always => owo_colors::set_override(true),
            ColorWhen::Never => owo_colors::set_override(false),
        }
    }
}

impl Commands {
    /// Run the command, returning a process exit code.
    fn run(self) -> miette::Result<i32> {
        match self {
            Commands::Render(args) => run_render(args),
            Commands::Check(args) => run_check(args),
            Commands::Coverage(args) => run_coverage(args),
        }
    }
}

/// Log to stderr. `RUST_LOG` overrides the level chosen by `--verbose`.
fn setup_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(stderr)
        .with_target(false)
        .init();
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    cli.color.apply();
    setup_tracing(cli.verbose);

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))?;

    let code = cli.command.run().unwrap_or_else(|report| {
        eprintln!("{:?}", report);
        exitcode::SOFTWARE
    });
    exit(code)
}
