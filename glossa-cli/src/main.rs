//! Glossa CLI - catalog tooling for the Glossa localization engine.
//!
//! # Commands
//!
//! - `glossa keys` - List the dotted keys each catalog defines
//! - `glossa check` - Verify every language defines the same keys and placeholders
//! - `glossa render <KEY> [ARGS]...` - Translate a key with string arguments
//!
//! The catalog directory comes from `--dir`, `GLOSSA_CATALOG_DIR`, or
//! defaults to `locales`.

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use glossa_i18n::TranslatorConfig;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod error;

use commands::{check, keys, render};
use error::CliResult;

/// Glossa - localization catalog tools
#[derive(Parser)]
#[command(name = "glossa")]
#[command(version)]
#[command(about = "Inspect, check and render Glossa translation catalogs")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory with one catalog file per language
    #[arg(short, long, global = true, env = "GLOSSA_CATALOG_DIR", default_value = "locales")]
    dir: PathBuf,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Enable debug diagnostics
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the dotted keys defined by the catalogs
    #[command(alias = "k")]
    Keys(KeysArgs),

    /// Check that all languages define the same keys and placeholders
    #[command(alias = "c")]
    Check(CheckArgs),

    /// Translate one key
    #[command(alias = "r")]
    Render(RenderArgs),
}

#[derive(Args)]
struct KeysArgs {
    /// Only list this language
    #[arg(short, long)]
    language: Option<String>,

    /// Print templates next to keys
    #[arg(long)]
    values: bool,
}

#[derive(Args)]
struct CheckArgs {
    /// Language whose placeholders the others must match
    #[arg(short, long)]
    reference: Option<String>,
}

#[derive(Args)]
struct RenderArgs {
    /// Dotted key, e.g. `user.greeting`
    key: String,

    /// Positional arguments for `{0}`, `{1}`, ...
    args: Vec<String>,

    /// Default language of the translator
    #[arg(long, env = "GLOSSA_DEFAULT_LANGUAGE", default_value = "en")]
    default_language: String,

    /// Language to render in
    #[arg(short, long, env = "GLOSSA_LANGUAGE")]
    language: Option<String>,

    /// Fail instead of printing an empty line when the key does not resolve
    #[arg(long)]
    strict: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }
    glossa_log::init();
    if cli.verbose {
        glossa_log::set_debug(true);
    }

    let mut stdout = io::stdout().lock();
    let result: CliResult<()> = match cli.command {
        Commands::Keys(args) => {
            keys::execute(&cli.dir, args.language.as_deref(), args.values, &mut stdout)
        }
        Commands::Check(args) => check::execute(&cli.dir, args.reference.as_deref(), &mut stdout),
        Commands::Render(args) => {
            let mut config = TranslatorConfig::new(&cli.dir, args.default_language);
            config.language = args.language;
            render::execute(&config, &args.key, &args.args, args.strict, &mut stdout)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}
