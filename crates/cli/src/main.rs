mod commands;
mod config;
mod input;

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use tl_core::Dialect;
use tracing_subscriber::EnvFilter;

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Temporal logic formula parser and translator.
#[derive(Parser)]
#[command(name = "tl", version, about = "Temporal logic formula parser and translator")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    /// TOML file with per-dialect profile overrides
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug events to stderr (-vv for trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Where formulas come from: one on the command line, or a file.
#[derive(Args, Debug, Clone)]
pub(crate) struct FormulaSource {
    /// Formula text (`-` reads formulas from stdin)
    #[arg(required_unless_present = "file")]
    formula: Option<String>,

    /// File with one formula per line (`-` for stdin)
    #[arg(short, long, conflicts_with = "formula")]
    file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse formulas and print the resolved tree
    Parse {
        #[command(flatten)]
        source: FormulaSource,
    },

    /// Translate formulas into a dialect
    Translate {
        /// Target dialect (ctl, arctl, its-ctl, its-ltl)
        #[arg(short, long)]
        dialect: Dialect,
        #[command(flatten)]
        source: FormulaSource,
    },

    /// Check that formulas are valid in a dialect without printing translations
    Check {
        /// Target dialect (ctl, arctl, its-ctl, its-ltl)
        #[arg(short, long)]
        dialect: Dialect,
        #[command(flatten)]
        source: FormulaSource,
    },

    /// List the dialects and their effective profiles
    Dialects,
}

fn main() {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let config = match config::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            report_error(&e.to_string(), cli.output, cli.quiet);
            process::exit(1);
        }
    };

    let ok = match cli.command {
        Commands::Parse { source } => commands::parse::cmd_parse(&source, cli.output, cli.quiet),
        Commands::Translate { dialect, source } => commands::translate::cmd_translate(
            &source,
            dialect,
            &config.profile(dialect),
            cli.output,
            cli.quiet,
        ),
        Commands::Check { dialect, source } => commands::translate::cmd_check(
            &source,
            dialect,
            &config.profile(dialect),
            cli.output,
            cli.quiet,
        ),
        Commands::Dialects => {
            commands::dialects::cmd_dialects(&config, cli.output);
            true
        }
    };
    if !ok {
        process::exit(1);
    }
}

/// Report an error message in the appropriate format.
pub(crate) fn report_error(msg: &str, output: OutputFormat, quiet: bool) {
    if quiet {
        return;
    }
    match output {
        OutputFormat::Text => eprintln!("{}", msg),
        OutputFormat::Json => {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        }
    }
}
