//! assignck - check assignment statements in a session script
//!
//! Usage: assignck [OPTIONS] <input>

use anyhow::{Context, bail};
use assign_checker::driver::{self, SessionConfig};
use assign_checker::DiagnosticReporter;
use clap::{Parser as ClapParser, ValueEnum};
use codespan_reporting::term::termcolor::ColorChoice;
use std::fs;
use std::path::PathBuf;
use std::process;

/// When to colour diagnostics
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Default)]
enum Color {
    /// Colour when stderr is a terminal
    #[default]
    Auto,
    /// Always colour
    Always,
    /// Never colour
    Never,
}

impl From<Color> for ColorChoice {
    fn from(color: Color) -> Self {
        match color {
            Color::Auto => ColorChoice::Auto,
            Color::Always => ColorChoice::Always,
            Color::Never => ColorChoice::Never,
        }
    }
}

#[derive(ClapParser, Debug)]
#[command(name = "assignck")]
#[command(version)]
#[command(about = "Type check assignment statements against declared variables", long_about = None)]
struct Args {
    /// Session script (declarations followed by assignments)
    #[arg(required = true)]
    input: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Dump tokens (for debugging)
    #[arg(long)]
    dump_tokens: bool,

    /// Dump AST (for debugging)
    #[arg(long)]
    dump_ast: bool,

    /// Diagnostic colouring
    #[arg(long, value_enum, default_value = "auto")]
    color: Color,
}

fn main() {
    let args = Args::parse();

    assign_checker::init_tracing(if args.verbose { "debug" } else { "warn" });

    if let Err(e) = run(&args) {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("cannot read {}", args.input.display()))?;
    let filename = args.input.display().to_string();

    let mut reporter = DiagnosticReporter::with_color(args.color.into());
    let file_id = reporter.add_file(&filename, &source);

    let config = SessionConfig {
        dump_tokens: args.dump_tokens,
        dump_ast: args.dump_ast,
        verbose: args.verbose,
    };

    if args.verbose {
        eprintln!("Checking {}", args.input.display());
    }

    let report = driver::check_source(&source, file_id, &reporter, &config)
        .with_context(|| format!("could not parse {}", filename))?;

    for outcome in report.accepted() {
        println!("{}", outcome);
    }

    if args.verbose {
        eprintln!(
            "{} symbol(s), {} assignment(s) accepted, {} error(s)",
            report.symbol_count(),
            report.accepted_count(),
            report.error_count()
        );
    }

    if report.has_errors() {
        bail!("{} error(s) in {}", report.error_count(), filename);
    }

    Ok(())
}
