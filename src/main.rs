//! parfind - find one file by name with a fixed pool of parallel workers
//!
//! Entry point for the CLI application.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use parfind::{SearchOutcome, DEFAULT_WORKERS};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "parfind",
    version,
    about = "Find a file by name, searching subdirectories in parallel",
    after_help = "EXAMPLES:\n    \
        parfind config.toml\n    \
        parfind report.pdf ~/Documents -w 8\n    \
        parfind id_rsa / --errors -v"
)]
struct CliArgs {
    /// File name to search for, including its extension
    #[arg(value_name = "NAME")]
    name: String,

    /// Directory to search (defaults to the current directory)
    #[arg(value_name = "ROOT")]
    root: Option<PathBuf>,

    /// Number of worker threads
    #[arg(short, long, default_value_t = DEFAULT_WORKERS)]
    workers: usize,

    /// List directories that could not be read
    #[arg(long)]
    errors: bool,

    /// Verbose logging (per-worker progress)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<bool> {
    let args = CliArgs::parse();

    setup_logging(args.verbose);

    let root = match args.root {
        Some(root) => root,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    let outcome = parfind::search()
        .root(&root)
        .named(args.name.as_str())
        .workers(args.workers)
        .collect_errors(args.errors)
        .run()
        .with_context(|| format!("Search in '{}' failed", root.display()))?;

    print_outcome(&outcome, &args.name, &root, args.errors);

    Ok(outcome.found)
}

fn print_outcome(outcome: &SearchOutcome, name: &str, root: &Path, show_errors: bool) {
    match (outcome.path(), outcome.finder()) {
        (Some(path), Some(worker)) => {
            println!("FILE FOUND! {} by worker {}", path.display(), worker);
        }
        _ => println!("File '{}' not found in: {}", name, root.display()),
    }

    println!(
        "Searched {} directories and {} files with {} worker(s) in {:.3}s",
        outcome.stats.dirs,
        outcome.stats.files,
        outcome.stats.workers,
        outcome.stats.duration.as_secs_f64()
    );

    if show_errors {
        for err in &outcome.errors {
            match err.path() {
                Some(p) => eprintln!("Skipped: {} ({})", p.display(), err),
                None => eprintln!("Skipped: {}", err),
            }
        }
    }
}

fn setup_logging(verbose: bool) {
    let default = if verbose {
        "parfind=debug,warn"
    } else {
        "parfind=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(verbose)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}
