use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::env;
use std::path::PathBuf;
use std::process;

mod config;
mod models;
mod thread_filter;

use config::AppConfig;

/// Approved Threads - Keep the unresolved PR review threads a reviewer has approved with a reaction
#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    /// Raw GraphQL response from `gh api graphql` containing reviewThreads
    json_file_path: PathBuf,

    /// GitHub login whose reactions count as approval
    github_username: String,

    /// Where to write the approved threads as JSON
    output_file_path: PathBuf,

    /// Path to an optional config file
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[clap(short, long)]
    verbose: bool,
}

fn setup_logging(verbose: bool) {
    let mut log_builder = env_logger::builder();
    if verbose {
        log_builder.filter(None, log::LevelFilter::Debug);
    } else {
        // Only set default of info if not configured via env already
        if env::var("RUST_LOG").is_err() {
            log_builder.filter(None, log::LevelFilter::Info);
        }
        log_builder.format_timestamp(None);
    }
    log_builder.init();
}

fn parse_args() -> Args {
    match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            // --help and --version go to stdout and succeed; real usage errors exit 1
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            process::exit(code);
        }
    }
}

fn main() -> Result<()> {
    // Pick up RUST_LOG and config variables from a local .env
    dotenv::dotenv().ok();

    let args = parse_args();
    setup_logging(args.verbose);

    let config = AppConfig::load(args.config.as_deref())
        .context("Failed to load configuration")?;

    info!("Reviewer: {}", args.github_username);
    info!("Approval reaction: {}", config.approval_reaction);

    let count = thread_filter::run(
        &args.json_file_path,
        &args.github_username,
        &args.output_file_path,
        &config.approval_reaction,
    )?;

    println!(
        "Wrote {} approved threads to {}",
        count,
        args.output_file_path.display()
    );

    Ok(())
}
