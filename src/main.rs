// src/main.rs
// =============================================================================
// This is the entry point of the md-lens CLI.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (tracing, to stderr)
// 3. Load + validate the config, apply command-line overrides
// 4. Load the markdown (local file or GitHub repository)
// 5. Analyze each document and print a report or JSON
// 6. Exit with proper code:
//      0 = no broken links
//      1 = broken links found
//      2 = error, or link checking interrupted before it finished
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{AnalysisOptions, Cli, Commands};
use futures::FutureExt;
use md_lens::report::{build_summary_with, render, AnalysisSummary};
use md_lens::{config, github, Config, Document, HttpProber};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.command.options().verbose);

    let exit_code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain on one line
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Logs go to stderr so `--json` output on stdout stays machine readable
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "md_lens=debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<i32> {
    let options = cli.command.options().clone();
    let config = load_config(&options)?;
    let deadline = parse_deadline(options.deadline)?;

    let (documents, as_list) = match cli.command {
        Commands::File { path, .. } => {
            let doc = Document::read(&path)?;
            (vec![doc], false)
        }
        Commands::Github { repo_url, file, .. } => {
            eprintln!("🔍 Scanning GitHub repository: {}", repo_url);
            let docs = github::fetch_repo_documents(&repo_url, &config, file.as_deref()).await?;
            (docs, true)
        }
    };

    if documents.is_empty() {
        eprintln!("⚠️  No markdown files found to analyze");
        return Ok(0);
    }

    let prober = HttpProber::new(&config).context("Failed to create HTTP client")?;

    // One signal for the whole run: Ctrl-C, or the --deadline timer
    let cancel = cancel_signal(deadline).shared();

    let mut summaries = Vec::new();
    for doc in &documents {
        if doc.is_blank() {
            eprintln!("⚠️  {} is empty. Nothing to analyze.", doc.name());
            continue;
        }

        eprintln!("📄 Analyzing {} ...", doc.name());
        let summary = build_summary_with(doc, &config, &prober, cancel.clone()).await;
        let interrupted = summary.cancelled;
        summaries.push(summary);

        if interrupted {
            tracing::warn!("link checking interrupted, remaining documents skipped");
            break;
        }
    }

    print_summaries(&summaries, options.json, as_list)?;
    Ok(exit_code(&summaries))
}

fn load_config(options: &AnalysisOptions) -> Result<Config> {
    let config = Config::load(options.config.as_deref())?;
    let config = options.apply(config);
    // Overrides are validated the same way as the file
    config.validate()?;
    Ok(config)
}

fn parse_deadline(deadline: Option<f64>) -> Result<Option<Duration>> {
    let deadline = deadline
        .map(|secs| config::seconds_to_duration("deadline", secs))
        .transpose()?;
    Ok(deadline)
}

// Completes on Ctrl-C, or when the deadline (if any) passes
async fn cancel_signal(deadline: Option<Duration>) {
    let ctrl_c = async {
        // If the handler cannot be installed we simply never cancel
        if tokio::signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    match deadline {
        Some(deadline) => {
            tokio::select! {
                _ = ctrl_c => {}
                _ = tokio::time::sleep(deadline) => {}
            }
        }
        None => ctrl_c.await,
    }
}

fn print_summaries(summaries: &[AnalysisSummary], json: bool, as_list: bool) -> Result<()> {
    if json {
        let output = match summaries {
            [single] if !as_list => serde_json::to_string_pretty(single)?,
            _ => serde_json::to_string_pretty(summaries)?,
        };
        println!("{}", output);
    } else {
        for summary in summaries {
            print!("{}", render(summary));
        }
    }
    Ok(())
}

fn exit_code(summaries: &[AnalysisSummary]) -> i32 {
    if summaries.iter().any(AnalysisSummary::has_broken) {
        1
    } else if summaries.iter().any(|s| s.cancelled) {
        2
    } else {
        0
    }
}
