// `vani bulk` - dial a list of numbers with live progress

use crate::input::NumberSource;
use crate::output::{print_analysis, print_report, progress_line};
use anyhow::{bail, Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use vani_core::application::bulk::constants::{DEFAULT_CONCURRENCY, FAILURES_CSV_FILE_NAME};
use vani_core::application::bulk::NO_VALID_NUMBERS_MESSAGE;
use vani_core::application::{cancel_channel, BulkDialer, BulkRequest, RunReport};
use vani_core::domain::{analyze_numbers, RunOutcome};
use vani_core::port::id_provider::UuidProvider;
use vani_core::port::time_provider::SystemTimeProvider;
use vani_core::port::CallGateway;

#[derive(Args, Clone, Debug)]
pub struct BulkArgs {
    #[command(flatten)]
    pub source: NumberSource,

    /// Agent ID ("default" lets the server choose)
    #[arg(short, long)]
    pub agent: Option<String>,

    /// Parallel calls (1-10)
    #[arg(short, long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Where to write the failed numbers CSV
    #[arg(long, default_value = FAILURES_CSV_FILE_NAME)]
    pub failures_out: PathBuf,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(gateway: Arc<dyn CallGateway>, args: BulkArgs) -> Result<()> {
    let analysis = analyze_numbers(&args.source.read()?);
    if !args.json {
        print_analysis(&analysis);
        println!();
    }
    if !analysis.is_dispatchable() {
        bail!(NO_VALID_NUMBERS_MESSAGE);
    }

    let dialer = BulkDialer::new(
        gateway,
        Arc::new(UuidProvider),
        Arc::new(SystemTimeProvider),
    );
    let request = BulkRequest::new(analysis.valid)
        .with_concurrency(args.concurrency)
        .with_agent(args.agent.as_deref());

    let (cancel_handle, cancel_token) = cancel_channel();
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!();
            eprintln!(
                "{}",
                "Cancelling: no new calls will be placed, in-flight calls are discarded".yellow()
            );
            cancel_handle.cancel();
        }
    });

    let mut progress_rx = dialer.subscribe_progress();
    let show_progress = !args.json;
    let progress = tokio::spawn(async move {
        while progress_rx.changed().await.is_ok() {
            let snapshot = *progress_rx.borrow_and_update();
            if show_progress && snapshot.total > 0 {
                eprint!("\r{}", progress_line(&snapshot));
            }
        }
    });

    let result = dialer.run(request, cancel_token).await;
    progress.abort();
    ctrl_c.abort();
    if show_progress {
        eprintln!();
    }
    let report = result?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
        println!();
    }

    export_failures(&report, &args.failures_out, args.json)?;

    if report.outcome == RunOutcome::Cancelled && !args.json {
        println!("{}", "Run cancelled".yellow().bold());
    } else if !args.json {
        println!("{}", "✓ Bulk run completed".green().bold());
    }
    Ok(())
}

fn export_failures(report: &RunReport, path: &Path, quiet: bool) -> Result<()> {
    match report.failures_csv() {
        Some(csv) => {
            std::fs::write(path, csv)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), failed = report.progress.failed, "Failures exported");
            if !quiet {
                println!("  {} {}", "Failures exported to".bold(), path.display());
            }
        }
        None => {
            if !quiet {
                println!("  No failures to export");
            }
        }
    }
    Ok(())
}
