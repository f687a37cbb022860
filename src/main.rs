//! trip-chain - annotate itinerary exports with each trip's origin and destination.

mod cli;

use std::fs::File;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trip_chain::anomaly::Severity;
use trip_chain::enrichment::{self, CUSTOMER_EMAIL_COLUMN, CustomerTable, SUMMARY_COLUMNS};
use trip_chain::table::{CsvColumns, TripTable, write_anomalies};

use crate::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(&cli)?;

    let columns = CsvColumns::default();
    let table = TripTable::from_path(&cli.input, &columns)
        .with_context(|| format!("failed to read {}", cli.input.display()))?;
    info!(rows = table.len(), input = %cli.input.display(), "Loaded itinerary");

    let annotated = table.reconstruct(&cli.reconstruct_options())?;
    for anomaly in &annotated.anomalies {
        match anomaly.severity {
            Severity::Error => error!("{}", anomaly),
            Severity::Warning => warn!("{}", anomaly),
        }
    }

    let mut table = annotated.table;
    if let Some(path) = &cli.customers {
        let customers = CustomerTable::from_path(path, CUSTOMER_EMAIL_COLUMN)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let matched = enrichment::enrich(&mut table, &customers, &cli.email_column)?;
        info!(customers = customers.len(), matched, "Enriched itinerary");

        if let Some(summary_path) = &cli.summary {
            let summaries = enrichment::customer_summary(&table, &cli.email_column, SUMMARY_COLUMNS)?;
            let file = File::create(summary_path)
                .with_context(|| format!("failed to create {}", summary_path.display()))?;
            enrichment::write_customer_summary(&summaries, SUMMARY_COLUMNS, &cli.email_column, file)?;
            info!(customers = summaries.len(), path = %summary_path.display(), "Customer summary written");
        }
    }

    table
        .to_path(&cli.output)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;
    info!(path = %cli.output.display(), "Processing complete");

    if let Some(path) = &cli.anomalies {
        let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
        write_anomalies(&annotated.anomalies, file)?;
    }

    let errors = annotated.anomalies.iter().filter(|a| a.is_error()).count();
    if cli.fail_on_error && errors > 0 {
        bail!("{} trip(s) could not be fully resolved", errors);
    }

    Ok(())
}

fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
    );
    let stderr = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    match &cli.log_file {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr)
                .with(tracing_subscriber::fmt::layer().with_writer(non_blocking).with_ansi(false))
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry().with(filter).with(stderr).init();
            Ok(None)
        }
    }
}
