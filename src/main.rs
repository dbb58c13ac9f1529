//! ghstat - Analyze GitHub Actions usage reports from billing CSV exports

use clap::Parser;
use ghstat::{
    cli::Cli,
    cost::derive_costs,
    error::Result,
    ingest::read_usage_report,
    output::get_formatter,
    report::Report,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging. The default is quiet; -v raises it to info.
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::new("ghstat=info")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // No input means no report; this is not an error for the CLI.
    let Some(path) = cli.report else {
        warn!("No usage report supplied; nothing to analyze");
        return Ok(());
    };

    info!("Analyzing usage report {}", path.display());

    let records = read_usage_report(&path)?;
    let costed = derive_costs(records, cli.negatives)?;
    let report = Report::build(&costed)?;

    let formatter = get_formatter(cli.json);
    println!("{}", formatter.format_report(&report));

    Ok(())
}
