use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stockpulse_core::analysis::Analyzer;

#[derive(Debug, Parser)]
#[command(name = "stockpulse_worker")]
struct Args {
    /// Ticker symbols to analyze (e.g. TCS.NS AAPL).
    #[arg(required = true)]
    stocks: Vec<String>,

    /// Prediction ledger file. Overrides PREDICTION_LEDGER_PATH.
    #[arg(long)]
    ledger_path: Option<PathBuf>,

    /// Pretty-print the JSON report.
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut settings = stockpulse_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    // Logs go to stderr so stdout carries only the report.
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();
    if let Some(path) = args.ledger_path {
        settings.ledger_path = path;
    }

    let analyzer = Analyzer::from_settings(&settings)?;
    let report = match analyzer.run(&args.stocks).await {
        Ok(report) => report,
        Err(err) => {
            sentry_anyhow::capture_anyhow(&err);
            tracing::error!(error = %err, "analysis run failed");
            return Err(err);
        }
    };

    tracing::info!(
        analyzed = report.stock_analysis.len(),
        graded = report.past_accuracy.len(),
        ledger = %settings.ledger_path.display(),
        "analysis run complete"
    );

    let out = if args.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    }
    .context("failed to serialize report")?;
    println!("{out}");

    Ok(())
}

fn init_sentry(settings: &stockpulse_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
