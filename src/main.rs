//! CLI entry point for the bank review insights pipeline.
//!
//! Each stage reads the previous stage's CSV from the data directory, so the
//! stages can be run one at a time or all together with `run`.

use anyhow::Result;
use bank_review_insights::{
    analyzers::analyze,
    cleaner::clean,
    collector::collect,
    config::PipelineConfig,
    infra::googleplay::GooglePlayClient,
    stage::StageOutcome,
    visualizer::visualize,
};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    filter::LevelFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bank_review_insights")]
#[command(about = "Collect, clean, analyze and chart banking app reviews", long_about = None)]
struct Cli {
    /// Directory holding the raw, cleaned and analyzed CSVs
    #[arg(long, global = true, default_value = "data")]
    data_dir: PathBuf,

    /// Directory the charts are written to
    #[arg(long, global = true, default_value = ".")]
    chart_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch store reviews for every configured app
    Collect {
        /// Reviews to request per app
        #[arg(short, long)]
        count: Option<usize>,
    },
    /// Rename, deduplicate and normalize the raw reviews
    Clean,
    /// Score sentiment, lemmatize text and report pain points
    Analyze,
    /// Render charts from the analyzed reviews
    Visualize,
    /// Run every stage in order
    Run {
        /// Reviews to request per app
        #[arg(short, long)]
        count: Option<usize>,
    },
}

fn report(stage: &str, outcome: &StageOutcome) {
    match outcome {
        StageOutcome::Written { path, rows } => {
            info!(stage, rows, path = %path.display(), "Stage complete")
        }
        StageOutcome::Skipped { reason } => warn!(stage, "{}", reason),
    }
}

async fn run_collect(config: &PipelineConfig) -> Result<StageOutcome> {
    let client = GooglePlayClient::new()?;
    let outcome = collect(&client, config).await?;
    report("collect", &outcome);
    Ok(outcome)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bank_review_insights.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bank_review_insights.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("RUST_LOG")
                .from_env_lossy(),
        );

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::DEBUG.into())
                .with_env_var("RUST_LOG_JSON")
                .from_env_lossy(),
        );

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let config = PipelineConfig::default()
        .with_data_dir(&cli.data_dir)
        .with_chart_dir(&cli.chart_dir);

    match cli.command {
        Commands::Collect { count } => {
            let config = match count {
                Some(count) => config.with_target_count(count),
                None => config,
            };
            run_collect(&config).await?;
        }
        Commands::Clean => report("clean", &clean(&config)?),
        Commands::Analyze => report("analyze", &analyze(&config)?),
        Commands::Visualize => {
            let charts = visualize(&config)?;
            info!(charts = charts.len(), "Charts rendered");
        }
        Commands::Run { count } => {
            let config = match count {
                Some(count) => config.with_target_count(count),
                None => config,
            };
            // A skipped stage leaves the next one to report its missing input.
            run_collect(&config).await?;
            report("clean", &clean(&config)?);
            let analyzed = analyze(&config)?;
            report("analyze", &analyzed);
            if analyzed.is_written() {
                let charts = visualize(&config)?;
                info!(charts = charts.len(), "Charts rendered");
            }
        }
    }

    Ok(())
}
