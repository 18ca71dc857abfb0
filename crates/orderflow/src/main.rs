use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use orderflow_core::{
    config::PipelineConfig,
    pipeline::{self, PipelineOutcome},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Regional sales order batch loader", long_about = None)]
struct Cli {
    /// TOML file with region_a_path, region_b_path, destination_target, destination_table_name
    #[arg(long)]
    config: Option<PathBuf>,
    /// Region A order CSV
    #[arg(long)]
    region_a: Option<PathBuf>,
    /// Region B order CSV
    #[arg(long)]
    region_b: Option<PathBuf>,
    /// SQLite connection URL for the destination
    #[arg(long)]
    database_url: Option<String>,
    /// Destination table, replaced on every run
    #[arg(long)]
    table: Option<String>,
    #[arg(long, value_enum, default_value_t = LogFormat::Json)]
    log_format: LogFormat,
    /// Skip printing the validation query results
    #[arg(long)]
    no_report: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormat {
    Json,
    Pretty,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let config = resolve_config(&cli)?;
    info!(
        region_a = %config.region_a_path.display(),
        region_b = %config.region_b_path.display(),
        table = %config.destination_table_name,
        "starting order pipeline"
    );

    let outcome = pipeline::run(&config)
        .await
        .context("order pipeline failed")?;

    for line in render_output(&outcome, cli.no_report)? {
        println!("{line}");
    }

    println!("Data processing completed successfully!");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let builder = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env());
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.pretty().init(),
    }
}

/// Lines printed to stdout ahead of the completion message. The run summary always
/// comes first; the validation tables follow unless `--no-report` was given.
fn render_output(outcome: &PipelineOutcome, no_report: bool) -> Result<Vec<String>> {
    let summary_json = serde_json::to_string_pretty(&outcome.summary)
        .context("failed to serialize run summary")?;
    info!(summary = %summary_json, "run summary");

    let mut lines = vec![summary_json];
    if !no_report {
        lines.extend(outcome.report.render().iter().map(|table| table.to_string()));
    }
    Ok(lines)
}

fn resolve_config(cli: &Cli) -> Result<PipelineConfig> {
    dotenvy::dotenv().ok();
    build_config(cli, |key| std::env::var(key).ok())
}

/// Defaults, then the TOML file, then environment variables, then explicit flags.
fn build_config<F>(cli: &Cli, env_lookup: F) -> Result<PipelineConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let base = match &cli.config {
        Some(path) => PipelineConfig::from_toml_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    let mut config = base.with_overrides_from(env_lookup);

    if let Some(path) = &cli.region_a {
        config.region_a_path = path.clone();
    }
    if let Some(path) = &cli.region_b {
        config.region_b_path = path.clone();
    }
    if let Some(url) = &cli.database_url {
        config.destination_target = url.clone();
    }
    if let Some(table) = &cli.table {
        config.destination_table_name = table.clone();
    }

    Ok(config)
}
