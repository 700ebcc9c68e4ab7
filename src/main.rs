//! CLI entry point for the diet impact radar tool.
//!
//! Provides subcommands for rendering the interactive radar-chart page and for
//! exporting the normalized chart table on its own.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use diet_impact_radar::chart::{ChartMetadata, build_series};
use diet_impact_radar::render::{ChartPage, DEFAULT_PLOTLY_SRC, RenderOptions, render_html};
use diet_impact_radar::{
    dataset::load_respondents,
    output::{write_html, write_table_csv, write_table_json},
    pipeline::{self, ChartTable},
};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const DEFAULT_INPUT: &str = "Results_21MAR2022_nokcaladjust.csv";

#[derive(Parser)]
#[command(name = "diet_impact_radar")]
#[command(about = "Radar chart of the environmental impact of diet groups", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the interactive HTML radar chart
    Render {
        /// Results CSV (falls back to $DIET_RESULTS_CSV)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// HTML file to write
        #[arg(short, long, default_value = "environmental_impact.html")]
        output: PathBuf,

        /// Optional: also write the chart table as CSV
        #[arg(long)]
        export_table: Option<PathBuf>,

        /// Plotly bundle referenced by the page
        #[arg(long, default_value = DEFAULT_PLOTLY_SRC)]
        plotly_src: String,
    },
    /// Export the normalized chart table without rendering
    Table {
        /// Results CSV (falls back to $DIET_RESULTS_CSV)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// File to write the table to
        #[arg(short, long, default_value = "chart_table.csv")]
        output: PathBuf,

        /// Table format
        #[arg(short, long, value_enum, default_value_t = TableFormat::Csv)]
        format: TableFormat,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TableFormat {
    Csv,
    Json,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/diet_impact_radar.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("diet_impact_radar.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            input,
            output,
            export_table,
            plotly_src,
        } => {
            let input = resolve_input(input);
            render(&input, &output, export_table.as_deref(), plotly_src)?;
        }
        Commands::Table {
            input,
            output,
            format,
        } => {
            let input = resolve_input(input);
            let table = build_table(&input)?;
            match format {
                TableFormat::Csv => write_table_csv(&output, &table)?,
                TableFormat::Json => write_table_json(&output, &table)?,
            }
            info!(path = %output.display(), rows = table.len(), "Chart table exported");
        }
    }

    Ok(())
}

/// `--input`, then `$DIET_RESULTS_CSV`, then the default results file name.
fn resolve_input(input: Option<PathBuf>) -> PathBuf {
    input
        .or_else(|| std::env::var_os("DIET_RESULTS_CSV").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT))
}

/// Reads the results file and runs the aggregation pipeline.
#[tracing::instrument(skip_all, fields(input = %input.display()))]
fn build_table(input: &Path) -> Result<ChartTable> {
    let ingested = load_respondents(input)
        .with_context(|| format!("failed to read results from {}", input.display()))?;

    if ingested.respondents.is_empty() {
        warn!(
            rows_read = ingested.rows_read,
            "No respondents in tracked age bands"
        );
    }

    Ok(pipeline::run(&ingested.respondents))
}

/// Builds the chart table and writes the HTML page (and optionally the table).
#[tracing::instrument(skip_all, fields(input = %input.display(), output = %output.display()))]
fn render(
    input: &Path,
    output: &Path,
    export_table: Option<&Path>,
    plotly_src: String,
) -> Result<()> {
    let table = build_table(input)?;

    let metadata = ChartMetadata::from_table(&table);
    let set = build_series(&table, &metadata);
    if !set.incomplete.is_empty() {
        warn!(
            skipped = set.incomplete.len(),
            drawn = set.series.len(),
            "Some combinations lacked data and were left out"
        );
    }

    let page = ChartPage {
        metadata: &metadata,
        series: &set.series,
    };
    let html = render_html(&page, &RenderOptions { plotly_src })?;
    write_html(output, &html)?;

    if let Some(path) = export_table {
        write_table_csv(path, &table)?;
        info!(path = %path.display(), rows = table.len(), "Chart table exported");
    }

    info!(
        sex_options = metadata.sex_options.len(),
        age_options = metadata.age_options.len(),
        series = set.series.len(),
        "Interactive visualization created"
    );
    Ok(())
}
