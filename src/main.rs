use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::{Cell, Color, Table};
use configuration::{LoggingSettings, Settings};
use core_types::RiskLevel;
use engine::{recommendations, AnalysisRun, Pipeline};
use ingest::{Preprocessor, RawTable, RecordFilter};
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// The main entry point for the Sales Insight application.
fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = configuration::load_config(cli.config.as_deref())
        .context("Failed to load configuration")?;
    let _guard = init_logging(&settings.logging)?;

    match cli.command {
        Commands::Analyze(args) => handle_analyze(args, settings),
        Commands::Validate(args) => handle_validate(args),
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Sales analytics: trend, forecast, risk and anomalies from a sales CSV.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a TOML configuration file (defaults to ./config.toml if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full analysis pipeline over a sales CSV.
    Analyze(AnalyzeArgs),
    /// Check a sales CSV against the schema without analyzing it.
    Validate(ValidateArgs),
}

#[derive(Parser)]
struct AnalyzeArgs {
    /// The sales CSV to analyze.
    input: PathBuf,

    /// Seed for the forecast generator. Omit for a non-reproducible run.
    #[arg(long)]
    seed: Option<u64>,

    /// Override the configured forecast horizon, in months.
    #[arg(long)]
    horizon: Option<usize>,

    /// Only include these categories (repeatable).
    #[arg(long = "category")]
    categories: Vec<String>,

    /// Only include these regions (repeatable).
    #[arg(long = "region")]
    regions: Vec<String>,

    /// Write the result bundle as JSON to this file.
    #[arg(long)]
    json_out: Option<PathBuf>,

    /// Write monthly_sales.csv and anomalies.csv into this directory.
    #[arg(long)]
    export_dir: Option<PathBuf>,
}

#[derive(Parser)]
struct ValidateArgs {
    /// The sales CSV to validate.
    input: PathBuf,
}

// ==============================================================================
// Logging
// ==============================================================================

/// Installs the global subscriber. `RUST_LOG` takes precedence over the configured level.
///
/// When a log directory is configured, output goes to a daily-rotated file and the
/// returned guard must be held until exit so buffered lines are flushed.
fn init_logging(logging: &LoggingSettings) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .with_context(|| format!("Invalid log level '{}'", logging.level))?;

    match &logging.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "sales-insight.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
            Ok(Some(guard))
        }
        None => {
            let subscriber = FmtSubscriber::builder()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
            Ok(None)
        }
    }
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn read_table(input: &Path) -> Result<RawTable> {
    RawTable::from_path(input).with_context(|| format!("Failed to read {}", input.display()))
}

fn handle_analyze(args: AnalyzeArgs, mut settings: Settings) -> Result<()> {
    if let Some(horizon) = args.horizon {
        settings.policy.horizon_months = horizon;
    }

    let table = read_table(&args.input)?;
    let filter = RecordFilter::new(args.categories, args.regions);
    let pipeline = Pipeline::new(&settings.policy)?;

    tracing::info!(input = %args.input.display(), rows = table.len(), "Starting analysis.");
    let run = pipeline.run_table(&table, &filter, args.seed)?;

    print_report(&run);

    if let Some(path) = &args.json_out {
        export::write_json(path, &run.bundle)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("\nResult bundle written to {}", path.display());
    }
    if let Some(dir) = &args.export_dir {
        let paths = export::export_sheets(dir, &run)
            .with_context(|| format!("Failed to export into {}", dir.display()))?;
        for path in paths {
            println!("Sheet written to {}", path.display());
        }
    }

    Ok(())
}

fn handle_validate(args: ValidateArgs) -> Result<()> {
    let table = read_table(&args.input)?;
    let records = Preprocessor::new().process(&table)?;
    println!(
        "{}: {} rows, {} valid sales records.",
        args.input.display(),
        table.len(),
        records.len()
    );
    Ok(())
}

// ==============================================================================
// Report Rendering
// ==============================================================================

fn money(value: Decimal) -> String {
    format!("{:.2}", value)
}

fn optional(value: Option<Decimal>, suffix: &str) -> String {
    value.map_or_else(|| "-".to_string(), |v| format!("{:.2}{suffix}", v))
}

fn print_report(run: &AnalysisRun) {
    let bundle = &run.bundle;

    let risk_color = match run.risk.level {
        RiskLevel::Low => Color::Green,
        RiskLevel::Medium => Color::Yellow,
        RiskLevel::High => Color::Red,
    };

    let mut summary = Table::new();
    summary.set_header(vec!["Metric", "Value"]);
    summary.add_row(vec![Cell::new("Business Health"), Cell::new(bundle.business_health())]);
    summary.add_row(vec![Cell::new("Recommended Action"), Cell::new(bundle.action())]);
    summary.add_row(vec![Cell::new("Top Category"), Cell::new(bundle.top_category())]);
    summary.add_row(vec![
        Cell::new("Risk"),
        Cell::new(format!(
            "{} ({}/100, {})",
            run.risk.level,
            run.risk.score,
            run.risk.level.status()
        ))
        .fg(risk_color),
    ]);
    summary.add_row(vec![Cell::new("Forecast Outlook"), Cell::new(run.outlook)]);
    summary.add_row(vec![
        Cell::new("Latest MoM Growth"),
        Cell::new(optional(run.monthly.latest_growth_pct(), "%")),
    ]);
    summary.add_row(vec![
        Cell::new("Avg Monthly Revenue"),
        Cell::new(money(bundle.kpis().avg_monthly_revenue)),
    ]);
    summary.add_row(vec![Cell::new("Best Month"), Cell::new(bundle.kpis().best_month)]);
    summary.add_row(vec![Cell::new("Worst Month"), Cell::new(bundle.kpis().worst_month)]);
    summary.add_row(vec![
        Cell::new("Revenue Volatility"),
        Cell::new(optional(bundle.kpis().revenue_volatility, "")),
    ]);
    println!("{summary}");

    let mut monthly = Table::new();
    monthly.set_header(vec!["Month", "Revenue", "Growth %", "3M Moving Avg"]);
    for point in &run.monthly {
        monthly.add_row(vec![
            Cell::new(point.period),
            Cell::new(money(point.revenue)),
            Cell::new(optional(point.growth_pct, "")),
            Cell::new(optional(point.moving_avg, "")),
        ]);
    }
    println!("\nMonthly Sales\n{monthly}");

    let mut forecast = Table::new();
    forecast.set_header(vec!["Month", "Predicted", "Lower", "Upper"]);
    for point in &run.forecast {
        forecast.add_row(vec![
            Cell::new(point.period),
            Cell::new(money(point.predicted_revenue)),
            Cell::new(money(point.lower_bound)),
            Cell::new(money(point.upper_bound)),
        ]);
    }
    println!("\nForecast (illustrative)\n{forecast}");

    let mut categories = Table::new();
    categories.set_header(vec!["Category", "Revenue", "Share %"]);
    for entry in &run.category_shares.entries {
        categories.add_row(vec![
            Cell::new(&entry.label),
            Cell::new(money(entry.total_revenue)),
            Cell::new(money(entry.share_pct)),
        ]);
    }
    println!("\nCategory Ranking\n{categories}");

    let mut regions = Table::new();
    regions.set_header(vec!["Region", "Revenue", "Share %"]);
    for entry in &run.regions.entries {
        regions.add_row(vec![
            Cell::new(&entry.label),
            Cell::new(money(entry.total_revenue)),
            Cell::new(money(entry.share_pct)),
        ]);
    }
    println!("\nRevenue by Region\n{regions}");

    if bundle.anomalies().is_empty() {
        println!("\nNo anomalies detected.");
    } else {
        let mut anomalies = Table::new();
        anomalies.set_header(vec!["Month", "Revenue", "Type", "Z-Score"]);
        for anomaly in bundle.anomalies() {
            anomalies.add_row(vec![
                Cell::new(anomaly.period),
                Cell::new(money(anomaly.revenue)),
                Cell::new(anomaly.kind),
                Cell::new(money(anomaly.z_score)),
            ]);
        }
        println!("\nAnomalies\n{anomalies}");
    }

    println!("\nExecutive Summary\n{}", bundle.executive_commentary());

    println!("\nRecommendations");
    for recommendation in recommendations(bundle) {
        println!("  - {recommendation}");
    }
}
