mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::analysis::{RequestArgs, TrendArgs};
use commands::forecast::ForecastArgs;
use commands::report::ReportArgs;
use commands::valuation::ValuationArgs;

/// Small-business financial health, forecasting and valuation
#[derive(Parser)]
#[command(
    name = "bizlens",
    version,
    about = "Small-business financial health, forecasting and valuation",
    long_about = "Estimates a financial statement from a business profile and runs ratio, \
                  trend, health, cash-flow, forecast, valuation and data-quality analysis \
                  with decimal precision. Input is an analysis request read from --input \
                  or piped on stdin."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// JSON or YAML file overriding estimation constants
    #[arg(long, global = true)]
    constants: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate a financial statement from the profile
    Statement(RequestArgs),
    /// Calculate financial ratios for the current statement
    Ratios(RequestArgs),
    /// Analyse the trend of one metric (or the standard set) across history
    Trend(TrendArgs),
    /// Score financial health
    Health(RequestArgs),
    /// Analyse cash flow
    CashFlow(RequestArgs),
    /// Project revenue, profit and cash flow
    Forecast(ForecastArgs),
    /// Estimate business value
    Valuation(ValuationArgs),
    /// Check the profile for outliers, inconsistencies and gaps
    Quality(RequestArgs),
    /// Run the full analysis pipeline
    Report(ReportArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let constants = match input::file::read_constants(cli.constants.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Statement(args) => commands::analysis::run_statement(args, constants),
        Commands::Ratios(args) => commands::analysis::run_ratios(args, constants),
        Commands::Trend(args) => commands::analysis::run_trend(args, constants),
        Commands::Health(args) => commands::analysis::run_health(args, constants),
        Commands::CashFlow(args) => commands::analysis::run_cash_flow(args, constants),
        Commands::Forecast(args) => commands::forecast::run_forecast(args, constants),
        Commands::Valuation(args) => commands::valuation::run_valuation(args, constants),
        Commands::Quality(args) => commands::analysis::run_quality(args, constants),
        Commands::Report(args) => commands::report::run_report(args, constants),
        Commands::Version => {
            println!("bizlens {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
