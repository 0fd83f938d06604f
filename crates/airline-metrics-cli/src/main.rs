mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::airline::AirlineArgs;
use commands::company::{AnalyzeArgs, CompareArgs};
use commands::financial::FinancialArgs;

/// Airline financial and unit-economics metrics
#[derive(Parser)]
#[command(
    name = "airm",
    version,
    about = "Airline financial and unit-economics metrics",
    long_about = "A CLI for deriving airline financial ratios and unit economics \
                  (load factor, RASM, CASM, break-even load factor) from filing data \
                  with decimal precision, and for comparing two airlines side by side."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log calculation detail to stderr (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate margins, liquidity, returns and growth from one fiscal year
    FinancialMetrics(FinancialArgs),
    /// Calculate load factor, RASM, CASM and break-even load factor
    AirlineMetrics(AirlineArgs),
    /// Analyse every fiscal year of one airline dataset
    Analyze(AnalyzeArgs),
    /// Compare two airline datasets year by year
    Compare(CompareArgs),
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

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::FinancialMetrics(args) => commands::financial::run_financial_metrics(args),
        Commands::AirlineMetrics(args) => commands::airline::run_airline_metrics(args),
        Commands::Analyze(args) => commands::company::run_analyze(args),
        Commands::Compare(args) => commands::company::run_compare(args),
        Commands::Version => {
            println!("airm {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
