use clap::Args;
use serde_json::Value;

use airline_metrics_core::company::{self, CompanyAnalysisInput, CompanyDataset};
use airline_metrics_core::comparison::{self, ComparisonInput};
use airline_metrics_core::{AirlineMetricsConfig, AirlineMetricsError};

use crate::commands::config::ConfigArgs;
use crate::input;

/// Arguments for single-company analysis
#[derive(Args)]
pub struct AnalyzeArgs {
    /// Path to a company dataset (JSON/YAML); read from stdin when omitted
    #[arg(long)]
    pub input: Option<String>,

    /// Keep only the most recent N fiscal years
    #[arg(long)]
    pub years: Option<usize>,

    #[command(flatten)]
    pub policy: ConfigArgs,
}

/// Arguments for two-company comparison
#[derive(Args)]
pub struct CompareArgs {
    /// Path to the first company's dataset
    #[arg(long)]
    pub input: String,

    /// Path to the second company's dataset
    #[arg(long)]
    pub against: String,

    /// Keep only the most recent N fiscal years of each company
    #[arg(long)]
    pub years: Option<usize>,

    #[command(flatten)]
    pub policy: ConfigArgs,
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let dataset: CompanyDataset = if let Some(ref path) = args.input {
        input::file::read_structured(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err(AirlineMetricsError::InsufficientData(
            "a company dataset is required (--input or stdin)".into(),
        )
        .into());
    };

    let analysis_input = CompanyAnalysisInput {
        dataset,
        config: args.policy.resolve(AirlineMetricsConfig::default())?,
        years: args.years,
    };
    let result = company::analyze_company_report(&analysis_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let company_a: CompanyDataset = input::file::read_structured(&args.input)?;
    let company_b: CompanyDataset = input::file::read_structured(&args.against)?;
    tracing::info!(a = %company_a.ticker, b = %company_b.ticker, "comparing airlines");

    let comparison_input = ComparisonInput {
        company_a,
        company_b,
        config: args.policy.resolve(AirlineMetricsConfig::default())?,
        years: args.years,
    };
    let result = comparison::analyze_comparison(&comparison_input)?;
    Ok(serde_json::to_value(result)?)
}
