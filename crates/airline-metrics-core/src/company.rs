//! Multi-year analysis of one airline.
//!
//! Runs both calculators over every fiscal year in a dataset. The prior year
//! for growth rates is always the record for `fiscal_year - 1`, regardless
//! of the order the upstream source supplied the records in.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Instant;
use tracing::warn;

use crate::airline::unit_economics::{
    calculate_airline_metrics, validate_metrics, AirlineMetrics, AirlineOperationalData,
};
use crate::config::AirlineMetricsConfig;
use crate::financial::metrics::{calculate_metrics, FinancialMetrics};
use crate::statements::YearlyFinancialData;
use crate::types::{with_metadata, ComputationOutput};
use crate::AirlineMetricsResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Raw records for one airline as supplied by the upstream data source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyDataset {
    pub ticker: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub financials: Vec<YearlyFinancialData>,
    #[serde(default)]
    pub operations: Vec<AirlineOperationalData>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearAnalysis {
    pub fiscal_year: i32,
    pub financial: FinancialMetrics,
    /// Present only when operational data exists for the year.
    pub airline: Option<AirlineMetrics>,
    pub valid: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyAnalysis {
    pub ticker: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Newest fiscal year first.
    pub years: Vec<YearAnalysis>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyAnalysisInput {
    pub dataset: CompanyDataset,
    #[serde(default)]
    pub config: AirlineMetricsConfig,
    /// Keep only the most recent N fiscal years.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years: Option<usize>,
}

impl CompanyDataset {
    /// Distinct fiscal years across both record lists, newest first.
    pub fn fiscal_years(&self) -> Vec<i32> {
        let years: BTreeSet<i32> = self
            .financials
            .iter()
            .map(|f| f.fiscal_year)
            .chain(self.operations.iter().map(|o| o.fiscal_year))
            .collect();
        years.into_iter().rev().collect()
    }

    /// A copy restricted to the `count` most recent fiscal years.
    pub fn most_recent(&self, count: usize) -> Self {
        let keep: BTreeSet<i32> = self.fiscal_years().into_iter().take(count).collect();
        Self {
            ticker: self.ticker.clone(),
            name: self.name.clone(),
            financials: self
                .financials
                .iter()
                .filter(|f| keep.contains(&f.fiscal_year))
                .cloned()
                .collect(),
            operations: self
                .operations
                .iter()
                .filter(|o| keep.contains(&o.fiscal_year))
                .cloned()
                .collect(),
        }
    }

    pub fn financials_for(&self, fiscal_year: i32) -> Option<&YearlyFinancialData> {
        self.financials.iter().find(|f| f.fiscal_year == fiscal_year)
    }

    pub fn operations_for(&self, fiscal_year: i32) -> Option<&AirlineOperationalData> {
        self.operations.iter().find(|o| o.fiscal_year == fiscal_year)
    }

    /// Fiscal years that appear more than once in either list.
    pub fn duplicate_years(&self) -> Vec<i32> {
        let mut seen_fin = BTreeSet::new();
        let mut seen_ops = BTreeSet::new();
        let mut dups = BTreeSet::new();
        for f in &self.financials {
            if !seen_fin.insert(f.fiscal_year) {
                dups.insert(f.fiscal_year);
            }
        }
        for o in &self.operations {
            if !seen_ops.insert(o.fiscal_year) {
                dups.insert(o.fiscal_year);
            }
        }
        dups.into_iter().collect()
    }
}

impl CompanyAnalysis {
    pub fn year(&self, fiscal_year: i32) -> Option<&YearAnalysis> {
        self.years.iter().find(|y| y.fiscal_year == fiscal_year)
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Analyse every fiscal year of one airline. Never fails.
pub fn analyze_company(
    dataset: &CompanyDataset,
    config: &AirlineMetricsConfig,
) -> CompanyAnalysis {
    for year in dataset.duplicate_years() {
        warn!(
            ticker = %dataset.ticker,
            fiscal_year = year,
            "duplicate fiscal year; first record used"
        );
    }

    let years = dataset
        .fiscal_years()
        .into_iter()
        .map(|fiscal_year| {
            let current = dataset.financials_for(fiscal_year);
            let prior = fiscal_year
                .checked_sub(1)
                .and_then(|y| dataset.financials_for(y));

            let financial = match current {
                Some(c) => calculate_metrics(c, prior),
                None => FinancialMetrics::default(),
            };

            let income = current.and_then(|c| c.income_statement.as_ref());
            let airline = dataset
                .operations_for(fiscal_year)
                .map(|ops| calculate_airline_metrics(ops, income, config));

            let valid = airline
                .as_ref()
                .map_or(true, |m| validate_metrics(m, config));

            YearAnalysis {
                fiscal_year,
                financial,
                airline,
                valid,
            }
        })
        .collect();

    CompanyAnalysis {
        ticker: dataset.ticker.clone(),
        name: dataset.name.clone(),
        years,
    }
}

/// Analyse a company wrapped in the standard output envelope.
pub fn analyze_company_report(
    input: &CompanyAnalysisInput,
) -> AirlineMetricsResult<ComputationOutput<CompanyAnalysis>> {
    let start = Instant::now();
    input.config.validate()?;

    let dataset = match input.years {
        Some(n) => input.dataset.most_recent(n),
        None => input.dataset.clone(),
    };

    let mut warnings = Vec::new();
    if dataset.financials.is_empty() && dataset.operations.is_empty() {
        warnings.push(format!("No records supplied for {}.", dataset.ticker));
    }
    for year in dataset.duplicate_years() {
        warnings.push(format!(
            "Fiscal year {year} appears more than once; the first record was used."
        ));
    }

    let analysis = analyze_company(&dataset, &input.config);
    warnings.extend(invalid_year_warnings(&analysis));

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "prior_year": "fiscal_year - 1",
        "fuel_cost_policy": input.config.fuel_cost_policy.to_string(),
        "break_even_threshold_pct": input.config.break_even_threshold.to_string(),
    });

    Ok(with_metadata(
        "Multi-year airline financial and unit-economics analysis",
        &assumptions,
        warnings,
        elapsed,
        analysis,
    ))
}

pub(crate) fn invalid_year_warnings(analysis: &CompanyAnalysis) -> Vec<String> {
    analysis
        .years
        .iter()
        .filter(|y| !y.valid)
        .map(|y| {
            format!(
                "{} FY{}: break-even load factor fails plausibility check.",
                analysis.ticker, y.fiscal_year
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
