//! Side-by-side comparison of two analysed airlines.
//!
//! Years are paired by fiscal year. Every metric carries both values, the
//! signed delta `a − b` and the percent difference relative to `|b|`. A
//! metric absent on either side has no delta.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Instant;

use crate::airline::unit_economics::AirlineMetrics;
use crate::company::{
    analyze_company, invalid_year_warnings, CompanyAnalysis, CompanyDataset, YearAnalysis,
};
use crate::config::AirlineMetricsConfig;
use crate::financial::metrics::FinancialMetrics;
use crate::numeric::{difference, percent_difference};
use crate::types::{with_metadata, ComputationOutput};
use crate::AirlineMetricsResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricComparison {
    pub metric: String,
    pub value_a: Option<Decimal>,
    pub value_b: Option<Decimal>,
    /// value_a - value_b
    pub delta: Option<Decimal>,
    /// delta / |value_b| × 100
    pub percent_difference: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearComparison {
    pub fiscal_year: i32,
    /// `None` when the company has no record for the year.
    pub valid_a: Option<bool>,
    pub valid_b: Option<bool>,
    pub metrics: Vec<MetricComparison>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub company_a: String,
    pub company_b: String,
    /// Newest fiscal year first.
    pub years: Vec<YearComparison>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonInput {
    pub company_a: CompanyDataset,
    pub company_b: CompanyDataset,
    #[serde(default)]
    pub config: AirlineMetricsConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years: Option<usize>,
}

impl ComparisonReport {
    pub fn metric(&self, fiscal_year: i32, name: &str) -> Option<&MetricComparison> {
        self.years
            .iter()
            .find(|y| y.fiscal_year == fiscal_year)?
            .metrics
            .iter()
            .find(|m| m.metric == name)
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Pair every metric of `a` with the same metric of `b`. Never fails.
pub fn compare_companies(a: &CompanyAnalysis, b: &CompanyAnalysis) -> ComparisonReport {
    let fiscal_years: BTreeSet<i32> = a
        .years
        .iter()
        .chain(b.years.iter())
        .map(|y| y.fiscal_year)
        .collect();

    let years = fiscal_years
        .into_iter()
        .rev()
        .map(|fiscal_year| {
            let year_a = a.year(fiscal_year);
            let year_b = b.year(fiscal_year);
            let metrics = metric_values(year_a)
                .into_iter()
                .zip(metric_values(year_b))
                .map(|((metric, value_a), (_, value_b))| MetricComparison {
                    metric: metric.to_string(),
                    value_a,
                    value_b,
                    delta: difference(value_a, value_b),
                    percent_difference: percent_difference(value_a, value_b),
                })
                .collect();

            YearComparison {
                fiscal_year,
                valid_a: year_a.map(|y| y.valid),
                valid_b: year_b.map(|y| y.valid),
                metrics,
            }
        })
        .collect();

    ComparisonReport {
        company_a: a.ticker.clone(),
        company_b: b.ticker.clone(),
        years,
    }
}

/// Analyse both datasets and compare them, wrapped in the standard envelope.
pub fn analyze_comparison(
    input: &ComparisonInput,
) -> AirlineMetricsResult<ComputationOutput<ComparisonReport>> {
    let start = Instant::now();
    input.config.validate()?;

    let restrict = |ds: &CompanyDataset| match input.years {
        Some(n) => ds.most_recent(n),
        None => ds.clone(),
    };
    let analysis_a = analyze_company(&restrict(&input.company_a), &input.config);
    let analysis_b = analyze_company(&restrict(&input.company_b), &input.config);

    let mut warnings = invalid_year_warnings(&analysis_a);
    warnings.extend(invalid_year_warnings(&analysis_b));

    let report = compare_companies(&analysis_a, &analysis_b);
    for year in &report.years {
        if year.valid_a.is_none() || year.valid_b.is_none() {
            warnings.push(format!(
                "FY{} is only reported by one company; its deltas are absent.",
                year.fiscal_year
            ));
        }
    }

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "delta": "company_a - company_b",
        "percent_difference": "delta / |company_b| * 100",
        "pairing": "by fiscal year",
    });

    Ok(with_metadata(
        "Comparative airline analysis",
        &assumptions,
        warnings,
        elapsed,
        report,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// The full, fixed-order metric list for one year; all absent when the
/// company has no record for it.
fn metric_values(year: Option<&YearAnalysis>) -> Vec<(&'static str, Option<Decimal>)> {
    let empty_fin = FinancialMetrics::default();
    let empty_air = AirlineMetrics::default();
    let financial = year.map_or(&empty_fin, |y| &y.financial);
    let airline = year.and_then(|y| y.airline.as_ref()).unwrap_or(&empty_air);

    financial
        .named_values()
        .into_iter()
        .chain(airline.named_values())
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn analysis(ticker: &str, years: Vec<(i32, Option<Decimal>)>) -> CompanyAnalysis {
        CompanyAnalysis {
            ticker: ticker.into(),
            name: None,
            years: years
                .into_iter()
                .map(|(fiscal_year, margin)| YearAnalysis {
                    fiscal_year,
                    financial: FinancialMetrics {
                        operating_margin: margin,
                        ..Default::default()
                    },
                    airline: None,
                    valid: true,
                })
                .collect(),
        }
    }

    #[test]
    fn test_delta_and_percent_difference() {
        let a = analysis("DAL", vec![(2023, Some(dec!(12)))]);
        let b = analysis("UAL", vec![(2023, Some(dec!(10)))]);
        let report = compare_companies(&a, &b);
        let m = report.metric(2023, "operating_margin").unwrap();
        assert_eq!(m.delta, Some(dec!(2)));
        assert_eq!(m.percent_difference, Some(dec!(20)));
    }

    #[test]
    fn test_absent_side_yields_absent_delta() {
        let a = analysis("DAL", vec![(2023, Some(dec!(12)))]);
        let b = analysis("UAL", vec![(2023, None)]);
        let m = compare_companies(&a, &b)
            .metric(2023, "operating_margin")
            .cloned()
            .unwrap();
        assert_eq!(m.value_a, Some(dec!(12)));
        assert_eq!(m.delta, None);
        assert_eq!(m.percent_difference, None);
    }

    #[test]
    fn test_zero_base_has_delta_but_no_percent() {
        let a = analysis("DAL", vec![(2023, Some(dec!(3)))]);
        let b = analysis("UAL", vec![(2023, Some(Decimal::ZERO))]);
        let m = compare_companies(&a, &b)
            .metric(2023, "operating_margin")
            .cloned()
            .unwrap();
        assert_eq!(m.delta, Some(dec!(3)));
        assert_eq!(m.percent_difference, None);
    }

    #[test]
    fn test_years_are_unioned() {
        let a = analysis("DAL", vec![(2023, Some(dec!(12))), (2022, Some(dec!(8)))]);
        let b = analysis("UAL", vec![(2023, Some(dec!(10)))]);
        let report = compare_companies(&a, &b);
        let years: Vec<i32> = report.years.iter().map(|y| y.fiscal_year).collect();
        assert_eq!(years, vec![2023, 2022]);
        assert_eq!(report.years[1].valid_b, None);
        assert_eq!(report.metric(2022, "operating_margin").unwrap().delta, None);
    }

    #[test]
    fn test_swapping_negates_delta() {
        let a = analysis("DAL", vec![(2023, Some(dec!(12)))]);
        let b = analysis("UAL", vec![(2023, Some(dec!(10)))]);
        let ab = compare_companies(&a, &b);
        let ba = compare_companies(&b, &a);
        assert_eq!(ba.company_a, "UAL");
        let d_ab = ab.metric(2023, "operating_margin").unwrap().delta.unwrap();
        let d_ba = ba.metric(2023, "operating_margin").unwrap().delta.unwrap();
        assert_eq!(d_ab, -d_ba);
    }

    #[test]
    fn test_every_metric_listed() {
        let a = analysis("DAL", vec![(2023, None)]);
        let b = analysis("UAL", vec![(2023, None)]);
        let report = compare_companies(&a, &b);
        assert_eq!(report.years[0].metrics.len(), 17);
        assert!(report.metric(2023, "break_even_load_factor").is_some());
    }
}
