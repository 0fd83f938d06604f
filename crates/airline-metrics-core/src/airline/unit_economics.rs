//! Airline unit economics: load factor, RASM, CASM, CASM-ex-fuel,
//! break-even load factor and passenger yield.
//!
//! Mile quantities are converted to absolute miles through their unit tag
//! before any currency division, so every per-mile figure is in cents.
//! The raw operational record is never modified; derived values are returned
//! as a separate [`AirlineMetrics`].

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, warn};

use crate::config::{AirlineMetricsConfig, FuelCostPolicy};
use crate::numeric::{difference, percent, ratio};
use crate::statements::IncomeStatement;
use crate::types::*;
use crate::AirlineMetricsResult;

const CENTS_PER_DOLLAR: Decimal = dec!(100);

/// Break-even load factors above this still validate but mean the airline
/// did not cover its costs at full capacity.
const COST_COVERAGE_LINE: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AirlineOperationalData {
    pub fiscal_year: i32,
    #[serde(default)]
    pub available_seat_miles: Option<SeatMiles>,
    #[serde(default)]
    pub revenue_passenger_miles: Option<SeatMiles>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AirlineMetrics {
    /// RPM / ASM
    pub passenger_load_factor: Option<Percent>,
    /// Revenue per available seat mile
    pub rasm: Option<Cents>,
    /// Cost per available seat mile
    pub casm: Option<Cents>,
    pub casm_ex_fuel: Option<Cents>,
    /// CASM / RASM
    pub break_even_load_factor: Option<Percent>,
    /// Revenue per revenue passenger mile
    pub passenger_yield: Option<Cents>,
}

impl AirlineMetrics {
    /// Field names paired with their values, in declaration order.
    pub fn named_values(&self) -> [(&'static str, Option<Decimal>); 6] {
        [
            ("passenger_load_factor", self.passenger_load_factor),
            ("rasm", self.rasm),
            ("casm", self.casm),
            ("casm_ex_fuel", self.casm_ex_fuel),
            ("break_even_load_factor", self.break_even_load_factor),
            ("passenger_yield", self.passenger_yield),
        ]
    }

    pub fn absent_fields(&self) -> Vec<&'static str> {
        self.named_values()
            .into_iter()
            .filter(|(_, v)| v.is_none())
            .map(|(name, _)| name)
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirlineMetricsInput {
    pub operational: AirlineOperationalData,
    #[serde(default)]
    pub income_statement: Option<IncomeStatement>,
    #[serde(default)]
    pub config: AirlineMetricsConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirlineMetricsReport {
    pub fiscal_year: i32,
    pub metrics: AirlineMetrics,
    pub valid: bool,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Derive unit economics from operational data and the same year's income
/// statement. Fields whose inputs are missing are left absent.
pub fn calculate_airline_metrics(
    operational: &AirlineOperationalData,
    income: Option<&IncomeStatement>,
    config: &AirlineMetricsConfig,
) -> AirlineMetrics {
    let asm = operational.available_seat_miles.and_then(|m| m.to_miles());
    let rpm = operational.revenue_passenger_miles.and_then(|m| m.to_miles());

    let revenue = income.and_then(|i| i.total_revenue);
    let operating_expenses = income.and_then(|i| i.operating_expenses);
    let reported_fuel = income.and_then(|i| i.fuel_costs);
    let fuel_costs = match config.fuel_cost_policy {
        FuelCostPolicy::Suppress => reported_fuel,
        FuelCostPolicy::TreatAsZero => reported_fuel.or(Some(Decimal::ZERO)),
    };

    let rasm = cents_per_mile(revenue, asm);
    let casm = cents_per_mile(operating_expenses, asm);

    let metrics = AirlineMetrics {
        passenger_load_factor: percent(rpm, asm),
        rasm,
        casm,
        casm_ex_fuel: cents_per_mile(difference(operating_expenses, fuel_costs), asm),
        // Built from the derived CASM and RASM, so it disappears with either.
        break_even_load_factor: percent(casm, rasm),
        passenger_yield: cents_per_mile(revenue, rpm),
    };

    debug!(
        fiscal_year = operational.fiscal_year,
        absent = ?metrics.absent_fields(),
        "airline metrics calculated"
    );
    metrics
}

/// `false` only when the break-even load factor is present and its magnitude
/// exceeds `config.break_even_threshold`.
pub fn validate_metrics(metrics: &AirlineMetrics, config: &AirlineMetricsConfig) -> bool {
    match metrics.break_even_load_factor {
        Some(belf) if belf.abs() > config.break_even_threshold => {
            warn!(
                break_even_load_factor = %belf,
                threshold = %config.break_even_threshold,
                "implausible break-even load factor"
            );
            false
        }
        _ => true,
    }
}

/// Compute and validate airline metrics wrapped in the standard output envelope.
pub fn analyze_airline_metrics(
    input: &AirlineMetricsInput,
) -> AirlineMetricsResult<ComputationOutput<AirlineMetricsReport>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    input.config.validate()?;

    let income = input.income_statement.as_ref();
    if income.is_none() {
        warnings.push("No income statement supplied; only load factor can be derived.".into());
    }
    if input.operational.available_seat_miles.is_none() {
        warnings.push("Available seat miles missing; all per-ASM metrics are absent.".into());
    }
    if let Some(i) = income {
        if i.fuel_costs.is_none() && i.operating_expenses.is_some() {
            match input.config.fuel_cost_policy {
                FuelCostPolicy::Suppress => warnings
                    .push("Fuel costs missing; CASM-ex-fuel suppressed by policy.".into()),
                FuelCostPolicy::TreatAsZero => warnings.push(
                    "Fuel costs missing; treated as zero so CASM-ex-fuel equals CASM.".into(),
                ),
            }
        }
    }

    let metrics = calculate_airline_metrics(&input.operational, income, &input.config);
    let valid = validate_metrics(&metrics, &input.config);

    if let Some(belf) = metrics.break_even_load_factor {
        if !valid {
            warnings.push(format!(
                "Break-even load factor {}% exceeds {}%; input data is likely wrong.",
                belf.round_dp(2),
                input.config.break_even_threshold
            ));
        } else if belf > COST_COVERAGE_LINE {
            warnings.push(format!(
                "Break-even load factor {}% is above 100%; costs exceed revenue at full capacity.",
                belf.round_dp(2)
            ));
        }
    }

    let output = AirlineMetricsReport {
        fiscal_year: input.operational.fiscal_year,
        metrics,
        valid,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "per_mile_unit": "cents",
        "mile_units": "converted to absolute miles before division",
        "reported_asm_unit": input
            .operational
            .available_seat_miles
            .map(|m| m.unit.to_string()),
        "fuel_cost_policy": input.config.fuel_cost_policy.to_string(),
        "break_even_threshold_pct": input.config.break_even_threshold.to_string(),
    });

    Ok(with_metadata(
        "Airline unit economics (load factor, RASM, CASM, break-even load factor)",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn cents_per_mile(amount: Option<Money>, miles: Option<Decimal>) -> Option<Cents> {
    ratio(amount?.checked_mul(CENTS_PER_DOLLAR), miles)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_ops() -> AirlineOperationalData {
        AirlineOperationalData {
            fiscal_year: 2023,
            available_seat_miles: Some(SeatMiles::millions(dec!(100_000))),
            revenue_passenger_miles: Some(SeatMiles::millions(dec!(85_000))),
        }
    }

    fn sample_income() -> IncomeStatement {
        IncomeStatement {
            total_revenue: Some(dec!(15_000_000_000)),
            operating_expenses: Some(dec!(14_000_000_000)),
            fuel_costs: Some(dec!(4_000_000_000)),
            ..Default::default()
        }
    }

    #[test]
    fn test_load_factor() {
        let m = calculate_airline_metrics(&sample_ops(), None, &AirlineMetricsConfig::default());
        assert_eq!(m.passenger_load_factor, Some(dec!(85)));
        assert_eq!(m.rasm, None);
        assert_eq!(m.break_even_load_factor, None);
    }

    #[test]
    fn test_unit_costs_in_cents() {
        let m = calculate_airline_metrics(
            &sample_ops(),
            Some(&sample_income()),
            &AirlineMetricsConfig::default(),
        );
        assert_eq!(m.rasm, Some(dec!(15)));
        assert_eq!(m.casm, Some(dec!(14)));
        assert_eq!(m.casm_ex_fuel, Some(dec!(10)));
        // 15B * 100 / 85B miles
        assert_eq!(m.passenger_yield.map(|y| y.round_dp(2)), Some(dec!(17.65)));
    }

    #[test]
    fn test_break_even_is_casm_over_rasm() {
        let m = calculate_airline_metrics(
            &sample_ops(),
            Some(&sample_income()),
            &AirlineMetricsConfig::default(),
        );
        let belf = m.break_even_load_factor.unwrap();
        assert_eq!(belf.round_dp(2), dec!(93.33));
    }

    #[test]
    fn test_casm_ex_fuel_policy() {
        let income = IncomeStatement {
            fuel_costs: None,
            ..sample_income()
        };
        let suppress = calculate_airline_metrics(
            &sample_ops(),
            Some(&income),
            &AirlineMetricsConfig::default(),
        );
        assert_eq!(suppress.casm_ex_fuel, None);
        assert_eq!(suppress.casm, Some(dec!(14)));

        let config = AirlineMetricsConfig {
            fuel_cost_policy: FuelCostPolicy::TreatAsZero,
            ..Default::default()
        };
        let as_zero = calculate_airline_metrics(&sample_ops(), Some(&income), &config);
        assert_eq!(as_zero.casm_ex_fuel, as_zero.casm);
    }

    #[test]
    fn test_zero_asm_suppresses_everything_per_asm() {
        let ops = AirlineOperationalData {
            available_seat_miles: Some(SeatMiles::millions(Decimal::ZERO)),
            ..sample_ops()
        };
        let m = calculate_airline_metrics(
            &ops,
            Some(&sample_income()),
            &AirlineMetricsConfig::default(),
        );
        assert_eq!(m.passenger_load_factor, None);
        assert_eq!(m.rasm, None);
        assert_eq!(m.casm, None);
        assert_eq!(m.casm_ex_fuel, None);
        assert_eq!(m.break_even_load_factor, None);
        assert!(m.passenger_yield.is_some());
    }

    #[test]
    fn test_zero_revenue_suppresses_break_even() {
        let income = IncomeStatement {
            total_revenue: Some(Decimal::ZERO),
            ..sample_income()
        };
        let m = calculate_airline_metrics(
            &sample_ops(),
            Some(&income),
            &AirlineMetricsConfig::default(),
        );
        assert_eq!(m.rasm, Some(Decimal::ZERO));
        assert_eq!(m.break_even_load_factor, None);
    }

    #[test]
    fn test_validation_threshold() {
        let config = AirlineMetricsConfig::default();
        let with_belf = |v| AirlineMetrics {
            break_even_load_factor: v,
            ..Default::default()
        };
        assert!(!validate_metrics(&with_belf(Some(dec!(200))), &config));
        assert!(!validate_metrics(&with_belf(Some(dec!(-200))), &config));
        assert!(validate_metrics(&with_belf(Some(dec!(150))), &config));
        assert!(validate_metrics(&with_belf(Some(dec!(105))), &config));
        assert!(validate_metrics(&with_belf(None), &config));
    }

    #[test]
    fn test_envelope_reports_invalid() {
        let input = AirlineMetricsInput {
            operational: sample_ops(),
            income_statement: Some(IncomeStatement {
                operating_expenses: Some(dec!(40_000_000_000)),
                ..sample_income()
            }),
            config: AirlineMetricsConfig::default(),
        };
        let out = analyze_airline_metrics(&input).unwrap();
        assert!(!out.result.valid);
        assert!(out.warnings.iter().any(|w| w.contains("likely wrong")));
    }

    #[test]
    fn test_envelope_rejects_bad_config() {
        let input = AirlineMetricsInput {
            operational: sample_ops(),
            income_statement: None,
            config: AirlineMetricsConfig {
                break_even_threshold: dec!(-1),
                ..Default::default()
            },
        };
        assert!(analyze_airline_metrics(&input).is_err());
    }
}
