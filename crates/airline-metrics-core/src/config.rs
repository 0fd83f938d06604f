//! Tunable calculation policy.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::{AirlineMetricsError, AirlineMetricsResult};

/// Break-even load factors above this magnitude (percent) fail validation.
pub const DEFAULT_BREAK_EVEN_THRESHOLD: Decimal = dec!(150);

/// How CASM-ex-fuel treats an undisclosed fuel cost.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelCostPolicy {
    /// Leave CASM-ex-fuel absent when fuel costs are absent.
    #[default]
    Suppress,
    /// Count absent fuel costs as zero, so CASM-ex-fuel equals CASM.
    TreatAsZero,
}

impl std::fmt::Display for FuelCostPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Suppress => "suppress",
            Self::TreatAsZero => "treat_as_zero",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AirlineMetricsConfig {
    pub fuel_cost_policy: FuelCostPolicy,
    /// Percent, compared against the absolute break-even load factor.
    pub break_even_threshold: Decimal,
}

impl Default for AirlineMetricsConfig {
    fn default() -> Self {
        Self {
            fuel_cost_policy: FuelCostPolicy::default(),
            break_even_threshold: DEFAULT_BREAK_EVEN_THRESHOLD,
        }
    }
}

impl AirlineMetricsConfig {
    pub fn validate(&self) -> AirlineMetricsResult<()> {
        if self.break_even_threshold <= Decimal::ZERO {
            return Err(AirlineMetricsError::InvalidInput {
                field: "break_even_threshold".into(),
                reason: "Threshold must be a positive percentage.".into(),
            });
        }
        Ok(())
    }
}
