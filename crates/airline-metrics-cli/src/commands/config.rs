use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use airline_metrics_core::{AirlineMetricsConfig, FuelCostPolicy};

use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FuelPolicyArg {
    /// Leave CASM-ex-fuel absent when fuel costs are missing
    Suppress,
    /// Count missing fuel costs as zero
    TreatAsZero,
}

impl From<FuelPolicyArg> for FuelCostPolicy {
    fn from(arg: FuelPolicyArg) -> Self {
        match arg {
            FuelPolicyArg::Suppress => FuelCostPolicy::Suppress,
            FuelPolicyArg::TreatAsZero => FuelCostPolicy::TreatAsZero,
        }
    }
}

/// Calculation policy shared by every command that derives airline metrics
#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Path to a YAML or JSON policy file
    #[arg(long)]
    pub config: Option<String>,

    /// How CASM-ex-fuel treats missing fuel costs
    #[arg(long, value_enum)]
    pub fuel_cost_policy: Option<FuelPolicyArg>,

    /// Break-even load factor (percent) above which a year fails validation
    #[arg(long)]
    pub break_even_threshold: Option<Decimal>,
}

impl ConfigArgs {
    /// Layer the policy file and then individual flags over `base`.
    ///
    /// Only keys present in the file replace values in `base`; a file that
    /// names just `break_even_threshold` keeps the base fuel policy.
    pub fn resolve(
        &self,
        base: AirlineMetricsConfig,
    ) -> Result<AirlineMetricsConfig, Box<dyn std::error::Error>> {
        let mut config = match self.config {
            Some(ref path) => overlay(base, input::file::read_structured(path)?)?,
            None => base,
        };
        if let Some(policy) = self.fuel_cost_policy {
            config.fuel_cost_policy = policy.into();
        }
        if let Some(threshold) = self.break_even_threshold {
            config.break_even_threshold = threshold;
        }
        config.validate()?;
        tracing::debug!(
            fuel_cost_policy = %config.fuel_cost_policy,
            break_even_threshold = %config.break_even_threshold,
            "calculation policy resolved"
        );
        Ok(config)
    }
}

/// Apply the keys of a parsed policy document on top of `base`.
fn overlay(
    base: AirlineMetricsConfig,
    document: Value,
) -> Result<AirlineMetricsConfig, Box<dyn std::error::Error>> {
    let has = |key: &str| document.get(key).is_some_and(|v| !v.is_null());
    let (has_policy, has_threshold) = (has("fuel_cost_policy"), has("break_even_threshold"));
    let file: AirlineMetricsConfig = serde_json::from_value(document)?;

    Ok(AirlineMetricsConfig {
        fuel_cost_policy: if has_policy {
            file.fuel_cost_policy
        } else {
            base.fuel_cost_policy
        },
        break_even_threshold: if has_threshold {
            file.break_even_threshold
        } else {
            base.break_even_threshold
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_flags_override_base() {
        let args = ConfigArgs {
            config: None,
            fuel_cost_policy: Some(FuelPolicyArg::TreatAsZero),
            break_even_threshold: Some(dec!(120)),
        };
        let config = args.resolve(AirlineMetricsConfig::default()).unwrap();
        assert_eq!(config.fuel_cost_policy, FuelCostPolicy::TreatAsZero);
        assert_eq!(config.break_even_threshold, dec!(120));
    }

    #[test]
    fn test_no_flags_keeps_base() {
        let base = AirlineMetricsConfig {
            break_even_threshold: dec!(175),
            ..Default::default()
        };
        let config = ConfigArgs::default().resolve(base.clone()).unwrap();
        assert_eq!(config, base);
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let args = ConfigArgs {
            break_even_threshold: Some(dec!(0)),
            ..Default::default()
        };
        assert!(args.resolve(AirlineMetricsConfig::default()).is_err());
    }

    #[test]
    fn test_policy_file_overrides_only_its_keys() {
        let base = AirlineMetricsConfig {
            fuel_cost_policy: FuelCostPolicy::TreatAsZero,
            break_even_threshold: dec!(175),
        };
        let config = overlay(base, json!({ "break_even_threshold": "130" })).unwrap();
        assert_eq!(config.fuel_cost_policy, FuelCostPolicy::TreatAsZero);
        assert_eq!(config.break_even_threshold, dec!(130));
    }

    #[test]
    fn test_policy_file_layered_under_flags() {
        let path = std::env::temp_dir().join(format!("airm-{}-layer.yaml", std::process::id()));
        std::fs::write(&path, "fuel_cost_policy: suppress\n").unwrap();
        let args = ConfigArgs {
            config: Some(path.to_string_lossy().into_owned()),
            break_even_threshold: Some(dec!(140)),
            ..Default::default()
        };
        let base = AirlineMetricsConfig {
            fuel_cost_policy: FuelCostPolicy::TreatAsZero,
            break_even_threshold: dec!(175),
        };
        let config = args.resolve(base).unwrap();
        assert_eq!(config.fuel_cost_policy, FuelCostPolicy::Suppress);
        assert_eq!(config.break_even_threshold, dec!(140));
        let _ = std::fs::remove_file(path);
    }
}
