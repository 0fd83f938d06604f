use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::numeric::{difference, growth, percent, ratio};
use crate::statements::YearlyFinancialData;
use crate::types::*;

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialMetricsInput {
    pub current: YearlyFinancialData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prior: Option<YearlyFinancialData>,
}

/// Ratios derived from one fiscal year. Every field is independently absent
/// when its operands are missing or its denominator is zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialMetrics {
    // Profitability
    pub operating_margin: Option<Percent>,
    pub net_margin: Option<Percent>,
    pub gross_margin: Option<Percent>,
    // Liquidity
    pub current_ratio: Option<Multiple>,
    pub cash_ratio: Option<Multiple>,
    pub quick_ratio: Option<Multiple>,
    pub working_capital: Option<Money>,
    // Returns
    pub return_on_assets: Option<Percent>,
    pub return_on_equity: Option<Percent>,
    // Growth (requires prior year)
    pub revenue_growth: Option<Percent>,
    pub net_income_growth: Option<Percent>,
}

impl FinancialMetrics {
    /// Field names paired with their values, in declaration order.
    pub fn named_values(&self) -> [(&'static str, Option<Decimal>); 11] {
        [
            ("operating_margin", self.operating_margin),
            ("net_margin", self.net_margin),
            ("gross_margin", self.gross_margin),
            ("current_ratio", self.current_ratio),
            ("cash_ratio", self.cash_ratio),
            ("quick_ratio", self.quick_ratio),
            ("working_capital", self.working_capital),
            ("return_on_assets", self.return_on_assets),
            ("return_on_equity", self.return_on_equity),
            ("revenue_growth", self.revenue_growth),
            ("net_income_growth", self.net_income_growth),
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

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Derive corporate ratios for `current`, using `prior` for growth rates.
pub fn calculate_metrics(
    current: &YearlyFinancialData,
    prior: Option<&YearlyFinancialData>,
) -> FinancialMetrics {
    let income = current.income();
    let balance = current.balance();
    let prior_income = prior.and_then(|p| p.income());

    let revenue = income.and_then(|i| i.total_revenue);
    let net_income = income.and_then(|i| i.net_income);
    let current_assets = balance.and_then(|b| b.current_assets);
    let current_liabilities = balance.and_then(|b| b.current_liabilities);

    let metrics = FinancialMetrics {
        operating_margin: percent(income.and_then(|i| i.operating_income), revenue),
        net_margin: percent(net_income, revenue),
        gross_margin: percent(income.and_then(|i| i.gross_profit), revenue),

        current_ratio: ratio(current_assets, current_liabilities),
        cash_ratio: ratio(
            balance.and_then(|b| b.cash_and_equivalents),
            current_liabilities,
        ),
        quick_ratio: ratio(
            difference(current_assets, balance.and_then(|b| b.inventory)),
            current_liabilities,
        ),
        working_capital: difference(current_assets, current_liabilities),

        return_on_assets: percent(net_income, balance.and_then(|b| b.total_assets)),
        return_on_equity: percent(net_income, balance.and_then(|b| b.total_equity)),

        revenue_growth: growth(revenue, prior_income.and_then(|i| i.total_revenue)),
        net_income_growth: growth(net_income, prior_income.and_then(|i| i.net_income)),
    };

    debug!(
        fiscal_year = current.fiscal_year,
        absent = ?metrics.absent_fields(),
        "financial metrics calculated"
    );
    metrics
}

/// Compute financial metrics wrapped in the standard output envelope.
///
/// Each absent field is reported as a warning so callers can tell which
/// line items were missing from the filing.
pub fn analyze_financial_metrics(
    input: &FinancialMetricsInput,
) -> ComputationOutput<FinancialMetrics> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    match &input.prior {
        None => warnings.push("No prior year supplied; growth rates are absent.".into()),
        Some(prior) if input.current.fiscal_year.checked_sub(1) != Some(prior.fiscal_year) => {
            warnings.push(format!(
                "Prior year {} does not immediately precede {}; growth spans multiple years.",
                prior.fiscal_year, input.current.fiscal_year
            ));
        }
        Some(_) => {}
    }

    let metrics = calculate_metrics(&input.current, input.prior.as_ref());

    for field in metrics.absent_fields() {
        let growth_field = matches!(field, "revenue_growth" | "net_income_growth");
        if growth_field && input.prior.is_none() {
            continue;
        }
        warnings.push(format!(
            "{field} is absent: an input line item is missing or its denominator is zero."
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "percentages": "multiplied by 100",
        "quick_ratio": "(current_assets - inventory) / current_liabilities",
        "growth_base": "signed prior-year value",
        "rounding": "none; presentation layer rounds"
    });

    with_metadata(
        "Financial ratio analysis (margins, liquidity, returns, growth)",
        &assumptions,
        warnings,
        elapsed,
        metrics,
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
