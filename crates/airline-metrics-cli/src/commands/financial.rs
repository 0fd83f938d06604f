use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use airline_metrics_core::financial::metrics::{self, FinancialMetricsInput};
use airline_metrics_core::{BalanceSheet, IncomeStatement, YearlyFinancialData};

use crate::input;

/// Arguments for financial metrics calculation
#[derive(Args, Default)]
#[command(allow_hyphen_values = true)]
pub struct FinancialArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Fiscal year of the filing
    #[arg(long, default_value_t = 0)]
    pub fiscal_year: i32,

    /// Total revenue
    #[arg(long)]
    pub revenue: Option<Decimal>,

    /// Operating income
    #[arg(long)]
    pub operating_income: Option<Decimal>,

    /// Net income
    #[arg(long)]
    pub net_income: Option<Decimal>,

    /// Gross profit
    #[arg(long)]
    pub gross_profit: Option<Decimal>,

    /// Current assets
    #[arg(long)]
    pub current_assets: Option<Decimal>,

    /// Current liabilities
    #[arg(long)]
    pub current_liabilities: Option<Decimal>,

    /// Cash and equivalents
    #[arg(long)]
    pub cash: Option<Decimal>,

    /// Inventory
    #[arg(long)]
    pub inventory: Option<Decimal>,

    /// Total assets
    #[arg(long)]
    pub total_assets: Option<Decimal>,

    /// Total equity
    #[arg(long)]
    pub total_equity: Option<Decimal>,

    /// Prior-year total revenue
    #[arg(long)]
    pub prior_revenue: Option<Decimal>,

    /// Prior-year net income
    #[arg(long)]
    pub prior_net_income: Option<Decimal>,
}

pub fn run_financial_metrics(args: FinancialArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let fin_input: FinancialMetricsInput = if let Some(ref path) = args.input {
        input::file::read_structured(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        input_from_flags(&args)
    };

    let result = metrics::analyze_financial_metrics(&fin_input);
    Ok(serde_json::to_value(result)?)
}

fn input_from_flags(args: &FinancialArgs) -> FinancialMetricsInput {
    let current = YearlyFinancialData::new(
        args.fiscal_year,
        Some(IncomeStatement {
            total_revenue: args.revenue,
            operating_income: args.operating_income,
            net_income: args.net_income,
            gross_profit: args.gross_profit,
            operating_expenses: None,
            fuel_costs: None,
        }),
        Some(BalanceSheet {
            current_assets: args.current_assets,
            current_liabilities: args.current_liabilities,
            cash_and_equivalents: args.cash,
            inventory: args.inventory,
            total_assets: args.total_assets,
            total_equity: args.total_equity,
        }),
    );

    let has_prior = args.prior_revenue.is_some() || args.prior_net_income.is_some();
    let prior = args
        .fiscal_year
        .checked_sub(1)
        .filter(|_| has_prior)
        .map(|prior_year| {
            YearlyFinancialData::new(
                prior_year,
                Some(IncomeStatement {
                    total_revenue: args.prior_revenue,
                    net_income: args.prior_net_income,
                    ..Default::default()
                }),
                None,
            )
        });

    FinancialMetricsInput { current, prior }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_flags_build_prior_year() {
        let args = FinancialArgs {
            fiscal_year: 2024,
            revenue: Some(dec!(11_000)),
            prior_revenue: Some(dec!(10_000)),
            ..Default::default()
        };
        let fin_input = input_from_flags(&args);
        let prior = fin_input.prior.unwrap();
        assert_eq!(prior.fiscal_year, 2023);
        let m = metrics::calculate_metrics(&fin_input.current, Some(&prior));
        assert_eq!(m.revenue_growth, Some(dec!(10)));
    }

    #[test]
    fn test_flags_without_prior() {
        let args = FinancialArgs {
            current_assets: Some(dec!(5)),
            current_liabilities: Some(dec!(0)),
            ..Default::default()
        };
        let fin_input = input_from_flags(&args);
        assert!(fin_input.prior.is_none());
        let m = metrics::calculate_metrics(&fin_input.current, None);
        assert_eq!(m.current_ratio, None);
        assert_eq!(m.working_capital, Some(dec!(5)));
    }

    #[test]
    fn test_lowest_fiscal_year_drops_prior() {
        let args = FinancialArgs {
            fiscal_year: i32::MIN,
            prior_revenue: Some(dec!(10_000)),
            ..Default::default()
        };
        assert!(input_from_flags(&args).prior.is_none());
    }
}
