//! Raw filing line items, one fiscal year at a time.
//!
//! Every field is optional: `None` means the filing did not disclose the
//! line item, which is distinct from a disclosed zero.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::Money;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IncomeStatement {
    pub total_revenue: Option<Money>,
    pub operating_income: Option<Money>,
    pub net_income: Option<Money>,
    pub gross_profit: Option<Money>,
    pub operating_expenses: Option<Money>,
    pub fuel_costs: Option<Money>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceSheet {
    pub current_assets: Option<Money>,
    pub current_liabilities: Option<Money>,
    pub cash_and_equivalents: Option<Money>,
    pub inventory: Option<Money>,
    pub total_assets: Option<Money>,
    pub total_equity: Option<Money>,
}

/// Income statement and balance sheet for one fiscal year.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearlyFinancialData {
    pub fiscal_year: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_end: Option<NaiveDate>,
    #[serde(default)]
    pub income_statement: Option<IncomeStatement>,
    #[serde(default)]
    pub balance_sheet: Option<BalanceSheet>,
}

impl YearlyFinancialData {
    pub fn new(
        fiscal_year: i32,
        income_statement: Option<IncomeStatement>,
        balance_sheet: Option<BalanceSheet>,
    ) -> Self {
        Self {
            fiscal_year,
            period_end: None,
            income_statement,
            balance_sheet,
        }
    }

    pub(crate) fn income(&self) -> Option<&IncomeStatement> {
        self.income_statement.as_ref()
    }

    pub(crate) fn balance(&self) -> Option<&BalanceSheet> {
        self.balance_sheet.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_partial_statement_deserialises() {
        let json = r#"{
            "fiscal_year": 2023,
            "income_statement": { "total_revenue": "53717000000", "net_income": null }
        }"#;
        let year: YearlyFinancialData = serde_json::from_str(json).unwrap();
        let income = year.income_statement.unwrap();
        assert_eq!(income.total_revenue, Some(dec!(53_717_000_000)));
        assert_eq!(income.net_income, None);
        assert_eq!(income.fuel_costs, None);
        assert!(year.balance_sheet.is_none());
    }

    #[test]
    fn test_numeric_json_values_accepted() {
        let json = r#"{ "current_assets": 5000000000, "inventory": 0 }"#;
        let bs: BalanceSheet = serde_json::from_str(json).unwrap();
        assert_eq!(bs.current_assets, Some(dec!(5_000_000_000)));
        assert_eq!(bs.inventory, Some(dec!(0)));
    }
}
