use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use airline_metrics_core::airline::unit_economics::{
    self, AirlineMetricsInput, AirlineOperationalData,
};
use airline_metrics_core::{AirlineMetricsConfig, IncomeStatement, MileUnit, SeatMiles};

use crate::commands::config::ConfigArgs;
use crate::input;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum MileUnitArg {
    Miles,
    Thousands,
    #[default]
    Millions,
}

impl From<MileUnitArg> for MileUnit {
    fn from(arg: MileUnitArg) -> Self {
        match arg {
            MileUnitArg::Miles => MileUnit::Miles,
            MileUnitArg::Thousands => MileUnit::Thousands,
            MileUnitArg::Millions => MileUnit::Millions,
        }
    }
}

/// Arguments for airline unit-economics calculation
#[derive(Args, Default)]
#[command(allow_hyphen_values = true)]
pub struct AirlineArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Fiscal year of the operating statistics
    #[arg(long, default_value_t = 0)]
    pub fiscal_year: i32,

    /// Available seat miles
    #[arg(long)]
    pub asm: Option<Decimal>,

    /// Revenue passenger miles
    #[arg(long)]
    pub rpm: Option<Decimal>,

    /// Unit of --asm and --rpm
    #[arg(long, value_enum, default_value = "millions")]
    pub mile_unit: MileUnitArg,

    /// Total revenue
    #[arg(long)]
    pub revenue: Option<Decimal>,

    /// Total operating expenses
    #[arg(long)]
    pub operating_expenses: Option<Decimal>,

    /// Fuel costs
    #[arg(long)]
    pub fuel_costs: Option<Decimal>,

    #[command(flatten)]
    pub policy: ConfigArgs,
}

pub fn run_airline_metrics(args: AirlineArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut air_input: AirlineMetricsInput = if let Some(ref path) = args.input {
        input::file::read_structured(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        input_from_flags(&args)
    };
    air_input.config = args.policy.resolve(air_input.config)?;

    let result = unit_economics::analyze_airline_metrics(&air_input)?;
    Ok(serde_json::to_value(result)?)
}

fn input_from_flags(args: &AirlineArgs) -> AirlineMetricsInput {
    let unit: MileUnit = args.mile_unit.into();
    let income = if args.revenue.is_some()
        || args.operating_expenses.is_some()
        || args.fuel_costs.is_some()
    {
        Some(IncomeStatement {
            total_revenue: args.revenue,
            operating_expenses: args.operating_expenses,
            fuel_costs: args.fuel_costs,
            ..Default::default()
        })
    } else {
        None
    };

    AirlineMetricsInput {
        operational: AirlineOperationalData {
            fiscal_year: args.fiscal_year,
            available_seat_miles: args.asm.map(|v| SeatMiles::new(v, unit)),
            revenue_passenger_miles: args.rpm.map(|v| SeatMiles::new(v, unit)),
        },
        income_statement: income,
        config: AirlineMetricsConfig::default(),
    }
}
