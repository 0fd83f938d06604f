use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Percentages pre-multiplied by 100 (85 = 85%). Never as fractions.
pub type Percent = Decimal;

/// Plain ratios (e.g., a 2.0x current ratio)
pub type Multiple = Decimal;

/// Unit economics expressed in cents per mile
pub type Cents = Decimal;

/// Scale of a reported mile quantity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MileUnit {
    Miles,
    Thousands,
    /// Filings report ASM and RPM in millions.
    #[default]
    Millions,
}

impl MileUnit {
    /// Number of miles in one unit.
    pub fn factor(&self) -> Decimal {
        match self {
            Self::Miles => Decimal::ONE,
            Self::Thousands => dec!(1_000),
            Self::Millions => dec!(1_000_000),
        }
    }
}

impl std::fmt::Display for MileUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Miles => "miles",
            Self::Thousands => "thousands of miles",
            Self::Millions => "millions of miles",
        };
        write!(f, "{}", s)
    }
}

/// A seat-mile or passenger-mile quantity tagged with its unit.
///
/// Formulas only ever see [`SeatMiles::to_miles`], so a figure reported in
/// millions cannot be scaled twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatMiles {
    pub value: Decimal,
    #[serde(default)]
    pub unit: MileUnit,
}

impl SeatMiles {
    pub fn new(value: Decimal, unit: MileUnit) -> Self {
        Self { value, unit }
    }

    pub fn millions(value: Decimal) -> Self {
        Self::new(value, MileUnit::Millions)
    }

    pub fn thousands(value: Decimal) -> Self {
        Self::new(value, MileUnit::Thousands)
    }

    pub fn miles(value: Decimal) -> Self {
        Self::new(value, MileUnit::Miles)
    }

    /// Absolute miles, or `None` if the scaled value overflows.
    pub fn to_miles(&self) -> Option<Decimal> {
        self.value.checked_mul(self.unit.factor())
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
