pub mod config;
pub mod error;
pub mod numeric;
pub mod statements;
pub mod types;

#[cfg(feature = "financial")]
pub mod financial;

#[cfg(feature = "airline")]
pub mod airline;

#[cfg(feature = "comparison")]
pub mod company;

#[cfg(feature = "comparison")]
pub mod comparison;

pub use config::{AirlineMetricsConfig, FuelCostPolicy};
pub use error::AirlineMetricsError;
pub use statements::*;
pub use types::*;

/// Standard result type for all airline-metrics operations
pub type AirlineMetricsResult<T> = Result<T, AirlineMetricsError>;
