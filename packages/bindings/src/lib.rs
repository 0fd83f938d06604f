use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Financial
// ---------------------------------------------------------------------------

#[napi]
pub fn financial_metrics(input_json: String) -> NapiResult<String> {
    let input: airline_metrics_core::financial::metrics::FinancialMetricsInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = airline_metrics_core::financial::metrics::analyze_financial_metrics(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Airline
// ---------------------------------------------------------------------------

#[napi]
pub fn airline_metrics(input_json: String) -> NapiResult<String> {
    let input: airline_metrics_core::airline::unit_economics::AirlineMetricsInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = airline_metrics_core::airline::unit_economics::analyze_airline_metrics(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Company analysis and comparison
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_company(input_json: String) -> NapiResult<String> {
    let input: airline_metrics_core::company::CompanyAnalysisInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        airline_metrics_core::company::analyze_company_report(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compare_companies(input_json: String) -> NapiResult<String> {
    let input: airline_metrics_core::comparison::ComparisonInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        airline_metrics_core::comparison::analyze_comparison(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
