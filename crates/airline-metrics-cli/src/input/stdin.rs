use serde_json::Value;
use std::io::{self, Read};

/// Attempt to read JSON or YAML from stdin if data is being piped.
/// Returns None if stdin is a TTY (interactive).
pub fn read_stdin() -> Result<Option<Value>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value = parse_piped(trimmed)?;
    tracing::debug!(bytes = trimmed.len(), "input read from stdin");
    Ok(Some(value))
}

/// JSON first; anything that is not JSON is read as YAML.
fn parse_piped(text: &str) -> Result<Value, Box<dyn std::error::Error>> {
    match serde_json::from_str(text) {
        Ok(value) => Ok(value),
        Err(json_err) => serde_yaml::from_str(text).map_err(|yaml_err| {
            format!("stdin is neither JSON ({json_err}) nor YAML ({yaml_err})").into()
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airline_metrics_core::company::CompanyDataset;

    #[test]
    fn test_json_input() {
        let value = parse_piped(r#"{"ticker": "DAL", "financials": []}"#).unwrap();
        assert_eq!(value["ticker"], "DAL");
    }

    #[test]
    fn test_yaml_dataset() {
        let text = concat!(
            "ticker: UAL\n",
            "financials:\n",
            "  - fiscal_year: 2023\n",
            "    income_statement:\n",
            "      total_revenue: \"53700000000\"\n",
        );
        let dataset: CompanyDataset = serde_json::from_value(parse_piped(text).unwrap()).unwrap();
        assert_eq!(dataset.ticker, "UAL");
        assert_eq!(dataset.fiscal_years(), vec![2023]);
    }

    #[test]
    fn test_unparseable_input() {
        let err = parse_piped("{ticker: [").unwrap_err();
        assert!(err.to_string().contains("neither JSON"));
    }
}
