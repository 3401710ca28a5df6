//! Date arithmetic tool definition.
//!
//! Adds a signed number of calendar days to a base date and renders the
//! result in one of a few fixed formats.

use chrono::{DateTime, NaiveDate, TimeDelta};
use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{CallToolResult, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::core::config::Config;
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::{parse_params, success_result, tool_descriptor};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the date calculation tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DateCalculateParams {
    /// Free-form description of the operation, echoed back in the result.
    #[schemars(description = "Date operation description (e.g., \"add 7 days to 2023-01-15\")")]
    #[serde(default)]
    pub operation: Option<String>,

    /// Starting date.
    #[schemars(description = "Starting date in YYYY-MM-DD format")]
    pub base_date: String,

    /// Days to add; negative values subtract.
    #[schemars(description = "Number of days to add/subtract")]
    pub offset_days: i64,

    /// Output format name.
    #[schemars(description = "Output format (MM/DD/YYYY, YYYY-MM-DD, etc.)")]
    #[serde(default)]
    pub format: Option<String>,
}

/// Output formats understood by the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    /// `MM/DD/YYYY`
    MonthDayYear,
    /// `YYYY-MM-DD`
    Iso,
    /// `Www Mmm DD YYYY`, used for any unrecognized format name.
    Readable,
}

impl DateFormat {
    /// Resolve a format name. Matching ignores case and surrounding spaces.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_uppercase().as_str() {
            "MM/DD/YYYY" => Self::MonthDayYear,
            "YYYY-MM-DD" => Self::Iso,
            _ => Self::Readable,
        }
    }

    pub fn render(self, date: NaiveDate) -> String {
        match self {
            Self::MonthDayYear => date.format("%m/%d/%Y").to_string(),
            Self::Iso => date.format("%Y-%m-%d").to_string(),
            Self::Readable => readable(date),
        }
    }
}

fn readable(date: NaiveDate) -> String {
    date.format("%a %b %d %Y").to_string()
}

/// Parse a base date. Accepts `YYYY-MM-DD`, or an RFC 3339 timestamp whose
/// date part is used.
pub fn parse_base_date(input: &str) -> Result<NaiveDate, ToolError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed).map(|dt| dt.date_naive()))
        .map_err(|_| ToolError::date_calculation(format!("Invalid date format: {}", input)))
}

/// Shift `base` by `offset_days` calendar days.
pub fn shift(base: NaiveDate, offset_days: i64) -> Result<NaiveDate, ToolError> {
    TimeDelta::try_days(offset_days)
        .and_then(|delta| base.checked_add_signed(delta))
        .ok_or_else(|| {
            ToolError::date_calculation(format!(
                "Offset of {} days from {} is out of range",
                offset_days, base
            ))
        })
}

/// Parse, shift and format in one go.
pub fn calculate(base_date: &str, offset_days: i64, format: &str) -> Result<String, ToolError> {
    let base = parse_base_date(base_date)?;
    let shifted = shift(base, offset_days)?;
    Ok(DateFormat::from_name(format).render(shifted))
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Date calculation tool.
pub struct DateCalculateTool;

impl DateCalculateTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "date_calculate";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Perform date arithmetic with computational verification";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(base_date = %params.base_date, offset = params.offset_days))]
    pub fn execute(params: &DateCalculateParams, config: &Config) -> Result<CallToolResult, ToolError> {
        let format_name = params
            .format
            .as_deref()
            .unwrap_or(&config.tools.default_date_format);

        let base = parse_base_date(&params.base_date)?;
        let shifted = shift(base, params.offset_days)?;
        let formatted = DateFormat::from_name(format_name).render(shifted);

        info!("Date calculation: {} {:+} days -> {}", base, params.offset_days, shifted);

        let mut verification = Vec::new();
        if let Some(operation) = params.operation.as_deref().filter(|op| !op.trim().is_empty()) {
            verification.push(format!("Operation: {}", operation));
        }
        verification.push(format!("Base date: {} ({})", params.base_date, readable(base)));
        verification.push(format!("Offset: {} days", params.offset_days));
        verification.push(format!("Result date: {}", readable(shifted)));
        verification.push(format!("Formatted: {}", formatted));

        Ok(success_result(format!(
            "Date Calculation Result: {}\n\nVerification:\n{}",
            formatted,
            verification.join("\n")
        )))
    }

    /// Decode raw arguments and execute.
    pub fn call(arguments: JsonObject, config: &Config) -> Result<CallToolResult, ToolError> {
        let params: DateCalculateParams = parse_params(arguments)?;
        Self::execute(&params, config)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        tool_descriptor(
            Self::NAME,
            Self::DESCRIPTION,
            cached_schema_for_type::<DateCalculateParams>(),
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::first_text;

    fn params(base_date: &str, offset_days: i64, format: Option<&str>) -> DateCalculateParams {
        DateCalculateParams {
            operation: None,
            base_date: base_date.to_string(),
            offset_days,
            format: format.map(str::to_string),
        }
    }

    #[test]
    fn test_calculate_adds_days() {
        assert_eq!(calculate("2023-01-15", 7, "MM/DD/YYYY").unwrap(), "01/22/2023");
    }

    #[test]
    fn test_calculate_month_rollover() {
        assert_eq!(calculate("2023-01-31", 1, "YYYY-MM-DD").unwrap(), "2023-02-01");
    }

    #[test]
    fn test_calculate_subtracts_days() {
        assert_eq!(calculate("2023-01-15", -7, "MM/DD/YYYY").unwrap(), "01/08/2023");
        assert_eq!(calculate("2023-03-01", -1, "yyyy-mm-dd").unwrap(), "2023-02-28");
    }

    #[test]
    fn test_calculate_leap_year() {
        assert_eq!(calculate("2024-02-28", 1, "MM/DD/YYYY").unwrap(), "02/29/2024");
        assert_eq!(calculate("2024-12-31", 1, "YYYY-MM-DD").unwrap(), "2025-01-01");
    }

    #[test]
    fn test_calculate_readable_fallback() {
        assert_eq!(calculate("2023-01-15", 7, "long").unwrap(), "Sun Jan 22 2023");
    }

    #[test]
    fn test_rfc3339_base_date() {
        assert_eq!(
            calculate("2023-01-15T10:00:00Z", 0, "YYYY-MM-DD").unwrap(),
            "2023-01-15"
        );
    }

    #[test]
    fn test_invalid_base_date() {
        let err = calculate("15/01/2023", 1, "MM/DD/YYYY").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Date calculation failed: Invalid date format: 15/01/2023"
        );
        assert!(calculate("2023-02-30", 1, "MM/DD/YYYY").is_err());
    }

    #[test]
    fn test_out_of_range_offset() {
        assert!(calculate("2023-01-15", i64::MAX, "MM/DD/YYYY").is_err());
        assert!(calculate("2023-01-15", 1_000_000_000, "MM/DD/YYYY").is_err());
    }

    #[test]
    fn test_execute_verification_text() {
        let config = Config::default();
        let mut p = params("2023-01-15", 7, Some("MM/DD/YYYY"));
        p.operation = Some("add 7 days to 2023-01-15".to_string());
        let result = DateCalculateTool::execute(&p, &config).unwrap();
        let text = first_text(&result);
        assert!(text.starts_with("Date Calculation Result: 01/22/2023"));
        assert!(text.contains("Operation: add 7 days to 2023-01-15"));
        assert!(text.contains("Base date: 2023-01-15 (Sun Jan 15 2023)"));
        assert!(text.contains("Offset: 7 days"));
        assert!(text.contains("Result date: Sun Jan 22 2023"));
    }

    #[test]
    fn test_execute_uses_configured_default_format() {
        let mut config = Config::default();
        let result = DateCalculateTool::execute(&params("2023-01-15", 1, None), &config).unwrap();
        assert!(first_text(&result).starts_with("Date Calculation Result: 01/16/2023"));

        config.tools.default_date_format = "YYYY-MM-DD".to_string();
        let result = DateCalculateTool::execute(&params("2023-01-15", 1, None), &config).unwrap();
        assert!(first_text(&result).starts_with("Date Calculation Result: 2023-01-16"));
    }

    #[test]
    fn test_call_rejects_fractional_offset() {
        let mut args = JsonObject::new();
        args.insert("base_date".into(), serde_json::json!("2023-01-15"));
        args.insert("offset_days".into(), serde_json::json!(1.5));
        let result = DateCalculateTool::call(args, &Config::default());
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }
}
