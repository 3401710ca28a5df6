//! Answer format validation tool definition.
//!
//! Extracts a normalized answer of the expected shape from free text.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{CallToolResult, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::{parse_params, success_result, tool_descriptor};

static BOOLEAN_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(true|false)\b").expect("boolean pattern is valid"));

static DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("number pattern is valid"));

static DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:([0-9]{1,2})/([0-9]{1,2})/([0-9]{4})|([0-9]{4})-([0-9]{1,2})-([0-9]{1,2}))\b")
        .expect("date pattern is valid")
});

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the format validation tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FormatValidateParams {
    /// Raw answer text.
    #[schemars(description = "Raw answer to validate")]
    pub answer: String,

    /// Expected answer format.
    #[schemars(description = "Expected format (multiple_choice, number, date, boolean)")]
    pub expected_format: String,

    /// Options for multiple choice answers.
    #[schemars(description = "Multiple choice options if applicable")]
    #[serde(default)]
    pub options: Option<Vec<String>>,
}

/// Result of validating an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub valid: bool,
    /// Normalized answer; `None` when nothing usable was found.
    pub normalized: Option<String>,
    /// Human-readable notes on what was matched or why it failed.
    pub notes: Vec<String>,
}

impl Validation {
    fn accepted(normalized: impl Into<String>, note: String) -> Self {
        Self {
            valid: true,
            normalized: Some(normalized.into()),
            notes: vec![note],
        }
    }

    fn rejected(note: String) -> Self {
        Self {
            valid: false,
            normalized: None,
            notes: vec![note],
        }
    }
}

fn validate_multiple_choice(answer: &str, options: Option<&[String]>) -> Validation {
    let Some(options) = options.filter(|o| !o.is_empty()) else {
        return Validation::accepted(answer, "No options provided; answer accepted as-is".to_string());
    };

    let answer_lower = answer.to_lowercase();
    let found = options.iter().find(|opt| {
        let opt_lower = opt.to_lowercase();
        opt_lower.contains(&answer_lower) || answer_lower.contains(&opt_lower)
    });

    match found {
        Some(option) => Validation::accepted(option.clone(), format!("Matched to option: {}", option)),
        None => Validation::rejected(format!(
            "No matching option found. Available: {}",
            options.join(", ")
        )),
    }
}

fn validate_boolean(answer: &str) -> Validation {
    let lower = answer.to_lowercase();
    match BOOLEAN_WORD.find(&lower).map(|m| m.as_str()) {
        Some(word) => {
            let normalized = if word == "true" { "True" } else { "False" };
            Validation::accepted(normalized, format!("Extracted boolean: {}", normalized))
        }
        None => Validation::rejected("No boolean value found".to_string()),
    }
}

fn validate_number(answer: &str) -> Validation {
    match DIGITS.find(answer) {
        Some(m) => Validation::accepted(m.as_str(), format!("Extracted number: {}", m.as_str())),
        None => Validation::rejected("No number found".to_string()),
    }
}

fn validate_date(answer: &str) -> Validation {
    let found = DATE.captures_iter(answer).find_map(|caps| {
        let field = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());
        let (year, month, day) = if caps.get(1).is_some() {
            (caps[3].parse::<i32>().ok()?, field(1)?, field(2)?)
        } else {
            (caps[4].parse::<i32>().ok()?, field(5)?, field(6)?)
        };
        NaiveDate::from_ymd_opt(year, month, day)
    });

    match found {
        Some(date) => {
            let normalized = date.format("%m/%d/%Y").to_string();
            let note = format!("Extracted date: {}", normalized);
            Validation::accepted(normalized, note)
        }
        None => Validation::rejected("No valid date found".to_string()),
    }
}

/// Validate `answer` against `expected_format`. Unknown formats pass the
/// answer through unchanged.
pub fn validate(answer: &str, expected_format: &str, options: Option<&[String]>) -> Validation {
    match expected_format.trim().to_lowercase().as_str() {
        "multiple_choice" => validate_multiple_choice(answer, options),
        "boolean" => validate_boolean(answer),
        "number" => validate_number(answer),
        "date" => validate_date(answer),
        _ => Validation {
            valid: true,
            normalized: Some(answer.to_string()),
            notes: Vec::new(),
        },
    }
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Format validation tool.
pub struct FormatValidateTool;

impl FormatValidateTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "format_validate";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Validate answer format and convert to expected format";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(format = %params.expected_format))]
    pub fn execute(params: &FormatValidateParams) -> CallToolResult {
        let outcome = validate(
            &params.answer,
            &params.expected_format,
            params.options.as_deref(),
        );
        info!("Answer valid: {}", outcome.valid);

        let mut lines = vec![
            format!("Original answer: {}", params.answer),
            format!("Expected format: {}", params.expected_format),
        ];
        lines.extend(outcome.notes);

        success_result(format!(
            "Format Validation:\n\n{}\n\nValidated answer: {}\nValid: {}",
            lines.join("\n"),
            outcome.normalized.as_deref().unwrap_or("(none)"),
            outcome.valid
        ))
    }

    /// Decode raw arguments and execute.
    pub fn call(arguments: JsonObject) -> Result<CallToolResult, ToolError> {
        let params: FormatValidateParams = parse_params(arguments)?;
        Ok(Self::execute(&params))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        tool_descriptor(
            Self::NAME,
            Self::DESCRIPTION,
            cached_schema_for_type::<FormatValidateParams>(),
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
