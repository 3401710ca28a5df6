//! Boolean evaluation tool definition.
//!
//! Evaluates `True`/`False`/`and`/`or`/`not` expressions with a step-by-step
//! reduction log.

use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{CallToolResult, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument};

use super::expr::{self, bool_word};
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::{
    error_result, parse_params, success_result, tool_descriptor,
};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the boolean evaluation tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct BooleanEvaluateParams {
    /// Boolean expression to evaluate.
    #[schemars(description = "Boolean expression to evaluate (e.g., \"True and False or not True\")")]
    pub expression: String,
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Boolean evaluation tool.
pub struct BooleanEvaluateTool;

impl BooleanEvaluateTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "boolean_evaluate";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Systematically evaluate boolean expressions with step-by-step verification";

    /// Execute the tool logic.
    ///
    /// Parse failures come back as an error result rather than an `Err`, so
    /// the message reads "Error evaluating boolean expression" instead of the
    /// dispatcher's generic prefix.
    #[instrument(skip_all, fields(expression = %params.expression))]
    pub fn execute(params: &BooleanEvaluateParams) -> CallToolResult {
        let original = strip_trailing_is(&params.expression);
        info!("Evaluating boolean expression: {}", original);

        let mut steps = vec![
            format!("Original expression: {}", original),
            "Applying operator precedence: NOT > AND > OR".to_string(),
        ];

        let tree = match expr::parse(original) {
            Ok(tree) => tree,
            Err(e) => {
                return error_result(&format!("Error evaluating boolean expression: {}", e));
            }
        };

        steps.push(format!("Parsed expression: {}", tree));

        let mut trace = Vec::new();
        let result = tree.evaluate(&mut trace);
        steps.extend(
            trace
                .into_iter()
                .enumerate()
                .map(|(i, line)| format!("Step {}: {}", i + 1, line)),
        );
        steps.push(format!("Final result: {}", bool_word(result)));

        success_result(format!(
            "Boolean Evaluation Result: {}\n\nStep-by-step verification:\n{}",
            bool_word(result),
            steps.join("\n")
        ))
    }

    /// Decode raw arguments and execute.
    pub fn call(arguments: JsonObject) -> Result<CallToolResult, ToolError> {
        let params: BooleanEvaluateParams = parse_params(arguments)?;
        Ok(Self::execute(&params))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        tool_descriptor(
            Self::NAME,
            Self::DESCRIPTION,
            cached_schema_for_type::<BooleanEvaluateParams>(),
        )
    }
}

/// Drop a trailing " is" left over from questions like "not True and False is".
fn strip_trailing_is(expression: &str) -> &str {
    let trimmed = expression.trim();
    match trimmed.strip_suffix("is") {
        Some(rest) if rest.ends_with(char::is_whitespace) => rest.trim(),
        _ => trimmed,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::first_text;

    fn run(expression: &str) -> CallToolResult {
        BooleanEvaluateTool::execute(&BooleanEvaluateParams {
            expression: expression.to_string(),
        })
    }

    #[test]
    fn test_precedence_result() {
        let result = run("True or False and False");
        assert!(!result.is_error.unwrap_or(false));
        let text = first_text(&result);
        assert!(text.starts_with("Boolean Evaluation Result: True"));
        assert!(text.contains("Original expression: True or False and False"));
        assert!(text.contains("Parsed expression: True or (False and False)"));
        assert!(text.contains("Step 1: False and False = False"));
        assert!(text.contains("Final result: True"));
    }

    #[test]
    fn test_trailing_is_stripped() {
        let result = run("not True and False is");
        let text = first_text(&result);
        assert!(text.starts_with("Boolean Evaluation Result: False"));
        assert!(text.contains("Original expression: not True and False\n"));
    }

    #[test]
    fn test_strip_trailing_is_keeps_words_ending_in_is() {
        assert_eq!(strip_trailing_is("True and this"), "True and this");
        assert_eq!(strip_trailing_is("  False is  "), "False");
    }

    #[test]
    fn test_malformed_expression_is_error_result() {
        let result = run("True and or False");
        assert!(result.is_error.unwrap_or(false));
        let text = first_text(&result);
        assert!(text.starts_with("Error evaluating boolean expression:"));
        assert!(text.contains("unexpected 'or'"));
    }

    #[test]
    fn test_deeply_nested_expression_is_error_result() {
        let result = run(&format!("{}True", "not ".repeat(20_000)));
        assert!(result.is_error.unwrap_or(false));
        assert!(first_text(&result).contains("nested too deeply"));
    }

    #[test]
    fn test_call_with_missing_argument() {
        let result = BooleanEvaluateTool::call(JsonObject::new());
        assert!(matches!(result, Err(ToolError::InvalidArguments(_))));
    }

    #[test]
    fn test_tool_metadata() {
        let tool = BooleanEvaluateTool::to_tool();
        assert_eq!(tool.name, "boolean_evaluate");
        assert!(tool.input_schema.contains_key("properties"));
    }
}
