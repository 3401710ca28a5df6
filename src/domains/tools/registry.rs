//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - The static list of tool descriptors
//! - Dispatch of a tool call by name
//! - Conversion of tool failures into `isError` envelopes
//!
//! Every transport goes through `ToolRegistry::call_tool`, so a given call
//! produces the same envelope over STDIO, TCP and HTTP.

use std::sync::Arc;

use rmcp::model::{CallToolResult, Content, JsonObject, Tool};
use tracing::{info, warn};

use crate::core::config::Config;

use super::ToolError;
use super::definitions::{
    BooleanEvaluateTool, DateCalculateTool, FormatValidateTool, ObjectCountTool, StateTrackTool,
    SystematicVerifyTool,
};

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - manages all available tools.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    config: Arc<Config>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            BooleanEvaluateTool::NAME,
            DateCalculateTool::NAME,
            ObjectCountTool::NAME,
            StateTrackTool::NAME,
            SystematicVerifyTool::NAME,
            FormatValidateTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    ///
    /// This is the single source of truth for all available tools.
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            BooleanEvaluateTool::to_tool(),
            DateCalculateTool::to_tool(),
            ObjectCountTool::to_tool(),
            StateTrackTool::to_tool(),
            SystematicVerifyTool::to_tool(),
            FormatValidateTool::to_tool(),
        ]
    }

    /// Route a call to its handler.
    pub fn dispatch(&self, name: &str, arguments: JsonObject) -> Result<CallToolResult, ToolError> {
        match name {
            BooleanEvaluateTool::NAME => BooleanEvaluateTool::call(arguments),
            DateCalculateTool::NAME => DateCalculateTool::call(arguments, &self.config),
            ObjectCountTool::NAME => ObjectCountTool::call(arguments, &self.config),
            StateTrackTool::NAME => StateTrackTool::call(arguments),
            SystematicVerifyTool::NAME => SystematicVerifyTool::call(arguments),
            FormatValidateTool::NAME => FormatValidateTool::call(arguments),
            _ => Err(ToolError::not_found(name)),
        }
    }

    /// Call a tool by name. Never fails: unknown tools, bad arguments and
    /// handler errors all come back as an `isError` envelope.
    pub fn call_tool(&self, name: &str, arguments: Option<JsonObject>) -> CallToolResult {
        info!("Calling tool: {}", name);
        match self.dispatch(name, arguments.unwrap_or_default()) {
            Ok(result) => result,
            Err(e) => {
                warn!("Tool {} failed: {}", name, e);
                failure_envelope(name, &e)
            }
        }
    }
}

/// Build the `isError` envelope for a failed call.
pub fn failure_envelope(name: &str, error: &ToolError) -> CallToolResult {
    CallToolResult::error(vec![Content::text(format!("Error in {}: {}", name, error))])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::definitions::common::first_text;
    use serde_json::json;

    fn registry() -> ToolRegistry {
        ToolRegistry::new(Arc::new(Config::default()))
    }

    fn args(value: serde_json::Value) -> Option<JsonObject> {
        value.as_object().cloned()
    }

    #[test]
    fn test_registry_tool_names() {
        let names = registry().tool_names();
        assert_eq!(names.len(), 6);
        assert!(names.contains(&"boolean_evaluate"));
        assert!(names.contains(&"date_calculate"));
        assert!(names.contains(&"object_count"));
        assert!(names.contains(&"state_track"));
        assert!(names.contains(&"systematic_verify"));
        assert!(names.contains(&"format_validate"));
    }

    #[test]
    fn test_registry_matches_descriptors() {
        let names = registry().tool_names();
        let tools = ToolRegistry::get_all_tools();
        assert_eq!(tools.len(), names.len());
        for tool in &tools {
            assert!(names.contains(&&*tool.name));
            assert!(tool.description.is_some());
        }
    }

    #[test]
    fn test_call_unknown_tool_is_error_envelope() {
        let result = registry().call_tool("unknown", None);
        assert!(result.is_error.unwrap_or(false));
        assert_eq!(first_text(&result), "Error in unknown: Unknown tool: unknown");
    }

    #[test]
    fn test_call_invalid_arguments_is_error_envelope() {
        let result = registry().call_tool("date_calculate", args(json!({"base_date": 5})));
        assert!(result.is_error.unwrap_or(false));
        assert!(first_text(&result).starts_with("Error in date_calculate: Invalid arguments:"));
    }

    #[test]
    fn test_call_handler_failure_is_error_envelope() {
        let result = registry().call_tool(
            "date_calculate",
            args(json!({"base_date": "not-a-date", "offset_days": 1})),
        );
        assert!(result.is_error.unwrap_or(false));
        assert_eq!(
            first_text(&result),
            "Error in date_calculate: Date calculation failed: Invalid date format: not-a-date"
        );
    }

    #[test]
    fn test_call_each_tool() {
        let registry = registry();
        let calls = [
            ("boolean_evaluate", json!({"expression": "True and not False"})),
            ("date_calculate", json!({"base_date": "2023-01-15", "offset_days": 7})),
            ("object_count", json!({"items": ["two apples"], "target_category": "fruits"})),
            (
                "state_track",
                json!({"initial_state": {"A": 1, "B": 2}, "operations": [{"type": "swap", "participants": ["A", "B"]}]}),
            ),
            ("systematic_verify", json!({"problem": "p", "problem_type": "boolean"})),
            ("format_validate", json!({"answer": "42", "expected_format": "number"})),
        ];

        for (name, arguments) in calls {
            let result = registry.call_tool(name, args(arguments));
            assert!(!result.is_error.unwrap_or(false), "{} failed", name);
            assert_eq!(result.content.len(), 1);
        }
    }

    #[test]
    fn test_boolean_parse_error_keeps_handler_message() {
        let result = registry().call_tool("boolean_evaluate", args(json!({"expression": "True and"})));
        assert!(result.is_error.unwrap_or(false));
        assert_eq!(
            first_text(&result),
            "Error evaluating boolean expression: unexpected end of expression"
        );
    }
}
