//! Systematic reasoning protocol tool definition.
//!
//! Produces a fixed six-step checklist for a problem. No reasoning is done
//! here; the checklist points at the computational tools instead.

use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{CallToolResult, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use std::fmt;
use tracing::{info, instrument};

use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::{parse_params, success_result, tool_descriptor};
use crate::domains::tools::definitions::{
    BooleanEvaluateTool, DateCalculateTool, ObjectCountTool, StateTrackTool,
};

/// Reasoning problem families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProblemType {
    Boolean,
    Temporal,
    Counting,
    Deduction,
    Spatial,
}

impl ProblemType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Temporal => "temporal",
            Self::Counting => "counting",
            Self::Deduction => "deduction",
            Self::Spatial => "spatial",
        }
    }

    /// The tool best suited to this problem family.
    pub fn suggested_tool(self) -> &'static str {
        match self {
            Self::Boolean => BooleanEvaluateTool::NAME,
            Self::Temporal => DateCalculateTool::NAME,
            Self::Counting => ObjectCountTool::NAME,
            Self::Deduction | Self::Spatial => StateTrackTool::NAME,
        }
    }
}

impl fmt::Display for ProblemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for the systematic verification tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SystematicVerifyParams {
    /// Problem statement.
    #[schemars(description = "Problem statement to analyze systematically")]
    pub problem: String,

    /// Problem family.
    #[schemars(description = "Type of reasoning problem")]
    pub problem_type: ProblemType,
}

/// Systematic verification tool.
pub struct SystematicVerifyTool;

impl SystematicVerifyTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "systematic_verify";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Apply 6-step systematic reasoning protocol to any problem";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(problem_type = %params.problem_type))]
    pub fn execute(params: &SystematicVerifyParams) -> CallToolResult {
        info!("Building reasoning protocol for {} problem", params.problem_type);

        let problem_type = params.problem_type;
        let protocol = [
            "🔍 STEP 1: Complete Problem Reading".to_string(),
            format!("Problem: {}", params.problem),
            format!("Type: {}", problem_type),
            String::new(),
            "📊 STEP 2: Problem Classification".to_string(),
            format!("Identified as: {} reasoning task", problem_type),
            String::new(),
            "📝 STEP 3: Key Information Extraction".to_string(),
            "(Extract specific constraints, given facts, target to find)".to_string(),
            String::new(),
            "⚙️ STEP 4: Apply Domain-Specific Method".to_string(),
            "(Use appropriate computational tools for this problem type)".to_string(),
            format!("Suggested tool: {}", problem_type.suggested_tool()),
            String::new(),
            "✅ STEP 5: Format Verification".to_string(),
            "(Ensure answer matches expected format)".to_string(),
            String::new(),
            "🔬 STEP 6: Double-Check Verification".to_string(),
            "(Cross-verify using alternative methods)".to_string(),
        ];

        success_result(format!(
            "Systematic Reasoning Protocol Applied:\n\n{}\n\nRecommendation: Use specific tools (boolean_evaluate, date_calculate, etc.) for computational verification.",
            protocol.join("\n")
        ))
    }

    /// Decode raw arguments and execute.
    pub fn call(arguments: JsonObject) -> Result<CallToolResult, ToolError> {
        let params: SystematicVerifyParams = parse_params(arguments)?;
        Ok(Self::execute(&params))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        tool_descriptor(
            Self::NAME,
            Self::DESCRIPTION,
            cached_schema_for_type::<SystematicVerifyParams>(),
        )
    }
}
