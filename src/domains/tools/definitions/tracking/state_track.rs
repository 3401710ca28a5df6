//! State tracking tool definition.
//!
//! Follows a participant -> value assignment through a sequence of swaps.

use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{CallToolResult, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info, instrument};

use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::{parse_params, success_result, tool_descriptor};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Kind of state operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Swap,
    Move,
}

/// A single operation in the sequence.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct Operation {
    #[serde(rename = "type")]
    pub kind: OperationKind,

    /// Participants involved; a swap uses the first two.
    #[serde(default)]
    pub participants: Vec<String>,
}

/// Parameters for the state tracking tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct StateTrackParams {
    /// Initial participant -> value assignments.
    #[schemars(description = "Initial positions/assignments (e.g., {\"Alice\": \"red\", \"Bob\": \"blue\"})")]
    pub initial_state: Map<String, Value>,

    /// Operations applied in order.
    #[schemars(description = "Sequence of operations to apply")]
    pub operations: Vec<Operation>,
}

/// Exchange the values held by `a` and `b`. A participant missing from the
/// state holds `null`.
pub fn swap(state: &mut Map<String, Value>, a: &str, b: &str) {
    let value_a = state.get(a).cloned().unwrap_or(Value::Null);
    let value_b = state.get(b).cloned().unwrap_or(Value::Null);
    state.insert(a.to_string(), value_b);
    state.insert(b.to_string(), value_a);
}

fn render(state: &Map<String, Value>) -> Result<String, ToolError> {
    serde_json::to_string(state).map_err(|e| ToolError::internal(e.to_string()))
}

/// Apply `operations` to `state` in order, returning the narrated step log.
pub fn apply_operations(
    state: &mut Map<String, Value>,
    operations: &[Operation],
) -> Result<Vec<String>, ToolError> {
    let mut steps = Vec::new();

    for (index, op) in operations.iter().enumerate() {
        let step = index + 1;
        match (op.kind, op.participants.as_slice()) {
            (OperationKind::Swap, [a, b, ..]) => {
                swap(state, a, b);
                debug!("Step {}: swapped {} and {}", step, a, b);
                steps.push(format!("Step {}: Swap {} and {}", step, a, b));
                steps.push(format!("  Result: {}", render(state)?));
            }
            (OperationKind::Swap, participants) => {
                steps.push(format!(
                    "Step {}: Swap skipped (needs 2 participants, got {})",
                    step,
                    participants.len()
                ));
            }
            (OperationKind::Move, participants) => {
                steps.push(format!(
                    "Step {}: Move {} not applied (move operations are not supported)",
                    step,
                    participants.join(", ")
                ));
            }
        }
    }

    Ok(steps)
}

// ============================================================================
// Tool Definition
// ============================================================================

/// State tracking tool.
pub struct StateTrackTool;

impl StateTrackTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "state_track";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Track object positions through a series of swaps/moves";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(participants = params.initial_state.len(), operations = params.operations.len()))]
    pub fn execute(params: &StateTrackParams) -> Result<CallToolResult, ToolError> {
        let mut state = params.initial_state.clone();
        let mut steps = vec![format!("Initial state: {}", render(&state)?)];
        steps.extend(apply_operations(&mut state, &params.operations)?);

        let final_state = render(&state)?;
        info!("Final state after {} operation(s): {}", params.operations.len(), final_state);

        Ok(success_result(format!(
            "State Tracking Result:\n\n{}\n\nFinal state: {}",
            steps.join("\n"),
            final_state
        )))
    }

    /// Decode raw arguments and execute.
    pub fn call(arguments: JsonObject) -> Result<CallToolResult, ToolError> {
        let params: StateTrackParams = parse_params(arguments)?;
        Self::execute(&params)
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        tool_descriptor(
            Self::NAME,
            Self::DESCRIPTION,
            cached_schema_for_type::<StateTrackParams>(),
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
