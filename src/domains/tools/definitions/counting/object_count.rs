//! Object counting tool definition.
//!
//! Counts the items that belong to a category, honouring leading quantities
//! such as "three cats" or "2 violins".

use std::sync::LazyLock;

use regex::Regex;
use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::{CallToolResult, JsonObject, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::{info, instrument, warn};

use super::categories::CategoryTable;
use crate::core::config::Config;
use crate::domains::tools::ToolError;
use crate::domains::tools::definitions::common::{parse_params, success_result, tool_descriptor};

const NUMBER_WORDS: [&str; 10] = [
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
];

static QUANTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b([0-9]+|one|two|three|four|five|six|seven|eight|nine|ten)\b")
        .expect("quantity pattern is valid")
});

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the object counting tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ObjectCountParams {
    /// Items to categorize and count.
    #[schemars(description = "List of items to categorize and count")]
    pub items: Vec<String>,

    /// Category to count.
    #[schemars(description = "Category to count (e.g., \"animals\", \"fruits\", \"instruments\")")]
    pub target_category: String,
}

/// Outcome of a count, before rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountOutcome {
    /// Matching items with their quantities, in input order.
    pub matches: Vec<(String, u64)>,
    /// Items outside the category, in input order.
    pub non_matches: Vec<String>,
    pub total: u64,
    /// False when the category is not in the table.
    pub known_category: bool,
}

/// Leading quantity of an item: the first number or number word, else 1.
pub fn extract_quantity(item: &str) -> u64 {
    let Some(captures) = QUANTITY.captures(item) else {
        return 1;
    };
    let token = &captures[1];

    if token.bytes().all(|b| b.is_ascii_digit()) {
        return token.parse().unwrap_or(u64::MAX);
    }

    let lower = token.to_lowercase();
    NUMBER_WORDS
        .iter()
        .position(|w| *w == lower)
        .map_or(1, |i| i as u64 + 1)
}

/// Count the items of `category` using the keyword `table`.
pub fn count_objects(items: &[String], category: &str, table: &CategoryTable) -> CountOutcome {
    let keywords = table.keywords(category);
    let words = keywords.unwrap_or_default();

    let mut matches = Vec::new();
    let mut non_matches = Vec::new();

    for item in items {
        let normalized: String = item
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_ascii_digit())
            .collect();
        let normalized = normalized.trim();

        if words.iter().any(|word| normalized.contains(word.as_str())) {
            matches.push((item.clone(), extract_quantity(item)));
        } else {
            non_matches.push(item.clone());
        }
    }

    let total = matches
        .iter()
        .fold(0u64, |sum, (_, quantity)| sum.saturating_add(*quantity));

    CountOutcome {
        matches,
        non_matches,
        total,
        known_category: keywords.is_some(),
    }
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Object counting tool.
pub struct ObjectCountTool;

impl ObjectCountTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "object_count";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str =
        "Systematically count objects by category with verification";

    /// Execute the tool logic.
    #[instrument(skip_all, fields(category = %params.target_category, items = params.items.len()))]
    pub fn execute(params: &ObjectCountParams, config: &Config) -> CallToolResult {
        let table = &config.tools.categories;
        let outcome = count_objects(&params.items, &params.target_category, table);

        if !outcome.known_category {
            warn!("Unknown category requested: {}", params.target_category);
        }
        info!(
            "Counted {} {} across {} matching item(s)",
            outcome.total,
            params.target_category,
            outcome.matches.len()
        );

        let mut breakdown = vec![format!("Target category: {}", params.target_category)];
        if !outcome.known_category {
            let known: Vec<_> = table.names().collect();
            breakdown.push(format!(
                "Unknown category (known categories: {})",
                known.join(", ")
            ));
        }
        breakdown.push("Matching items:".to_string());
        breakdown.extend(
            outcome
                .matches
                .iter()
                .map(|(item, quantity)| format!("  - {} ({})", item, quantity)),
        );
        breakdown.push("Non-matching items:".to_string());
        breakdown.extend(outcome.non_matches.iter().map(|item| format!("  - {}", item)));
        breakdown.push(format!(
            "Total {}: {}",
            params.target_category, outcome.total
        ));

        success_result(format!(
            "Object Count Result: {}\n\nBreakdown:\n{}",
            outcome.total,
            breakdown.join("\n")
        ))
    }

    /// Decode raw arguments and execute.
    pub fn call(arguments: JsonObject, config: &Config) -> Result<CallToolResult, ToolError> {
        let params: ObjectCountParams = parse_params(arguments)?;
        Ok(Self::execute(&params, config))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        tool_descriptor(
            Self::NAME,
            Self::DESCRIPTION,
            cached_schema_for_type::<ObjectCountParams>(),
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
