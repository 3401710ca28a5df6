//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to the tools domain.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool.
//! `ToolRegistry` lists them and dispatches calls by name. Both the rmcp
//! `ServerHandler` (STDIO/TCP) and the HTTP JSON-RPC endpoint call into the
//! same registry, so failures are reported as `isError` envelopes everywhere.
//! **Adding a new tool does NOT require modifying this file!**

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    model::*,
    service::RequestContext,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use crate::domains::tools::{ToolError, ToolRegistry, failure_envelope};

/// Instructions sent to clients on initialization.
pub const INSTRUCTIONS: &str = "Computational reasoning helpers: boolean_evaluate, date_calculate, \
object_count, state_track, systematic_verify and format_validate. Use them to verify each step \
of a reasoning problem instead of computing it mentally.";

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp. It holds no
/// per-call state; every call works on its own copy of the arguments.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Registry used to list and dispatch tools.
    registry: ToolRegistry,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    pub fn new(config: Config) -> Self {
        let config = Arc::new(config);

        Self {
            registry: ToolRegistry::new(config.clone()),
            config,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools as JSON descriptors.
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        ToolRegistry::get_all_tools()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name and return the serialized envelope.
    ///
    /// Arguments that are not a JSON object (or null) are reported as an
    /// invalid-arguments envelope, like any other bad input.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> crate::Result<serde_json::Value> {
        let result = match arguments {
            serde_json::Value::Object(map) => self.registry.call_tool(name, Some(map)),
            serde_json::Value::Null => self.registry.call_tool(name, None),
            other => failure_envelope(
                name,
                &ToolError::invalid_arguments(format!(
                    "expected an object of arguments, got {}",
                    other
                )),
            ),
        };

        Ok(serde_json::to_value(result)?)
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    #[instrument(skip_all)]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: ToolRegistry::get_all_tools(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip_all, fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self.registry.call_tool(&request.name, request.arguments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn server() -> McpServer {
        McpServer::new(Config::default())
    }

    #[test]
    fn test_server_info_enables_tools() {
        let info = server().get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_none());
        assert!(info.instructions.unwrap().contains("boolean_evaluate"));
    }

    #[test]
    fn test_list_tools_json() {
        let tools = server().list_tools();
        assert_eq!(tools.len(), 6);
        for tool in &tools {
            assert!(tool["name"].is_string());
            assert_eq!(tool["inputSchema"]["type"], "object");
        }
    }

    #[test]
    fn test_call_tool_envelope() {
        let value = tokio_test::block_on(server().call_tool(
            "date_calculate",
            json!({"base_date": "2023-01-31", "offset_days": 1, "format": "YYYY-MM-DD"}),
        ))
        .unwrap();

        assert_eq!(value["isError"], false);
        assert_eq!(value["content"][0]["type"], "text");
        assert!(
            value["content"][0]["text"]
                .as_str()
                .unwrap()
                .starts_with("Date Calculation Result: 2023-02-01")
        );
    }

    #[tokio::test]
    async fn test_call_unknown_tool_envelope() {
        let value = server().call_tool("teleport", json!({})).await.unwrap();
        assert_eq!(value["isError"], true);
        assert_eq!(value["content"][0]["text"], "Error in teleport: Unknown tool: teleport");
    }

    #[tokio::test]
    async fn test_call_tool_non_object_arguments() {
        let value = server()
            .call_tool("boolean_evaluate", json!(["True"]))
            .await
            .unwrap();
        assert_eq!(value["isError"], true);
        assert!(
            value["content"][0]["text"]
                .as_str()
                .unwrap()
                .starts_with("Error in boolean_evaluate: Invalid arguments:")
        );
    }
}
