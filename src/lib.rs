//! MCP Reasoning Tools Library
//!
//! This crate provides a Model Context Protocol (MCP) server exposing small
//! computational helpers for step-by-step reasoning: boolean evaluation,
//! date arithmetic, object counting, state tracking through swaps, a
//! reasoning checklist, and answer format validation.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, the rmcp server handler and transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: The reasoning tools and their registry
//!
//! # Example
//!
//! ```rust,no_run
//! use mcp_reasoning_tools::{core::McpServer, core::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config);
//!     let reply = server
//!         .call_tool("boolean_evaluate", serde_json::json!({"expression": "True or False"}))
//!         .await?;
//!     println!("{}", reply);
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
