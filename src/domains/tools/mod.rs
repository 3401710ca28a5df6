//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are executable functions that can be called by MCP clients to perform
//! specific computations.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `registry.rs` - Tool descriptors and name -> handler dispatch
//! - `error.rs` - Tool-specific error types
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` (e.g., `my_tool.rs`)
//! 2. Define params, `execute()`, `call()` and `to_tool()`
//! 3. Export in `definitions/mod.rs`
//! 4. Register in `registry.rs` (`tool_names`, `get_all_tools`, `dispatch`)
//!
//! **No need to modify `server.rs`!** Every transport dispatches through the
//! registry.

pub mod definitions;
mod error;
mod registry;

pub use error::ToolError;
pub use registry::{ToolRegistry, failure_envelope};
