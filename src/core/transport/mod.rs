//! Transports for the reasoning tools server.
//!
//! - **STDIO**: rmcp service over stdin/stdout (default) - feature: `stdio`
//! - **TCP**: one rmcp service per accepted connection - feature: `tcp`
//! - **HTTP**: stateless JSON-RPC over POST - feature: `http`
//!
//! All three end up in the same `ToolRegistry`, so a tool call gives the
//! same result envelope whichever transport carried it.
//!
//! # Feature Flags
//!
//! - `stdio` (default): no extra dependencies
//! - `tcp`: enables tokio/net
//! - `http`: adds axum and tower-http (CORS), plus tokio/net

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "tcp")]
pub mod tcp;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

// Re-export configs for convenience
#[cfg(feature = "tcp")]
pub use config::TcpConfig;

#[cfg(feature = "http")]
pub use config::HttpConfig;
