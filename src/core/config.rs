//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables, a `.env` file, or defaults.

use super::transport::TransportConfig;
use crate::domains::tools::definitions::CategoryTable;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Tools domain configuration.
    pub tools: ToolsConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Configuration for the tools domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Category keyword table used by `object_count`.
    pub categories: CategoryTable,

    /// Output format used by `date_calculate` when the caller gives none.
    pub default_date_format: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            categories: CategoryTable::builtin(),
            default_date_format: "MM/DD/YYYY".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "mcp-reasoning-tools".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            tools: ToolsConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                with_timestamps: true,
            },
            transport: TransportConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(value) = std::env::var("MCP_LOG_TIMESTAMPS") {
            config.logging.with_timestamps = value.to_lowercase() != "false" && value != "0";
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        if let Ok(format) = std::env::var("MCP_DEFAULT_DATE_FORMAT") {
            config.tools.default_date_format = format;
        }

        config
    }

    /// Merge extra `object_count` categories from `MCP_CATEGORIES_FILE`.
    ///
    /// Must run after logging is initialized: a missing or malformed file is
    /// only reported with `warn!`, and the built-in table is kept.
    pub fn load_categories(&mut self) {
        let Ok(path) = std::env::var("MCP_CATEGORIES_FILE") else {
            return;
        };

        let path = PathBuf::from(path);
        match CategoryTable::load_file(&path) {
            Ok(extra) => {
                info!("Loaded {} extra categories from {:?}", extra.len(), path);
                self.tools.categories.extend(extra);
            }
            Err(e) => {
                warn!("Ignoring category file, using built-in categories: {}", e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    /// Log sink shared between a test subscriber and the assertions.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn load_categories_with_logs(config: &mut Config) -> String {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || config.load_categories());
        logs.contents()
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.server.name, "mcp-reasoning-tools");
        assert_eq!(config.tools.default_date_format, "MM/DD/YYYY");
        assert!(config.tools.categories.keywords("animals").is_some());
    }

    #[test]
    fn test_server_name_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_SERVER_NAME", "reasoning-test");
        }
        let config = Config::from_env();
        assert_eq!(config.server.name, "reasoning-test");
        unsafe {
            std::env::remove_var("MCP_SERVER_NAME");
        }
    }

    #[test]
    fn test_categories_file_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"vegetables": ["carrot", "leek"]}}"#).unwrap();

        unsafe {
            std::env::set_var("MCP_CATEGORIES_FILE", file.path());
        }
        let mut config = Config::from_env();
        assert!(config.tools.categories.keywords("vegetables").is_none());
        let logs = load_categories_with_logs(&mut config);
        unsafe {
            std::env::remove_var("MCP_CATEGORIES_FILE");
        }

        assert!(logs.contains("Loaded 1 extra categories"));
        let vegetables = config.tools.categories.keywords("vegetables").unwrap();
        assert_eq!(vegetables, &["carrot".to_string(), "leek".to_string()]);
        assert!(config.tools.categories.keywords("animals").is_some());
    }

    #[test]
    fn test_missing_categories_file_falls_back() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_CATEGORIES_FILE", "/nonexistent/categories.json");
        }
        let mut config = Config::from_env();
        let logs = load_categories_with_logs(&mut config);
        unsafe {
            std::env::remove_var("MCP_CATEGORIES_FILE");
        }

        assert_eq!(config.tools.categories, CategoryTable::builtin());
        assert!(logs.contains("WARN"));
        assert!(logs.contains("Ignoring category file"));
    }

    #[test]
    fn test_malformed_categories_file_warns() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        unsafe {
            std::env::set_var("MCP_CATEGORIES_FILE", file.path());
        }
        let mut config = Config::from_env();
        let logs = load_categories_with_logs(&mut config);
        unsafe {
            std::env::remove_var("MCP_CATEGORIES_FILE");
        }

        assert_eq!(config.tools.categories, CategoryTable::builtin());
        assert!(logs.contains("Ignoring category file"));
    }

    #[test]
    fn test_default_date_format_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_DEFAULT_DATE_FORMAT", "YYYY-MM-DD");
        }
        let config = Config::from_env();
        unsafe {
            std::env::remove_var("MCP_DEFAULT_DATE_FORMAT");
        }
        assert_eq!(config.tools.default_date_format, "YYYY-MM-DD");
    }
}
