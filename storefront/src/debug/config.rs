//! Debug configuration from environment variables

use std::path::PathBuf;

const DEFAULT_FILTER: &str = "storefront=info,warn";

/// Logging configuration
#[derive(Debug, Clone)]
pub struct DebugConfig {
    /// Log directory (daily rotation happens inside it)
    pub log_dir: PathBuf,
    /// Log file name prefix
    pub log_file_name: String,
    /// Log level filter (e.g., "storefront=debug,info")
    pub log_level: String,
    /// Emit JSON lines instead of the plain text format
    pub json: bool,
    /// Mirror log output to stderr
    pub stderr: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            log_file_name: "storefront.log".to_string(),
            log_level: DEFAULT_FILTER.to_string(),
            json: false,
            stderr: false,
        }
    }
}

impl DebugConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let flag = |key: &str, default: bool| {
            std::env::var(key).map(|v| v == "1").unwrap_or(default)
        };

        Self {
            log_dir: std::env::var("STOREFRONT_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            log_file_name: defaults.log_file_name,
            log_level: std::env::var("RUST_LOG").unwrap_or(defaults.log_level),
            json: flag("STOREFRONT_LOG_JSON", defaults.json),
            stderr: flag("STOREFRONT_LOG_STDERR", defaults.stderr),
        }
    }

    /// Path of today's log file prefix, for display
    pub fn log_path(&self) -> PathBuf {
        self.log_dir.join(&self.log_file_name)
    }

    /// Check if debug logging is enabled
    pub fn is_debug_enabled(&self) -> bool {
        self.log_level.contains("debug") || self.log_level.contains("trace")
    }
}
