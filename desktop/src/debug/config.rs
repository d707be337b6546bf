//! Logging configuration from environment variables

use std::path::PathBuf;

pub const DEFAULT_LOG_FILTER: &str = "maatiputra=info,lib_core=info,warn";
pub const LOG_FILE_NAME: &str = "maatiputra.log";

/// Logging configuration
#[derive(Debug, Clone)]
pub struct DebugConfig {
    /// Log directory (for rotation)
    pub log_dir: PathBuf,
    /// Log file path
    pub log_file: PathBuf,
    /// Log level filter (e.g., "maatiputra=debug,info")
    pub log_level: String,
    /// Long-running task warning threshold in seconds
    pub slow_task_secs: u64,
}

impl Default for DebugConfig {
    fn default() -> Self {
        let log_dir = PathBuf::from("logs");
        Self {
            log_file: log_dir.join(LOG_FILE_NAME),
            log_dir,
            log_level: DEFAULT_LOG_FILTER.to_string(),
            slow_task_secs: 30,
        }
    }
}

impl DebugConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let log_dir = lookup("MAATIPUTRA_LOG_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.log_dir);

        Self {
            log_file: log_dir.join(LOG_FILE_NAME),
            log_dir,
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            slow_task_secs: lookup("MAATIPUTRA_SLOW_TASK_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.slow_task_secs),
        }
    }

    /// Check if debug logging is enabled
    pub fn is_debug_enabled(&self) -> bool {
        self.log_level.contains("debug") || self.log_level.contains("trace")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_without_env() {
        let config = DebugConfig::from_lookup(|_| None);
        assert_eq!(config.log_dir, PathBuf::from("logs"));
        assert_eq!(config.log_file, PathBuf::from("logs").join("maatiputra.log"));
        assert_eq!(config.log_level, DEFAULT_LOG_FILTER);
        assert!(!config.is_debug_enabled());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("MAATIPUTRA_LOG_DIR", "/tmp/mp-logs"),
            ("RUST_LOG", "maatiputra=debug"),
            ("MAATIPUTRA_SLOW_TASK_SECS", "5"),
        ]
        .into_iter()
        .collect();
        let config = DebugConfig::from_lookup(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.log_file, PathBuf::from("/tmp/mp-logs/maatiputra.log"));
        assert!(config.is_debug_enabled());
        assert_eq!(config.slow_task_secs, 5);
    }
}
