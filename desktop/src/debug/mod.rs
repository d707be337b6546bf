//! # Logging and Task Tracing
//!
//! File-based structured logging for the Maatiputra desktop client, plus a small
//! task tracker that logs how long each background collaborator call ran.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: Log level filter (e.g., `maatiputra=debug,lib_core=debug`)
//! - `MAATIPUTRA_LOG_DIR`: Log directory (default: `logs/`)
//! - `MAATIPUTRA_SLOW_TASK_SECS`: Slow task warning threshold (default: 30)

pub mod config;
pub mod logger;
pub mod task_tracker;

pub use config::DebugConfig;
pub use logger::init as init_logger;
pub use task_tracker::{active_task_count, spawn_tracked};

/// Initialize logging and the task tracker threshold.
///
/// Call this at application startup, before any other operations.
pub fn init() {
    let config = DebugConfig::from_env();
    task_tracker::set_slow_task_threshold(config.slow_task_secs);
    init_logger();
}
