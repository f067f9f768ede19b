//! # Logging and Tracing Infrastructure
//!
//! - **File-based logging**: Structured logs to `logs/storefront.log.<date>` (daily rotation)
//! - **Trace IDs**: one UUID per user action, attached to every log line it produces
//!
//! ## Usage
//!
//! ```rust,no_run
//! # async fn add_to_cart() {}
//! # async fn run() {
//! let _log_guard = storefront::debug::init();
//!
//! let trace = storefront::debug::ActionTrace::new();
//! trace.run(add_to_cart()).await;
//! # }
//! ```
//!
//! ## Configuration
//!
//! Environment variables:
//! - `RUST_LOG`: Log level filter (e.g., `storefront=debug,info`)
//! - `STOREFRONT_LOG_DIR`: Log directory (default: `logs`)
//! - `STOREFRONT_LOG_JSON`: JSON lines output (1=on)
//! - `STOREFRONT_LOG_STDERR`: Mirror to stderr (1=on)

pub mod config;
pub mod logger;
pub mod trace_context;

pub use config::DebugConfig;
pub use trace_context::ActionTrace;

/// Initialize logging from the environment.
///
/// Call this at application startup and keep the returned guard alive.
pub fn init() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    logger::init(&DebugConfig::from_env())
}
