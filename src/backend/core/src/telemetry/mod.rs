//! Telemetry: structured logging and Prometheus metrics.
//!
//! ```rust,no_run
//! use jobconnect_core::config::ObservabilityConfig;
//! use jobconnect_core::telemetry::init_telemetry;
//!
//! let metrics = init_telemetry(&ObservabilityConfig::default()).expect("telemetry");
//! ```

pub mod logging;
pub mod metrics;

pub use self::logging::{init_logging, LogFormat};
pub use self::metrics::{init_metrics, MetricsRegistry};

use crate::config::ObservabilityConfig;

/// Initialize logging and metrics.
///
/// Call once at application startup.
///
/// # Errors
///
/// Returns an error if any component fails to initialize.
pub fn init_telemetry(config: &ObservabilityConfig) -> anyhow::Result<MetricsRegistry> {
    init_logging(&config.log_level, config.log_format)?;
    init_metrics(config.metrics_enabled)
}
