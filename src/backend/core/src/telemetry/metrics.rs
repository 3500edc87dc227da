//! Prometheus metrics.
//!
//! Counters are recorded with the `metrics` macros where events happen and
//! rendered through the installed Prometheus recorder.

use metrics::describe_counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

/// Handle onto the installed recorder.
#[derive(Clone, Default)]
pub struct MetricsRegistry {
    prometheus_handle: Option<PrometheusHandle>,
}

impl std::fmt::Debug for MetricsRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MetricsRegistry")
            .field("prometheus_handle", &self.prometheus_handle.is_some())
            .finish()
    }
}

impl MetricsRegistry {
    /// A registry without recorder; renders nothing.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Render all metrics in Prometheus text format.
    pub fn render(&self) -> String {
        self.prometheus_handle
            .as_ref()
            .map(|h| h.render())
            .unwrap_or_default()
    }
}

/// Install the global Prometheus recorder.
///
/// # Errors
///
/// Returns an error if a recorder is already installed.
pub fn init_metrics(enabled: bool) -> anyhow::Result<MetricsRegistry> {
    if !enabled {
        return Ok(MetricsRegistry::disabled());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    register_metric_descriptions();

    tracing::info!("Metrics initialized");

    Ok(MetricsRegistry {
        prometheus_handle: Some(handle),
    })
}

fn register_metric_descriptions() {
    describe_counter!(
        "jobconnect_errors_total",
        "Errors raised, labelled by error code and category"
    );
    describe_counter!(
        "jobconnect_job_offers_created_total",
        "Job offers created"
    );
    describe_counter!(
        "jobconnect_job_offers_updated_total",
        "Job offers updated"
    );
    describe_counter!(
        "jobconnect_job_offers_deleted_total",
        "Job offers deleted"
    );
    describe_counter!(
        "jobconnect_notifications_failed_total",
        "Notifications that could not be delivered"
    );
}
