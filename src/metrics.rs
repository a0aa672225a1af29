use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Install the Prometheus exporter and register all application metrics.
/// Only one recorder can exist per process, so later calls return the
/// handle from the first.
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    HANDLE
        .get_or_try_init(|| -> anyhow::Result<PrometheusHandle> {
            let handle = PrometheusBuilder::new().install_recorder()?;

            // Pre-register counters so they appear even before the first increment.
            for status in ["safe", "fraud", "unknown"] {
                counter!("verdicts_total", "status" => status).absolute(0);
            }
            for path in ["model", "fallback"] {
                counter!("classifier_calls_total", "path" => path).absolute(0);
            }
            for outcome in ["ready", "failed", "disabled"] {
                counter!("classifier_init_total", "outcome" => outcome).absolute(0);
            }
            for outcome in ["safe", "suspicious", "failed"] {
                counter!("batch_items_total", "outcome" => outcome).absolute(0);
            }
            counter!("assistant_replies_total").absolute(0);

            gauge!("classifier_ready").set(0.0);

            // Histogram is lazily created on first record; force creation.
            histogram!("pipeline_latency_seconds").record(0.0);

            Ok(handle)
        })
        .cloned()
}
