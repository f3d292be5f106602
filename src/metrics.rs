use axum::{routing::get, Router};
use metrics::{describe_counter, describe_gauge, describe_histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the Prometheus recorder. Call once per process.
    pub fn init() -> Self {
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .expect("prometheus: install recorder");
        ensure_described();
        Self { handle }
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}

/// One-time metrics registration (so series show up on /metrics).
pub fn ensure_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "contributions_generated_total",
            "Synthetic contribution years generated."
        );
        describe_counter!(
            "activity_events_total",
            "Raw activity events passed to the aggregator."
        );
        describe_counter!(
            "activity_fallback_total",
            "Summaries that fell back to placeholder counters."
        );
        describe_counter!("feed_events_total", "Events fetched from the feed source.");
        describe_counter!("feed_errors_total", "Feed fetch/parse errors.");
        describe_histogram!("feed_parse_ms", "Feed read + decode time in milliseconds.");
        describe_gauge!("feed_last_refresh_ts", "Unix ts of the last feed refresh.");
    });
}
