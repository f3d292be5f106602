//! Profile Pulse: binary entrypoint.
//! Boots the Axum HTTP server with config, the feed refresh task, and metrics.

use shuttle_axum::ShuttleAxum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use profile_pulse::config::AppConfig;
use profile_pulse::metrics::Metrics;

/// Enable compact tracing logs in development only.
/// Activation requires BOTH:
///   - dev environment (debug build OR SHUTTLE_ENV in {local, development, dev})
///   - PULSE_DEV_LOG=1
fn enable_dev_tracing() {
    let dev_flag = std::env::var("PULSE_DEV_LOG")
        .ok()
        .is_some_and(|v| v == "1");

    let is_dev_env = cfg!(debug_assertions)
        || matches!(
            std::env::var("SHUTTLE_ENV")
                .unwrap_or_default()
                .to_ascii_lowercase()
                .as_str(),
            "local" | "development" | "dev"
        );

    if !(dev_flag && is_dev_env) {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("profile_pulse=info,feed=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();

    // Initialize dev tracing early (no-op in production).
    enable_dev_tracing();

    let cfg = AppConfig::load_default().expect("Failed to load pulse config");
    let metrics = Metrics::init();

    let router = profile_pulse::app(&cfg)
        .expect("Failed to build router")
        .merge(metrics.router());

    Ok(router.into())
}
