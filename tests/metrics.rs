// tests/metrics.rs
#![cfg(feature = "strict-metrics")]
use axum::{
    body::{self, Body},
    http::Request,
};
use chrono::FixedOffset;
use tower::ServiceExt as _;

use profile_pulse::api::{self, AppState};
use profile_pulse::feed::FeedCache;
use profile_pulse::metrics::Metrics;

#[tokio::test]
async fn series_exposed_after_requests() {
    // Installs the global recorder for this test binary.
    let metrics = Metrics::init();
    let app = api::router(AppState::new(FixedOffset::east_opt(0).unwrap(), FeedCache::new()))
        .merge(metrics.router());

    let req = Request::get("/contributions?now=2026-10-19T00:00:00Z")
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(req).await.unwrap();

    let req = Request::get("/activity/summary").body(Body::empty()).unwrap();
    app.clone().oneshot(req).await.unwrap();

    let req = Request::get("/metrics").body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let bytes = body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let out = String::from_utf8(bytes.to_vec()).unwrap();

    assert!(out.contains("contributions_generated_total"));
    assert!(out.contains("activity_events_total"));
    assert!(out.contains("activity_fallback_total"));
}
