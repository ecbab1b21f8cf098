//! Prometheus metrics.
//!
//! Counters are recorded unconditionally; without an installed recorder the
//! `metrics` macros are no-ops, so `METRICS_ENABLED=false` simply skips
//! [`init_metrics`].

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
    routing::get,
};
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::{Duration, Instant};

pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0],
        )?
        .install_recorder()?;

    let upkeep_handle = handle.clone();
    tokio::spawn(async move {
        loop {
            tokio::time::sleep(Duration::from_secs(5)).await;
            upkeep_handle.run_upkeep();
        }
    });

    Ok(handle)
}

pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    let path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    let response = next.run(req).await;

    let status = response.status().as_u16().to_string();
    counter!("http_requests_total", "method" => method.clone(), "path" => path.clone(), "status" => status).increment(1);
    histogram!("http_request_duration_seconds", "method" => method, "path" => path)
        .record(start.elapsed().as_secs_f64());

    response
}

pub fn metrics_router(handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(move || async move { handle.render() }))
}

pub fn track_login(role: &str, success: bool) {
    let status = if success { "success" } else { "failure" };
    counter!("logins_total", "role" => role.to_string(), "status" => status).increment(1);
}

pub fn track_enrollment_created() {
    counter!("enrollments_created_total").increment(1);
}

pub fn track_enrollment_rejected(reason: &'static str) {
    counter!("enrollments_rejected_total", "reason" => reason).increment(1);
}

pub fn track_enrollment_withdrawn() {
    counter!("enrollments_withdrawn_total").increment(1);
}

pub fn track_class_created(attendance_rows: usize) {
    counter!("class_meetings_created_total").increment(1);
    counter!("attendance_rows_created_total").increment(attendance_rows as u64);
}

pub fn track_password_update() {
    counter!("password_updates_total").increment(1);
}
