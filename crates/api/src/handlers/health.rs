//! Liveness and database reachability.

use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    /// `ok` when the database answers, `degraded` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Round trip of the probe query; absent when it failed.
    pub db_latency_ms: Option<u64>,
}

/// GET /health
///
/// Answers 503 while the database is unreachable so load balancers stop
/// routing pet traffic here.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let started = Instant::now();
    let db_check = petkare_db::health_check(&state.pool).await;
    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    let report = match db_check {
        Ok(()) => HealthReport {
            status: "ok",
            version: env!("CARGO_PKG_VERSION"),
            db_healthy: true,
            db_latency_ms: Some(elapsed_ms),
        },
        Err(err) => {
            tracing::warn!(error = %err, elapsed_ms, "Database health check failed");
            HealthReport {
                status: "degraded",
                version: env!("CARGO_PKG_VERSION"),
                db_healthy: false,
                db_latency_ms: None,
            }
        }
    };

    let code = if report.db_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (code, Json(report))
}
