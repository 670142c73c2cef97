//! Liveness probe endpoint

use axum::Json;
use serde::Serialize;

/// Basic service identity returned by the root route.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub name: &'static str,
    pub version: &'static str,
    pub status: &'static str,
}

/// GET / - liveness probe
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        name: "github_sensor",
        version: env!("CARGO_PKG_VERSION"),
        status: "ok",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn health_reports_the_crate_version() {
        let Json(response) = health().await;
        assert_eq!(response.status, "ok");
        assert_eq!(response.version, env!("CARGO_PKG_VERSION"));
    }
}
