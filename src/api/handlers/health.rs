//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Store reachable
/// - **503 Service Unavailable**: Store unreachable
///
/// The threat check is reported but never degrades the service: a disabled
/// checker is a valid configuration.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "store": { "status": "ok", "message": "redis connected" },
///     "threat_check": { "status": "ok", "message": "safe-browsing enabled (fail-open)" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let store_check = check_store(&state).await;

    let threat_check = check_threat_checker(&state);

    let healthy = store_check.is_ok();

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            store: store_check,
            threat_check,
        },
    };

    if healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks store connectivity.
async fn check_store(state: &AppState) -> CheckStatus {
    let backend = state.store.backend_name();

    if state.store.health_check().await {
        CheckStatus::ok(format!("{} connected", backend))
    } else {
        CheckStatus::error(format!("{} connection failed", backend))
    }
}

/// Reports whether URLs are being screened.
fn check_threat_checker(state: &AppState) -> CheckStatus {
    let registrar = &state.registrar;
    let checker = registrar.checker();

    let mode = if checker.is_enabled() {
        "enabled"
    } else {
        "disabled"
    };

    CheckStatus::ok(format!(
        "{} {} ({})",
        checker.name(),
        mode,
        registrar.policy()
    ))
}
