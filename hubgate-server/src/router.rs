use axum::{http::StatusCode, response::IntoResponse, routing::get, Router};
use hubgate_core::{build_gateway_router, AppState};

/// Liveness endpoints in front of the catch-all gateway.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .merge(build_gateway_router(state))
}

async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({
            "status": "ok",
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}
