// handlers/health.rs - GET /health

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

use crate::database::StoreHealth;

/// 200 when the store answers, 503 with the failure otherwise
pub async fn health(State(store): State<Arc<dyn StoreHealth>>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                })),
            )
        }
    }
}
