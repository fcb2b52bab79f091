use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};

use crate::routes::AppState;

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let economic_job_status = match &state.job {
        Some(job) => {
            serde_json::to_value(job.get_status()).unwrap_or_else(|_| json!("unavailable"))
        }
        None => json!("not_initialized"),
    };

    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "service": "statecraft",
        "version": env!("CARGO_PKG_VERSION"),
        "economic_job_status": economic_job_status,
    }))
}
