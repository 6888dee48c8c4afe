use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service version and the size of the loaded catalog.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "jobmatch-api",
        "catalog": {
            "jobs": state.catalog.len(),
            "vocabulary": state.catalog.vocabulary_size(),
            "loaded_at": state.catalog.loaded_at().to_rfc3339(),
        }
    }))
}
