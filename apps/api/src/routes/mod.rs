pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::recommend::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/recommend_jobs", post(handlers::handle_recommend_jobs))
        .route(
            "/api/v1/personalities",
            get(handlers::handle_personalities),
        )
        .with_state(state)
}
