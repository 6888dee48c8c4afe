//! Axum route handlers for the Recommendation API.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::models::job::RecommendedJob;
use crate::recommend::engine::{recommend, SortOrder, UserQuery};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct RecommendParams {
    #[serde(default)]
    pub sort: SortOrder,
}

#[derive(Debug, Serialize)]
pub struct PersonalitiesResponse {
    pub personalities: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /recommend_jobs
///
/// Returns up to three jobs matching the user's personality and ranges.
/// An unknown personality yields `[]`, not an error.
pub async fn handle_recommend_jobs(
    State(state): State<AppState>,
    params: Result<Query<RecommendParams>, QueryRejection>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Vec<RecommendedJob>>, AppError> {
    let Query(params) = params?;
    let Json(body) = body?;
    let query = UserQuery::from_json(&body)?;
    Ok(Json(recommend(&state.catalog, &query, params.sort)))
}

/// GET /api/v1/personalities
///
/// Distinct personality labels present in the catalog, sorted.
pub async fn handle_personalities(State(state): State<AppState>) -> Json<PersonalitiesResponse> {
    Json(PersonalitiesResponse {
        personalities: state.catalog.personalities(),
    })
}
