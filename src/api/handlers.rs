use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::AppState;
use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{Course, Recommendation, UserId, UserProfile},
};

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub count: Option<i64>,
}

/// Health check endpoint
pub async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// List the course catalog
pub async fn list_courses(State(state): State<AppState>) -> AppResult<Json<Vec<Course>>> {
    let snapshot = state.store.snapshot().await?;
    Ok(Json(snapshot.courses().to_vec()))
}

/// Derived learning profile for a user
pub async fn get_profile(
    State(state): State<AppState>,
    user_id: Result<Path<UserId>, PathRejection>,
) -> AppResult<Json<UserProfile>> {
    let Path(user_id) = user_id.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    let snapshot = state.store.snapshot().await?;
    Ok(Json(state.service.profile(user_id, &snapshot)))
}

/// Hybrid recommendations for a user
pub async fn get_recommendations(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    user_id: Result<Path<UserId>, PathRejection>,
    query: Result<Query<RecommendationQuery>, QueryRejection>,
) -> AppResult<Json<Vec<Recommendation>>> {
    let Path(user_id) = user_id.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    let Query(query) = query.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    let count = resolve_count(query.count, state.default_count, state.max_count)?;

    tracing::info!(
        request_id = %request_id,
        user_id,
        count,
        "Processing recommendation request"
    );

    let snapshot = state.store.snapshot().await?;
    let recommendations = state.service.get_recommendations(&snapshot, user_id, count);

    Ok(Json(recommendations))
}

/// Applies the default and rejects non-positive or oversized counts
fn resolve_count(requested: Option<i64>, default_count: usize, max_count: usize) -> AppResult<usize> {
    let Some(requested) = requested else {
        return Ok(default_count);
    };

    if requested <= 0 {
        return Err(AppError::InvalidInput(format!(
            "count must be a positive integer, got {}",
            requested
        )));
    }

    match usize::try_from(requested) {
        Ok(count) if count <= max_count => Ok(count),
        _ => Err(AppError::InvalidInput(format!(
            "count must not exceed {}, got {}",
            max_count, requested
        ))),
    }
}
