use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use axum_extra::extract::WithRejection;
use serde_json::Value;
use tracing::info;

use super::{error::ApiError, state::AppState};
use crate::models::{CreateExerciseRequest, Exercise};

pub fn exercise_routes(state: &AppState) -> Router<AppState> {
    let router = Router::new().route("/exercise", get(list_exercises).post(create_exercise));

    // The catalog proxy only exists when an upstream is configured.
    if state.catalog.is_some() {
        router.route("/exercise/catalog", get(exercise_catalog))
    } else {
        router
    }
}

#[tracing::instrument(skip(state))]
async fn list_exercises(State(state): State<AppState>) -> Result<Json<Vec<Exercise>>, ApiError> {
    let exercises = state.storage.get_exercises().await?;
    Ok(Json(exercises))
}

#[tracing::instrument(skip(state, request))]
async fn create_exercise(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<CreateExerciseRequest>, ApiError>,
) -> Result<(StatusCode, Json<Exercise>), ApiError> {
    let exercise = request.into_exercise()?;
    let exercise = state.storage.create_exercise(exercise).await?;
    info!(name = %exercise.name, "exercise created");

    Ok((StatusCode::CREATED, Json(exercise)))
}

#[tracing::instrument(skip(state))]
async fn exercise_catalog(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let catalog = state
        .catalog
        .as_ref()
        .ok_or_else(|| ApiError::Internal("exercise catalog is not configured".to_string()))?;

    Ok(Json(catalog.fetch().await?))
}
