use axum::{extract::State, response::Json, routing::post, Router};
use axum_extra::extract::WithRejection;

use super::{error::ApiError, state::AppState};
use crate::auth::{LoginRequest, LoginResponse};

pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// Exchange membership number and password for a token
#[tracing::instrument(skip(state, request))]
async fn login(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<LoginRequest>, ApiError>,
) -> Result<Json<LoginResponse>, ApiError> {
    let response = state.auth_service.login(request).await?;
    Ok(Json(response))
}
