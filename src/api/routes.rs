use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::auth::auth_routes;
use super::exercises::exercise_routes;
use super::health::health_check;
use super::members::member_routes;
use super::state::AppState;

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .merge(member_routes(&state))
        .merge(exercise_routes(&state))
        .merge(auth_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
