use axum::{
    extract::{Path, State},
    middleware,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use axum_extra::extract::WithRejection;
use tracing::info;
use validator::Validate;

use super::{error::ApiError, state::AppState};
use crate::auth::{member_auth_middleware, validate_password_strength, PasswordPolicy, TOKEN_HEADER};
use crate::models::{CreateMemberRequest, Member};

/// Member routes. Reading a single member requires that member's token.
pub fn member_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/member", get(list_members).post(create_member))
        .route(
            "/member/:id",
            get(get_member).route_layer(middleware::from_fn_with_state(
                state.auth_service.clone(),
                member_auth_middleware,
            )),
        )
}

#[tracing::instrument(skip(state))]
async fn list_members(State(state): State<AppState>) -> Result<Json<Vec<Member>>, ApiError> {
    let members = state.storage.get_members().await?;
    Ok(Json(members))
}

/// Register a member. The new member's token comes back in `x-jwt-token`.
///
/// The membership number is drawn at random from six digits. A draw that
/// collides with an existing member is not redrawn: the insert fails with
/// `Duplicate` and the caller gets a 409 and may simply resubmit.
#[tracing::instrument(skip(state, request))]
async fn create_member(
    State(state): State<AppState>,
    WithRejection(Json(request), _): WithRejection<Json<CreateMemberRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError> {
    request.validate()?;
    validate_password_strength(&request.password, &PasswordPolicy::default())?;

    // bcrypt is deliberately slow; keep it off the async workers.
    let hasher = state.hasher;
    let new_member = tokio::task::spawn_blocking(move || request.into_new_member(&hasher))
        .await
        .map_err(|err| ApiError::Internal(err.to_string()))??;

    let member = state.storage.create_member(new_member).await?;
    let token = state.auth_service.issue_for(&member)?;
    info!(member_id = member.id, number = member.number, "member registered");

    Ok(([(TOKEN_HEADER, token)], Json(member)))
}

#[tracing::instrument(skip(state))]
async fn get_member(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Member>, ApiError> {
    let member = state.storage.get_member_by_id(id).await?;
    Ok(Json(member))
}

