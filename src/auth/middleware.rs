use axum::{
    extract::{rejection::PathRejection, Path, Request, State},
    http::HeaderName,
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::auth::{AuthError, AuthService};

/// Header carrying the member token on protected routes
pub const TOKEN_HEADER: HeaderName = HeaderName::from_static("x-jwt-token");

/// Guards `/member/:id`: the token must belong to the member being read.
///
/// Every rejection produces the same 403; the reason is only logged. The
/// request is forwarded untouched on success.
pub async fn member_auth_middleware(
    State(auth_service): State<AuthService>,
    member_id: Result<Path<i32>, PathRejection>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = request
        .headers()
        .get(&TOKEN_HEADER)
        .and_then(|header| header.to_str().ok());
    let member_id = member_id.ok().map(|Path(id)| id);

    match auth_service.authorize_member(token, member_id).await {
        Ok(member) => {
            debug!(member_id = member.id, "member token accepted");
            Ok(next.run(request).await)
        }
        Err(err) => {
            warn!(reason = %err, path = %request.uri().path(), "rejected member request");
            Err(err)
        }
    }
}
