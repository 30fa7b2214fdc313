use std::sync::Arc;

use tracing::{debug, instrument};

use crate::auth::{AuthError, JwtService, LoginRequest, LoginResponse, PasswordHasher};
use crate::models::Member;
use crate::storage::Storage;

#[derive(Clone)]
pub struct AuthService {
    jwt_service: JwtService,
    hasher: PasswordHasher,
    storage: Arc<dyn Storage>,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("jwt_service", &self.jwt_service)
            .field("hasher", &self.hasher)
            .finish_non_exhaustive()
    }
}

impl AuthService {
    pub fn new(storage: Arc<dyn Storage>, jwt_service: JwtService, hasher: PasswordHasher) -> Self {
        Self {
            jwt_service,
            hasher,
            storage,
        }
    }

    pub fn jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }

    /// Mint a token for a freshly registered or logged-in member
    pub fn issue_for(&self, member: &Member) -> Result<String, AuthError> {
        self.jwt_service
            .create_token(member.number)
            .map_err(AuthError::Issue)
    }

    /// Exchange a membership number and password for a token
    #[instrument(skip(self, request), fields(number = request.number))]
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AuthError> {
        let member = match self.storage.get_member_by_number(request.number).await {
            Ok(member) => member,
            Err(err) if err.is_not_found() => return Err(AuthError::InvalidCredentials),
            Err(err) => return Err(AuthError::Storage(err)),
        };

        let hasher = self.hasher;
        let password = request.password;
        let hash = member.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|err| AuthError::Task(err.to_string()))??;
        if !matches {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.issue_for(&member)?;
        debug!("member logged in");

        Ok(LoginResponse {
            number: member.number,
            token,
            expires_in: self.jwt_service.expires_in_seconds(),
        })
    }

    /// Decide whether `token` grants access to the member stored under row `id`.
    ///
    /// The token must be valid and its subject must be that member's
    /// membership number. `member_id` is `None` when the path did not parse.
    pub async fn authorize_member(
        &self,
        token: Option<&str>,
        member_id: Option<i32>,
    ) -> Result<Member, AuthError> {
        let token = token.ok_or(AuthError::MissingToken)?;
        let claims = self.jwt_service.validate_token(token)?;
        let claimed = claims.member_number()?;

        let member_id = member_id.ok_or(AuthError::InvalidMemberId)?;
        let member = match self.storage.get_member_by_id(member_id).await {
            Ok(member) => member,
            Err(err) if err.is_not_found() => return Err(AuthError::MemberNotFound(member_id)),
            Err(err) => return Err(AuthError::MemberLookup(err)),
        };

        if member.number != claimed {
            return Err(AuthError::IdentityMismatch {
                claimed,
                actual: member.number,
            });
        }

        Ok(member)
    }
}
