use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::auth::{Claims, TokenError};

/// The only algorithm tokens are signed and accepted with.
pub const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

/// Sign a token for a member, valid for `expires_in` from now
pub fn issue_token(member_number: i64, secret: &str, expires_in: Duration) -> Result<String, TokenError> {
    if secret.is_empty() {
        return Err(TokenError::Signing("signing secret is empty".to_string()));
    }

    let now = Utc::now();
    let claims = Claims {
        sub: member_number.to_string(),
        exp: (now + expires_in).timestamp(),
        iat: now.timestamp(),
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::new(TOKEN_ALGORITHM),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|err| TokenError::Signing(err.to_string()))
}

/// Verify signature, algorithm and expiry, then return the claims
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, TokenError> {
    if token.trim().is_empty() {
        return Err(TokenError::Malformed);
    }
    // Tokens signed with an empty key are forgeable by anyone.
    if secret.is_empty() {
        return Err(TokenError::InvalidSignature);
    }

    let mut validation = Validation::new(TOKEN_ALGORITHM);
    validation.leeway = 0;

    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|token_data| token_data.claims)
        .map_err(|err| match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::InvalidSignature,
            _ => TokenError::Malformed,
        })
}

/// Token issuer/validator handed to request handlers through application state
#[derive(Clone)]
pub struct JwtService {
    secret: String,
    expires_in: Duration,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("secret", &"[REDACTED]")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

impl JwtService {
    pub fn new(secret: impl Into<String>, expires_in: Duration) -> Self {
        Self {
            secret: secret.into(),
            expires_in,
        }
    }

    pub fn create_token(&self, member_number: i64) -> Result<String, TokenError> {
        issue_token(member_number, &self.secret, self.expires_in)
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, TokenError> {
        validate_token(token, &self.secret)
    }

    pub fn expires_in_seconds(&self) -> i64 {
        self.expires_in.num_seconds()
    }
}
