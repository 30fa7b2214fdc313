use serde::{Deserialize, Serialize};

use crate::auth::TokenError;

/// JWT token claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Membership number
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

impl Claims {
    /// Membership number the token was issued for
    pub fn member_number(&self) -> Result<i64, TokenError> {
        self.sub.parse().map_err(|_| TokenError::Malformed)
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub number: i64,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub number: i64,
    pub token: String,
    pub expires_in: i64,
}
