use bcrypt::{hash, verify, DEFAULT_COST};
use thiserror::Error;

/// bcrypt only looks at the first 72 bytes of its input.
const BCRYPT_MAX_INPUT: usize = 72;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Password must be at least {0} characters long")]
    TooShort(usize),
    #[error("Password must be no more than {0} bytes long")]
    TooLong(usize),
    #[error("Failed to hash password: {0}")]
    Hash(#[source] bcrypt::BcryptError),
    #[error("Failed to verify password: {0}")]
    Verify(#[source] bcrypt::BcryptError),
}

/// Password strength requirements checked at registration
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub max_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            max_length: BCRYPT_MAX_INPUT,
        }
    }
}

/// Validate password strength according to policy
pub fn validate_password_strength(password: &str, policy: &PasswordPolicy) -> Result<(), PasswordError> {
    if password.chars().count() < policy.min_length {
        return Err(PasswordError::TooShort(policy.min_length));
    }

    if password.len() > policy.max_length {
        return Err(PasswordError::TooLong(policy.max_length));
    }

    Ok(())
}

/// Hash a password using bcrypt with a fresh random salt
pub fn hash_password(password: &str, cost: u32) -> Result<String, PasswordError> {
    hash(password, cost).map_err(PasswordError::Hash)
}

/// Verify a password against its hash.
///
/// A mismatch is `Ok(false)`; only a malformed hash is an error.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    verify(password, hash).map_err(PasswordError::Verify)
}

/// Carries the bcrypt work factor so it can be raised through configuration
/// as hardware gets faster.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        hash_password(password, self.cost)
    }

    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        verify_password(password, hash)
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(DEFAULT_COST)
    }
}
