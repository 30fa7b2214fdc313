//! # Persistence
//!
//! Members and exercises live behind the [`Storage`] trait. [`PostgresStorage`]
//! is the production adapter; [`MemoryStorage`] backs tests and `--in-memory`
//! runs with the same contract.

pub mod codec;
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Exercise, Member, NewMember};

pub use memory::MemoryStorage;
pub use postgres::PostgresStorage;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("{entity} {key} not found")]
    NotFound { entity: &'static str, key: String },
    #[error("Duplicate record: {0}")]
    Duplicate(String),
    #[error("Query exceeded its deadline")]
    Timeout,
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),
}

impl StorageError {
    pub fn member_not_found(key: impl ToString) -> Self {
        Self::NotFound {
            entity: "member",
            key: key.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return StorageError::Duplicate(db_err.message().to_string());
            }
        }
        StorageError::Database(err)
    }
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Create/read operations over members and exercises.
///
/// No operation retries; failures reach the caller as-is.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Create the schema. Running it against an initialized store is a no-op.
    async fn init(&self) -> StorageResult<()>;

    /// Insert a member and return it with its assigned row id
    async fn create_member(&self, member: NewMember) -> StorageResult<Member>;

    /// All members, in no guaranteed order
    async fn get_members(&self) -> StorageResult<Vec<Member>>;

    async fn get_member_by_id(&self, id: i32) -> StorageResult<Member>;

    async fn get_member_by_number(&self, number: i64) -> StorageResult<Member>;

    async fn create_exercise(&self, exercise: Exercise) -> StorageResult<Exercise>;

    async fn get_exercises(&self) -> StorageResult<Vec<Exercise>>;
}
