use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::auth::{PasswordError, PasswordHasher};

/// Membership numbers are six digits.
const MEMBER_NUMBER_RANGE: std::ops::Range<i64> = 100_000..1_000_000;

/// A gym member as stored. The credential hash never leaves the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Member {
    pub id: i32,
    #[serde(rename = "membership_no")]
    pub number: i64,
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub height: f64,
    pub weight: f64,
    pub membership: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub personal_trainer: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
}

/// A member that has not been stored yet and so has no row id
#[derive(Debug, Clone, PartialEq)]
pub struct NewMember {
    pub number: i64,
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub height: f64,
    pub weight: f64,
    pub membership: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub personal_trainer: String,
    pub password_hash: String,
}

impl NewMember {
    /// Attach the storage-assigned row id
    pub fn into_member(self, id: i32) -> Member {
        Member {
            id,
            number: self.number,
            name: self.name,
            age: self.age,
            gender: self.gender,
            height: self.height,
            weight: self.weight,
            membership: self.membership,
            start_date: self.start_date,
            end_date: self.end_date,
            personal_trainer: self.personal_trainer,
            password_hash: self.password_hash,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMemberRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,

    #[validate(range(min = 0, max = 150, message = "Age must be between 0 and 150"))]
    pub age: i32,

    #[validate(length(max = 255))]
    pub gender: String,

    #[validate(range(min = 0.0, message = "Height cannot be negative"))]
    pub height: f64,

    #[validate(range(min = 0.0, message = "Weight cannot be negative"))]
    pub weight: f64,

    #[validate(length(min = 1, max = 255, message = "Membership tier is required"))]
    pub membership: String,

    pub password: String,

    #[serde(default)]
    #[validate(length(max = 50, message = "Trainer name cannot exceed 50 characters"))]
    pub personal_trainer: String,
}

impl CreateMemberRequest {
    /// Hash the password and assign a fresh membership number. Enrollment
    /// starts now and stays open-ended.
    pub fn into_new_member(self, hasher: &PasswordHasher) -> Result<NewMember, PasswordError> {
        let password_hash = hasher.hash(&self.password)?;

        Ok(NewMember {
            number: generate_member_number(),
            name: self.name,
            age: self.age,
            gender: self.gender,
            height: self.height,
            weight: self.weight,
            membership: self.membership,
            start_date: Utc::now(),
            end_date: None,
            personal_trainer: self.personal_trainer,
            password_hash,
        })
    }
}

/// Random six-digit membership number. Uniqueness is enforced by storage.
pub fn generate_member_number() -> i64 {
    rand::thread_rng().gen_range(MEMBER_NUMBER_RANGE)
}
