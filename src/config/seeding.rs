use anyhow::{Context, Result};
use std::sync::Arc;

use crate::auth::PasswordHasher;
use crate::models::{CreateMemberRequest, Member};
use crate::storage::Storage;

pub struct DatabaseSeeder {
    storage: Arc<dyn Storage>,
    hasher: PasswordHasher,
}

impl DatabaseSeeder {
    pub fn new(storage: Arc<dyn Storage>, hasher: PasswordHasher) -> Self {
        Self { storage, hasher }
    }

    /// Insert the demo member and return it so its membership number can be
    /// reported.
    pub async fn seed_all(&self) -> Result<Vec<Member>> {
        tracing::info!("Starting database seeding...");

        let demo_members = vec![CreateMemberRequest {
            name: "reward".to_string(),
            age: 26,
            gender: "male".to_string(),
            height: 5.2,
            weight: 56.0,
            membership: "gold".to_string(),
            password: "cypher99".to_string(),
            personal_trainer: "goldie".to_string(),
        }];

        let mut seeded = Vec::with_capacity(demo_members.len());
        for request in demo_members {
            let hasher = self.hasher;
            let new_member = tokio::task::spawn_blocking(move || request.into_new_member(&hasher))
                .await
                .context("password hashing task failed")?
                .context("failed to hash demo member password")?;
            let member = self
                .storage
                .create_member(new_member)
                .await
                .context("failed to insert demo member")?;

            tracing::info!(number = member.number, "Created demo member");
            seeded.push(member);
        }

        tracing::info!("Database seeding completed!");
        Ok(seeded)
    }
}
