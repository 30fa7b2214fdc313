use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{Storage, StorageError, StorageResult};
use crate::models::{Exercise, Member, NewMember};

#[derive(Debug, Default)]
struct Tables {
    members: Vec<Member>,
    exercises: Vec<Exercise>,
    next_member_id: i32,
}

/// In-process store with the same contract as the PostgreSQL adapter.
/// Row ids start at 1 like a SERIAL column.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    tables: RwLock<Tables>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn init(&self) -> StorageResult<()> {
        Ok(())
    }

    async fn create_member(&self, member: NewMember) -> StorageResult<Member> {
        let mut tables = self.tables.write().await;

        if tables.members.iter().any(|existing| existing.number == member.number) {
            return Err(StorageError::Duplicate(format!(
                "membership number {} already exists",
                member.number
            )));
        }

        tables.next_member_id += 1;
        let member = member.into_member(tables.next_member_id);
        tables.members.push(member.clone());
        Ok(member)
    }

    async fn get_members(&self) -> StorageResult<Vec<Member>> {
        Ok(self.tables.read().await.members.clone())
    }

    async fn get_member_by_id(&self, id: i32) -> StorageResult<Member> {
        self.tables
            .read()
            .await
            .members
            .iter()
            .find(|member| member.id == id)
            .cloned()
            .ok_or_else(|| StorageError::member_not_found(id))
    }

    async fn get_member_by_number(&self, number: i64) -> StorageResult<Member> {
        self.tables
            .read()
            .await
            .members
            .iter()
            .find(|member| member.number == number)
            .cloned()
            .ok_or_else(|| StorageError::member_not_found(number))
    }

    async fn create_exercise(&self, exercise: Exercise) -> StorageResult<Exercise> {
        self.tables.write().await.exercises.push(exercise.clone());
        Ok(exercise)
    }

    async fn get_exercises(&self) -> StorageResult<Vec<Exercise>> {
        Ok(self.tables.read().await.exercises.clone())
    }
}
