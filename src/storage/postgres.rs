use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::{debug, instrument};

use super::codec::{join_list, split_list};
use super::{Storage, StorageError, StorageResult};
use crate::models::{Exercise, Member, NewMember};

const CREATE_MEMBERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS members (
        id SERIAL PRIMARY KEY,
        number BIGINT NOT NULL UNIQUE,
        name VARCHAR(255) NOT NULL,
        age INT NOT NULL,
        gender VARCHAR(255) NOT NULL,
        height DOUBLE PRECISION NOT NULL,
        weight DOUBLE PRECISION NOT NULL,
        membership VARCHAR(255) NOT NULL,
        start_date TIMESTAMPTZ NOT NULL,
        end_date TIMESTAMPTZ,
        personal_trainer VARCHAR(50) NOT NULL,
        password_hash TEXT NOT NULL
    )
"#;

const CREATE_EXERCISES_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS exercises (
        id SERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        description VARCHAR(255) NOT NULL,
        muscle_groups TEXT NOT NULL,
        equipment TEXT NOT NULL,
        sets INT NOT NULL,
        reps INT NOT NULL
    )
"#;

const MEMBER_COLUMNS: &str = "id, number, name, age, gender, height, weight, membership, \
                              start_date, end_date, personal_trainer, password_hash";

/// Exercise row with its list columns still flattened
#[derive(Debug, Clone, FromRow)]
struct ExerciseRow {
    name: String,
    description: String,
    muscle_groups: String,
    equipment: String,
    sets: i32,
    reps: i32,
}

impl From<ExerciseRow> for Exercise {
    fn from(row: ExerciseRow) -> Self {
        Self {
            name: row.name,
            description: row.description,
            muscle_groups: split_list(&row.muscle_groups),
            equipment: split_list(&row.equipment),
            sets: row.sets,
            reps: row.reps,
        }
    }
}

/// PostgreSQL adapter. Every query runs under `query_timeout`.
#[derive(Debug, Clone)]
pub struct PostgresStorage {
    db: PgPool,
    query_timeout: Duration,
}

impl PostgresStorage {
    pub fn new(db: PgPool, query_timeout: Duration) -> Self {
        Self { db, query_timeout }
    }

    async fn with_deadline<T, F>(&self, query: F) -> StorageResult<T>
    where
        F: Future<Output = Result<T, sqlx::Error>> + Send,
    {
        match tokio::time::timeout(self.query_timeout, query).await {
            Ok(result) => result.map_err(StorageError::from),
            Err(_) => Err(StorageError::Timeout),
        }
    }
}

#[async_trait]
impl Storage for PostgresStorage {
    #[instrument(skip(self), name = "db_init_schema")]
    async fn init(&self) -> StorageResult<()> {
        self.with_deadline(sqlx::query(CREATE_MEMBERS_TABLE).execute(&self.db))
            .await?;
        self.with_deadline(sqlx::query(CREATE_EXERCISES_TABLE).execute(&self.db))
            .await?;

        debug!("schema initialized");
        Ok(())
    }

    #[instrument(skip(self, member), fields(number = member.number), name = "db_create_member")]
    async fn create_member(&self, member: NewMember) -> StorageResult<Member> {
        let query = format!(
            "INSERT INTO members
             (number, name, age, gender, height, weight, membership, start_date, end_date, personal_trainer, password_hash)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING {MEMBER_COLUMNS}"
        );

        self.with_deadline(
            sqlx::query_as::<_, Member>(&query)
                .bind(member.number)
                .bind(&member.name)
                .bind(member.age)
                .bind(&member.gender)
                .bind(member.height)
                .bind(member.weight)
                .bind(&member.membership)
                .bind(member.start_date)
                .bind(member.end_date)
                .bind(&member.personal_trainer)
                .bind(&member.password_hash)
                .fetch_one(&self.db),
        )
        .await
    }

    #[instrument(skip(self), name = "db_get_members")]
    async fn get_members(&self) -> StorageResult<Vec<Member>> {
        let query = format!("SELECT {MEMBER_COLUMNS} FROM members");

        self.with_deadline(sqlx::query_as::<_, Member>(&query).fetch_all(&self.db))
            .await
    }

    #[instrument(skip(self), name = "db_get_member_by_id")]
    async fn get_member_by_id(&self, id: i32) -> StorageResult<Member> {
        let query = format!("SELECT {MEMBER_COLUMNS} FROM members WHERE id = $1");

        self.with_deadline(
            sqlx::query_as::<_, Member>(&query)
                .bind(id)
                .fetch_optional(&self.db),
        )
        .await?
        .ok_or_else(|| StorageError::member_not_found(id))
    }

    #[instrument(skip(self), name = "db_get_member_by_number")]
    async fn get_member_by_number(&self, number: i64) -> StorageResult<Member> {
        let query = format!("SELECT {MEMBER_COLUMNS} FROM members WHERE number = $1");

        self.with_deadline(
            sqlx::query_as::<_, Member>(&query)
                .bind(number)
                .fetch_optional(&self.db),
        )
        .await?
        .ok_or_else(|| StorageError::member_not_found(number))
    }

    #[instrument(skip(self, exercise), fields(name = %exercise.name), name = "db_create_exercise")]
    async fn create_exercise(&self, exercise: Exercise) -> StorageResult<Exercise> {
        let row = self
            .with_deadline(
                sqlx::query_as::<_, ExerciseRow>(
                    "INSERT INTO exercises (name, description, muscle_groups, equipment, sets, reps)
                     VALUES ($1, $2, $3, $4, $5, $6)
                     RETURNING name, description, muscle_groups, equipment, sets, reps",
                )
                .bind(&exercise.name)
                .bind(&exercise.description)
                .bind(join_list(&exercise.muscle_groups))
                .bind(join_list(&exercise.equipment))
                .bind(exercise.sets)
                .bind(exercise.reps)
                .fetch_one(&self.db),
            )
            .await?;

        Ok(row.into())
    }

    #[instrument(skip(self), name = "db_get_exercises")]
    async fn get_exercises(&self) -> StorageResult<Vec<Exercise>> {
        let rows = self
            .with_deadline(
                sqlx::query_as::<_, ExerciseRow>(
                    "SELECT name, description, muscle_groups, equipment, sets, reps FROM exercises",
                )
                .fetch_all(&self.db),
            )
            .await?;

        Ok(rows.into_iter().map(Exercise::from).collect())
    }
}
