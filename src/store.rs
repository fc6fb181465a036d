// src/store.rs

use std::time::Duration;

use async_trait::async_trait;
use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

use crate::{
    config::DB_CONNECT_RETRIES,
    error::AppError,
    models::question::{NewQuestion, PublicQuestion, Question},
};

/// Persistent question bank.
///
/// Every call goes to the backing store; nothing is cached.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Stores a question and returns its newly assigned id.
    async fn insert(&self, question: &NewQuestion) -> Result<i64, AppError>;

    /// All questions ordered by id, without the correct option.
    async fn get_all(&self) -> Result<Vec<PublicQuestion>, AppError>;

    /// The full record, or `None` when no question has this id.
    async fn get_by_id(&self, id: i64) -> Result<Option<Question>, AppError>;

    /// Removes every question. Safe to call on an empty store.
    async fn clear(&self) -> Result<(), AppError>;
}

/// SQLite-backed [`QuestionStore`].
#[derive(Clone)]
pub struct SqliteQuestionStore {
    pool: SqlitePool,
}

impl SqliteQuestionStore {
    /// Opens the database and applies pending migrations.
    pub async fn connect(database_url: &str) -> Result<Self, AppError> {
        let options: SqliteConnectOptions = database_url.parse()?;

        // An in-memory database lives and dies with its connection, so the pool
        // must hold exactly one that never expires.
        let in_memory = database_url.contains(":memory:");
        let pool_options = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(options)
            .await?;

        let store = Self::from_pool(pool);
        store.migrate().await?;
        Ok(store)
    }

    /// Like [`connect`](Self::connect), retrying while the database is not ready yet.
    pub async fn connect_with_retry(database_url: &str) -> Result<Self, AppError> {
        let mut retry_count = 0;
        loop {
            match Self::connect(database_url).await {
                Ok(store) => return Ok(store),
                Err(e) if retry_count < DB_CONNECT_RETRIES => {
                    retry_count += 1;
                    tracing::warn!(
                        "Database not ready ({}), retrying in 2s... (Attempt {})",
                        e,
                        retry_count
                    );
                    tokio::time::sleep(Duration::from_secs(2)).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Closes every pooled connection. Later calls fail with a storage error.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl QuestionStore for SqliteQuestionStore {
    async fn insert(&self, question: &NewQuestion) -> Result<i64, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO questions (question_text, option_a, option_b, option_c, option_d, correct_option)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&question.question_text)
        .bind(&question.option_a)
        .bind(&question.option_b)
        .bind(&question.option_c)
        .bind(&question.option_d)
        .bind(&question.correct_option)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert question: {:?}", e);
            AppError::from(e)
        })?;

        Ok(result.last_insert_rowid())
    }

    async fn get_all(&self) -> Result<Vec<PublicQuestion>, AppError> {
        let questions = sqlx::query_as::<_, PublicQuestion>(
            r#"
            SELECT id, question_text, option_a, option_b, option_c, option_d
            FROM questions
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch questions: {:?}", e);
            AppError::from(e)
        })?;

        Ok(questions)
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Question>, AppError> {
        let question = sqlx::query_as::<_, Question>(
            r#"
            SELECT id, question_text, option_a, option_b, option_c, option_d, correct_option
            FROM questions
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(question)
    }

    async fn clear(&self) -> Result<(), AppError> {
        sqlx::query("DELETE FROM questions")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
