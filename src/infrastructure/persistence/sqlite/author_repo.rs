//! SQLite Author Repository

use async_trait::async_trait;
use sqlx::FromRow;
use uuid::Uuid;

use super::database::{database_error, format_timestamp, parse_timestamp, parse_uuid};
use super::DbPool;
use crate::application::ports::{AuthorRecord, AuthorRepositoryPort, RepositoryError};

const AUTHOR_COLUMNS: &str =
    "id, name, email, bio, nationality, birth_year, created_at, updated_at";

/// SQLite Author Repository
pub struct SqliteAuthorRepository {
    pool: DbPool,
}

impl SqliteAuthorRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct AuthorRow {
    id: String,
    name: String,
    email: String,
    bio: Option<String>,
    nationality: Option<String>,
    birth_year: Option<i64>,
    created_at: String,
    updated_at: String,
}

impl TryFrom<AuthorRow> for AuthorRecord {
    type Error = RepositoryError;

    fn try_from(row: AuthorRow) -> Result<Self, Self::Error> {
        Ok(AuthorRecord {
            id: parse_uuid(&row.id)?,
            name: row.name,
            email: row.email,
            bio: row.bio,
            nationality: row.nationality,
            birth_year: row
                .birth_year
                .map(i32::try_from)
                .transpose()
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

#[async_trait]
impl AuthorRepositoryPort for SqliteAuthorRepository {
    async fn save(&self, author: &AuthorRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO authors (id, name, name_folded, email, bio, nationality, birth_year, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                name_folded = excluded.name_folded,
                email = excluded.email,
                bio = excluded.bio,
                nationality = excluded.nationality,
                birth_year = excluded.birth_year,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(author.id.to_string())
        .bind(&author.name)
        .bind(author.name.to_lowercase())
        .bind(&author.email)
        .bind(&author.bio)
        .bind(&author.nationality)
        .bind(author.birth_year)
        .bind(format_timestamp(&author.created_at))
        .bind(format_timestamp(&author.updated_at))
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<AuthorRecord>, RepositoryError> {
        let row: Option<AuthorRow> = sqlx::query_as(&format!(
            "SELECT {} FROM authors WHERE id = ?",
            AUTHOR_COLUMNS
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(AuthorRecord::try_from).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<AuthorRecord>, RepositoryError> {
        let row: Option<AuthorRow> = sqlx::query_as(&format!(
            "SELECT {} FROM authors WHERE email = ?",
            AUTHOR_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(AuthorRecord::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<AuthorRecord>, RepositoryError> {
        let rows: Vec<AuthorRow> = sqlx::query_as(&format!(
            "SELECT {} FROM authors ORDER BY created_at DESC, id",
            AUTHOR_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(AuthorRecord::try_from).collect()
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        // 使用事务确保原子性
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        // 删除作者的图书
        sqlx::query("DELETE FROM books WHERE author_id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(database_error)?;

        // 删除 author
        sqlx::query("DELETE FROM authors WHERE id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(database_error)?;

        tx.commit().await.map_err(database_error)?;

        Ok(())
    }
}
