//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口
//! 具体实现在 infrastructure 层（如 SQLite）

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::author::{Author, AuthorId, AuthorName, AuthorProfile, Email};
use crate::domain::book::{Book, BookDetails, BookId, BookTitle, Genre, PageCount};
use crate::domain::{BookFilter, SortField, SortOrder};

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// ============================================================================
// Author Repository
// ============================================================================

/// 作者实体（用于持久化）
#[derive(Debug, Clone)]
pub struct AuthorRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub nationality: Option<String>,
    pub birth_year: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Author> for AuthorRecord {
    fn from(author: &Author) -> Self {
        Self {
            id: *author.id().as_uuid(),
            name: author.name().as_str().to_string(),
            email: author.email().as_str().to_string(),
            bio: author.profile().bio().map(str::to_string),
            nationality: author.profile().nationality().map(str::to_string),
            birth_year: author.profile().birth_year(),
            created_at: author.created_at(),
            updated_at: author.updated_at(),
        }
    }
}

impl TryFrom<AuthorRecord> for Author {
    type Error = RepositoryError;

    fn try_from(record: AuthorRecord) -> Result<Self, Self::Error> {
        let corrupt = |e: crate::domain::author::AuthorError| {
            RepositoryError::SerializationError(format!("author {}: {}", record.id, e))
        };

        Ok(Author::restore(
            AuthorId::from_uuid(record.id),
            AuthorName::new(record.name.clone()).map_err(corrupt)?,
            Email::new(record.email.clone()).map_err(corrupt)?,
            AuthorProfile::new(record.bio.clone(), record.nationality.clone(), record.birth_year)
                .map_err(corrupt)?,
            record.created_at,
            record.updated_at,
        ))
    }
}

/// Author Repository Port
#[async_trait]
pub trait AuthorRepositoryPort: Send + Sync {
    /// 保存作者（存在则更新）
    async fn save(&self, author: &AuthorRecord) -> Result<(), RepositoryError>;

    /// 根据 ID 查找作者
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AuthorRecord>, RepositoryError>;

    /// 根据邮箱查找作者
    async fn find_by_email(&self, email: &str) -> Result<Option<AuthorRecord>, RepositoryError>;

    /// 获取所有作者
    async fn find_all(&self) -> Result<Vec<AuthorRecord>, RepositoryError>;

    /// 删除作者及其全部图书
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}

// ============================================================================
// Book Repository
// ============================================================================

/// 图书实体（用于持久化）
#[derive(Debug, Clone)]
pub struct BookRecord {
    pub id: Uuid,
    pub title: String,
    pub genre: Option<String>,
    pub pages: Option<i64>,
    pub published_year: Option<i32>,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Book> for BookRecord {
    fn from(book: &Book) -> Self {
        Self {
            id: *book.id().as_uuid(),
            title: book.title().as_str().to_string(),
            genre: book.genre().map(|g| g.as_str().to_string()),
            pages: book.pages().map(i64::from),
            published_year: book.published_year(),
            author_id: *book.author_id().as_uuid(),
            created_at: book.created_at(),
            updated_at: book.updated_at(),
        }
    }
}

impl TryFrom<BookRecord> for Book {
    type Error = RepositoryError;

    fn try_from(record: BookRecord) -> Result<Self, Self::Error> {
        let corrupt = |e: crate::domain::book::BookError| {
            RepositoryError::SerializationError(format!("book {}: {}", record.id, e))
        };

        let details = BookDetails {
            genre: record.genre.clone().and_then(Genre::parse),
            pages: record.pages.map(PageCount::new).transpose().map_err(corrupt)?,
            published_year: record.published_year,
        };

        Ok(Book::restore(
            BookId::from_uuid(record.id),
            BookTitle::new(record.title.clone()).map_err(corrupt)?,
            AuthorId::from_uuid(record.author_id),
            details,
            record.created_at,
            record.updated_at,
        ))
    }
}

/// 图书所属作者的摘要
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorSummary {
    pub id: Uuid,
    pub name: String,
}

/// 图书 + 作者摘要（联表查询结果）
#[derive(Debug, Clone)]
pub struct BookWithAuthor {
    pub book: BookRecord,
    pub author: AuthorSummary,
}

/// Book Repository Port
#[async_trait]
pub trait BookRepositoryPort: Send + Sync {
    /// 保存图书（存在则更新）
    async fn save(&self, book: &BookRecord) -> Result<(), RepositoryError>;

    /// 根据 ID 查找图书
    async fn find_by_id(&self, id: Uuid) -> Result<Option<BookWithAuthor>, RepositoryError>;

    /// 获取所有图书
    async fn find_all(&self) -> Result<Vec<BookWithAuthor>, RepositoryError>;

    /// 获取作者的所有图书
    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<BookRecord>, RepositoryError>;

    /// 统计符合条件的图书数量
    async fn count(&self, filter: &BookFilter) -> Result<u64, RepositoryError>;

    /// 按条件检索图书（排序 + 分页）
    async fn search(
        &self,
        filter: &BookFilter,
        sort_by: SortField,
        order: SortOrder,
        skip: u64,
        limit: u32,
    ) -> Result<Vec<BookWithAuthor>, RepositoryError>;

    /// 删除图书
    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, genre: Option<&str>, pages: Option<i64>) -> BookRecord {
        let now = Utc::now();
        BookRecord {
            id: Uuid::new_v4(),
            title: title.to_string(),
            genre: genre.map(str::to_string),
            pages,
            published_year: Some(1963),
            author_id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_book_record_round_trip() {
        let original = record("Rayuela", Some("Novela"), Some(600));
        let book = Book::try_from(original.clone()).unwrap();
        let back = BookRecord::from(&book);

        assert_eq!(back.id, original.id);
        assert_eq!(back.title, original.title);
        assert_eq!(back.genre, original.genre);
        assert_eq!(back.pages, original.pages);
        assert_eq!(back.published_year, original.published_year);
        assert_eq!(back.author_id, original.author_id);
    }

    #[test]
    fn test_blank_stored_genre_restores_as_absent() {
        let book = Book::try_from(record("Rayuela", Some("  "), None)).unwrap();
        assert_eq!(book.genre(), None);
    }

    #[test]
    fn test_negative_stored_pages_is_corrupt() {
        let result = Book::try_from(record("Rayuela", None, Some(-4)));
        assert!(matches!(result, Err(RepositoryError::SerializationError(_))));
    }
}
