//! Author Query Handlers

use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::error::ApplicationError;
use crate::application::ports::{
    AuthorRecord, AuthorRepositoryPort, AuthorSummary, BookRecord, BookRepositoryPort,
    BookWithAuthor,
};
use crate::application::queries::{GetAuthor, GetAuthorBooks, GetAuthorStats, ListAuthors};
use crate::domain::author::{AuthorId, AuthorStatistics};
use crate::domain::book::Book;

use super::BookResponse;

// ============================================================================
// Response DTOs
// ============================================================================

/// 作者详情响应
#[derive(Debug, Clone)]
pub struct AuthorResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub nationality: Option<String>,
    pub birth_year: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AuthorRecord> for AuthorResponse {
    fn from(record: AuthorRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            email: record.email,
            bio: record.bio,
            nationality: record.nationality,
            birth_year: record.birth_year,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// 作者图书列表响应
#[derive(Debug, Clone)]
pub struct AuthorBooksResponse {
    pub author_id: Uuid,
    pub author_name: String,
    pub books: Vec<BookResponse>,
}

// ============================================================================
// Handlers
// ============================================================================

/// GetAuthor Handler
pub struct GetAuthorHandler {
    author_repo: Arc<dyn AuthorRepositoryPort>,
}

impl GetAuthorHandler {
    pub fn new(author_repo: Arc<dyn AuthorRepositoryPort>) -> Self {
        Self { author_repo }
    }

    pub async fn handle(&self, query: GetAuthor) -> Result<AuthorResponse, ApplicationError> {
        let author = self
            .author_repo
            .find_by_id(query.author_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Author", query.author_id))?;

        Ok(AuthorResponse::from(author))
    }
}

/// ListAuthors Handler
pub struct ListAuthorsHandler {
    author_repo: Arc<dyn AuthorRepositoryPort>,
}

impl ListAuthorsHandler {
    pub fn new(author_repo: Arc<dyn AuthorRepositoryPort>) -> Self {
        Self { author_repo }
    }

    pub async fn handle(
        &self,
        _query: ListAuthors,
    ) -> Result<Vec<AuthorResponse>, ApplicationError> {
        let authors = self.author_repo.find_all().await?;
        Ok(authors.into_iter().map(AuthorResponse::from).collect())
    }
}

/// GetAuthorBooks Handler
pub struct GetAuthorBooksHandler {
    author_repo: Arc<dyn AuthorRepositoryPort>,
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl GetAuthorBooksHandler {
    pub fn new(
        author_repo: Arc<dyn AuthorRepositoryPort>,
        book_repo: Arc<dyn BookRepositoryPort>,
    ) -> Self {
        Self {
            author_repo,
            book_repo,
        }
    }

    pub async fn handle(
        &self,
        query: GetAuthorBooks,
    ) -> Result<AuthorBooksResponse, ApplicationError> {
        let author = self
            .author_repo
            .find_by_id(query.author_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Author", query.author_id))?;

        let summary = AuthorSummary {
            id: author.id,
            name: author.name.clone(),
        };
        let books = self
            .book_repo
            .find_by_author(author.id)
            .await?
            .into_iter()
            .map(|book| {
                BookResponse::from(BookWithAuthor {
                    book,
                    author: summary.clone(),
                })
            })
            .collect();

        Ok(AuthorBooksResponse {
            author_id: author.id,
            author_name: author.name,
            books,
        })
    }
}

/// GetAuthorStats Handler - 加载作者全部图书后计算统计
pub struct GetAuthorStatsHandler {
    author_repo: Arc<dyn AuthorRepositoryPort>,
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl GetAuthorStatsHandler {
    pub fn new(
        author_repo: Arc<dyn AuthorRepositoryPort>,
        book_repo: Arc<dyn BookRepositoryPort>,
    ) -> Self {
        Self {
            author_repo,
            book_repo,
        }
    }

    pub async fn handle(
        &self,
        query: GetAuthorStats,
    ) -> Result<AuthorStatistics, ApplicationError> {
        let author = self
            .author_repo
            .find_by_id(query.author_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Author", query.author_id))?;

        let records: Vec<BookRecord> = self.book_repo.find_by_author(author.id).await?;
        let books = records
            .into_iter()
            .map(Book::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let stats = AuthorStatistics::compute(AuthorId::from_uuid(author.id), author.name, &books);

        tracing::debug!(
            author_id = %author.id,
            total_books = stats.total_books,
            genres = stats.genres.len(),
            "Author statistics computed"
        );

        Ok(stats)
    }
}
