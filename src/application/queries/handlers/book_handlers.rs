//! Book Query Handlers

use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::application::error::ApplicationError;
use crate::application::ports::{AuthorSummary, BookRepositoryPort, BookWithAuthor};
use crate::application::queries::{GetBook, ListBooks, SearchBooks};
use crate::domain::{BookSearch, Pagination};

// ============================================================================
// Response DTOs
// ============================================================================

/// 图书响应（含作者摘要）
#[derive(Debug, Clone)]
pub struct BookResponse {
    pub id: Uuid,
    pub title: String,
    pub genre: Option<String>,
    pub pages: Option<i64>,
    pub published_year: Option<i32>,
    pub author_id: Uuid,
    pub author: AuthorSummary,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BookWithAuthor> for BookResponse {
    fn from(row: BookWithAuthor) -> Self {
        let BookWithAuthor { book, author } = row;
        Self {
            id: book.id,
            title: book.title,
            genre: book.genre,
            pages: book.pages,
            published_year: book.published_year,
            author_id: book.author_id,
            author,
            created_at: book.created_at,
            updated_at: book.updated_at,
        }
    }
}

/// 检索结果（当前页 + 分页信息）
#[derive(Debug, Clone)]
pub struct SearchBooksResponse {
    pub books: Vec<BookResponse>,
    pub pagination: Pagination,
}

// ============================================================================
// Handlers
// ============================================================================

/// GetBook Handler
pub struct GetBookHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl GetBookHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { book_repo }
    }

    pub async fn handle(&self, query: GetBook) -> Result<BookResponse, ApplicationError> {
        let book = self
            .book_repo
            .find_by_id(query.book_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Book", query.book_id))?;

        Ok(BookResponse::from(book))
    }
}

/// ListBooks Handler
pub struct ListBooksHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl ListBooksHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { book_repo }
    }

    pub async fn handle(&self, _query: ListBooks) -> Result<Vec<BookResponse>, ApplicationError> {
        let books = self.book_repo.find_all().await?;
        Ok(books.into_iter().map(BookResponse::from).collect())
    }
}

/// SearchBooks Handler - 规范化参数，统计总数并取当前页
pub struct SearchBooksHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl SearchBooksHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { book_repo }
    }

    pub async fn handle(
        &self,
        query: SearchBooks,
    ) -> Result<SearchBooksResponse, ApplicationError> {
        let search = BookSearch::normalize(&query.params);

        // 总数与当前页互不依赖，并发查询
        let (total, rows) = tokio::try_join!(
            self.book_repo.count(&search.filter),
            self.book_repo.search(
                &search.filter,
                search.sort_by,
                search.order,
                search.skip,
                search.limit,
            ),
        )?;

        let pagination = search.pagination(total);

        tracing::debug!(
            page = search.page,
            limit = search.limit,
            sort_by = search.sort_by.as_str(),
            order = search.order.as_str(),
            total = total,
            returned = rows.len(),
            "Books searched"
        );

        Ok(SearchBooksResponse {
            books: rows.into_iter().map(BookResponse::from).collect(),
            pagination,
        })
    }
}
