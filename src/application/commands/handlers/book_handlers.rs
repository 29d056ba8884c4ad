//! Book Command Handlers

use std::sync::Arc;
use uuid::Uuid;

use crate::application::commands::{CreateBook, DeleteBook, UpdateBook};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    AuthorRepositoryPort, AuthorSummary, BookRecord, BookRepositoryPort, BookWithAuthor,
};
use crate::application::queries::handlers::BookResponse;
use crate::domain::author::AuthorId;
use crate::domain::book::{Book, BookDetails, BookTitle, Genre, PageCount};

fn book_details(
    genre: Option<String>,
    pages: Option<i64>,
    published_year: Option<i32>,
) -> Result<BookDetails, ApplicationError> {
    Ok(BookDetails {
        genre: genre.map(|g| g.trim().to_string()).and_then(Genre::parse),
        pages: pages.map(PageCount::new).transpose()?,
        published_year,
    })
}

/// 图书必须挂在已存在的作者名下
async fn require_author(
    author_repo: &dyn AuthorRepositoryPort,
    author_id: Uuid,
) -> Result<AuthorSummary, ApplicationError> {
    let author = author_repo
        .find_by_id(author_id)
        .await?
        .ok_or_else(|| ApplicationError::not_found("Author", author_id))?;

    Ok(AuthorSummary {
        id: author.id,
        name: author.name,
    })
}

// ============================================================================
// CreateBook
// ============================================================================

/// CreateBook Handler
pub struct CreateBookHandler {
    author_repo: Arc<dyn AuthorRepositoryPort>,
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl CreateBookHandler {
    pub fn new(
        author_repo: Arc<dyn AuthorRepositoryPort>,
        book_repo: Arc<dyn BookRepositoryPort>,
    ) -> Self {
        Self {
            author_repo,
            book_repo,
        }
    }

    pub async fn handle(&self, command: CreateBook) -> Result<BookResponse, ApplicationError> {
        let title = BookTitle::new(command.title)?;
        let details = book_details(command.genre, command.pages, command.published_year)?;
        let author = require_author(self.author_repo.as_ref(), command.author_id).await?;

        let book = Book::new(title, AuthorId::from_uuid(author.id), details);
        let record = BookRecord::from(&book);
        self.book_repo.save(&record).await?;

        tracing::info!(
            book_id = %book.id(),
            author_id = %author.id,
            title = %book.title(),
            "Book created"
        );

        Ok(BookResponse::from(BookWithAuthor {
            book: record,
            author,
        }))
    }
}

// ============================================================================
// UpdateBook
// ============================================================================

/// UpdateBook Handler
pub struct UpdateBookHandler {
    author_repo: Arc<dyn AuthorRepositoryPort>,
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl UpdateBookHandler {
    pub fn new(
        author_repo: Arc<dyn AuthorRepositoryPort>,
        book_repo: Arc<dyn BookRepositoryPort>,
    ) -> Self {
        Self {
            author_repo,
            book_repo,
        }
    }

    pub async fn handle(&self, command: UpdateBook) -> Result<BookResponse, ApplicationError> {
        let book_id = command.book_id;

        let existing = self
            .book_repo
            .find_by_id(book_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Book", book_id))?;

        let title = BookTitle::new(command.title)?;
        let details = book_details(command.genre, command.pages, command.published_year)?;
        let author = require_author(self.author_repo.as_ref(), command.author_id).await?;

        let mut book = Book::try_from(existing.book)?;
        book.revise(title, AuthorId::from_uuid(author.id), details);

        let record = BookRecord::from(&book);
        self.book_repo.save(&record).await?;

        tracing::info!(book_id = %book_id, title = %book.title(), "Book updated");

        Ok(BookResponse::from(BookWithAuthor {
            book: record,
            author,
        }))
    }
}

// ============================================================================
// DeleteBook
// ============================================================================

/// DeleteBook Handler
pub struct DeleteBookHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl DeleteBookHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { book_repo }
    }

    pub async fn handle(&self, command: DeleteBook) -> Result<(), ApplicationError> {
        let book_id = command.book_id;

        let existing = self
            .book_repo
            .find_by_id(book_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Book", book_id))?;

        self.book_repo.delete(book_id).await?;

        tracing::info!(book_id = %book_id, title = %existing.book.title, "Book deleted");

        Ok(())
    }
}
