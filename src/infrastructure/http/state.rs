//! Application State
//!
//! 包含所有 Command/Query Handlers 的应用状态

use std::sync::Arc;

use crate::application::{
    // Command handlers
    CreateAuthorHandler, CreateBookHandler, DeleteAuthorHandler, DeleteBookHandler,
    UpdateAuthorHandler, UpdateBookHandler,
    // Query handlers
    GetAuthorBooksHandler, GetAuthorHandler, GetAuthorStatsHandler, GetBookHandler,
    ListAuthorsHandler, ListBooksHandler, SearchBooksHandler,
    // Ports
    AuthorRepositoryPort, BookRepositoryPort,
};

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub author_repo: Arc<dyn AuthorRepositoryPort>,
    pub book_repo: Arc<dyn BookRepositoryPort>,

    // ========== Command Handlers ==========
    pub create_author_handler: CreateAuthorHandler,
    pub update_author_handler: UpdateAuthorHandler,
    pub delete_author_handler: DeleteAuthorHandler,
    pub create_book_handler: CreateBookHandler,
    pub update_book_handler: UpdateBookHandler,
    pub delete_book_handler: DeleteBookHandler,

    // ========== Query Handlers ==========
    pub get_author_handler: GetAuthorHandler,
    pub list_authors_handler: ListAuthorsHandler,
    pub get_author_books_handler: GetAuthorBooksHandler,
    pub get_author_stats_handler: GetAuthorStatsHandler,
    pub get_book_handler: GetBookHandler,
    pub list_books_handler: ListBooksHandler,
    pub search_books_handler: SearchBooksHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        author_repo: Arc<dyn AuthorRepositoryPort>,
        book_repo: Arc<dyn BookRepositoryPort>,
    ) -> Self {
        Self {
            // Ports
            author_repo: author_repo.clone(),
            book_repo: book_repo.clone(),

            // Command handlers
            create_author_handler: CreateAuthorHandler::new(author_repo.clone()),
            update_author_handler: UpdateAuthorHandler::new(author_repo.clone()),
            delete_author_handler: DeleteAuthorHandler::new(author_repo.clone()),
            create_book_handler: CreateBookHandler::new(author_repo.clone(), book_repo.clone()),
            update_book_handler: UpdateBookHandler::new(author_repo.clone(), book_repo.clone()),
            delete_book_handler: DeleteBookHandler::new(book_repo.clone()),

            // Query handlers
            get_author_handler: GetAuthorHandler::new(author_repo.clone()),
            list_authors_handler: ListAuthorsHandler::new(author_repo.clone()),
            get_author_books_handler: GetAuthorBooksHandler::new(
                author_repo.clone(),
                book_repo.clone(),
            ),
            get_author_stats_handler: GetAuthorStatsHandler::new(
                author_repo.clone(),
                book_repo.clone(),
            ),
            get_book_handler: GetBookHandler::new(book_repo.clone()),
            list_books_handler: ListBooksHandler::new(book_repo.clone()),
            search_books_handler: SearchBooksHandler::new(book_repo),
        }
    }
}
