//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（AuthorRepository、BookRepository）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{
    // Author commands
    CreateAuthor,
    DeleteAuthor,
    UpdateAuthor,
    // Book commands
    CreateBook,
    DeleteBook,
    UpdateBook,
    // Handlers
    handlers::{
        CreateAuthorHandler, CreateBookHandler, DeleteAuthorHandler, DeleteBookHandler,
        UpdateAuthorHandler, UpdateBookHandler,
    },
};

pub use error::ApplicationError;

pub use ports::{
    AuthorRecord, AuthorRepositoryPort, AuthorSummary, BookRecord, BookRepositoryPort,
    BookWithAuthor, RepositoryError,
};

pub use queries::{
    // Author queries
    GetAuthor,
    GetAuthorBooks,
    GetAuthorStats,
    ListAuthors,
    // Book queries
    GetBook,
    ListBooks,
    SearchBooks,
    // Handlers
    handlers::{
        AuthorBooksResponse, AuthorResponse, BookResponse, GetAuthorBooksHandler,
        GetAuthorHandler, GetAuthorStatsHandler, GetBookHandler, ListAuthorsHandler,
        ListBooksHandler, SearchBooksHandler, SearchBooksResponse,
    },
};
