//! Domain Layer - 领域层
//!
//! 包含两个限界上下文:
//! - Author Context: 作者管理与作者统计
//! - Book Context: 图书管理
//!
//! 以及共享的图书检索参数规范化

pub mod author;
pub mod book;

// 共享的检索参数规范化
mod search;

pub use search::{
    BookFilter, BookSearch, Pagination, RawSearchParams, SortField, SortOrder, DEFAULT_LIMIT,
    MAX_LIMIT,
};
