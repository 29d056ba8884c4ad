//! Book Context - 图书限界上下文
//!
//! 职责:
//! - 图书聚合管理
//! - 标题、类型、页数等字段校验

mod aggregate;
mod errors;
mod value_objects;

pub use aggregate::{Book, BookDetails};
pub use errors::BookError;
pub use value_objects::{BookId, BookTitle, Genre, PageCount};
