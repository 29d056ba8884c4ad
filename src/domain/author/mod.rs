//! Author Context - 作者限界上下文
//!
//! 职责:
//! - 作者聚合管理
//! - 作者资料校验
//! - 作者图书统计

mod aggregate;
mod errors;
mod statistics;
mod value_objects;

pub use aggregate::{Author, AuthorProfile};
pub use errors::AuthorError;
pub use statistics::{AuthorStatistics, BookPages, BookYear};
pub use value_objects::{AuthorId, AuthorName, Email};
