//! SQLite Persistence - SQLite 数据库持久化实现

mod author_repo;
mod book_repo;
mod database;

pub use author_repo::*;
pub use book_repo::*;
pub use database::{create_pool, run_migrations, DatabaseConfig, DbPool};
