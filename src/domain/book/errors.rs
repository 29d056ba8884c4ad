//! Book Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BookError {
    #[error("无效的书名: {0}")]
    InvalidTitle(&'static str),

    #[error("无效的页数: {0}")]
    InvalidPages(i64),
}
