//! Author Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthorError {
    #[error("无效的作者姓名: {0}")]
    InvalidName(&'static str),

    #[error("无效的邮箱: {0}")]
    InvalidEmail(&'static str),

    #[error("无效的出生年份: {0}")]
    InvalidBirthYear(i32),
}
