//! Book Queries

use uuid::Uuid;

use crate::domain::RawSearchParams;

/// 获取图书详情查询
#[derive(Debug, Clone)]
pub struct GetBook {
    pub book_id: Uuid,
}

/// 列出所有图书查询
#[derive(Debug, Clone)]
pub struct ListBooks;

/// 检索图书查询（参数未经校验，由处理器规范化）
#[derive(Debug, Clone)]
pub struct SearchBooks {
    pub params: RawSearchParams,
}
