//! Author Queries

use uuid::Uuid;

/// 获取作者详情查询
#[derive(Debug, Clone)]
pub struct GetAuthor {
    pub author_id: Uuid,
}

/// 列出所有作者查询
#[derive(Debug, Clone)]
pub struct ListAuthors;

/// 获取作者图书查询
#[derive(Debug, Clone)]
pub struct GetAuthorBooks {
    pub author_id: Uuid,
}

/// 获取作者统计查询
#[derive(Debug, Clone)]
pub struct GetAuthorStats {
    pub author_id: Uuid,
}
