//! Book Commands

use uuid::Uuid;

/// 创建图书命令
#[derive(Debug, Clone)]
pub struct CreateBook {
    pub title: String,
    pub genre: Option<String>,
    pub pages: Option<i64>,
    pub published_year: Option<i32>,
    pub author_id: Uuid,
}

/// 更新图书命令（整体替换）
#[derive(Debug, Clone)]
pub struct UpdateBook {
    pub book_id: Uuid,
    pub title: String,
    pub genre: Option<String>,
    pub pages: Option<i64>,
    pub published_year: Option<i32>,
    pub author_id: Uuid,
}

/// 删除图书命令
#[derive(Debug, Clone)]
pub struct DeleteBook {
    pub book_id: Uuid,
}
