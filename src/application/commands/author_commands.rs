//! Author Commands

use uuid::Uuid;

/// 创建作者命令
#[derive(Debug, Clone)]
pub struct CreateAuthor {
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub nationality: Option<String>,
    pub birth_year: Option<i32>,
}

/// 更新作者命令（整体替换）
#[derive(Debug, Clone)]
pub struct UpdateAuthor {
    pub author_id: Uuid,
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub nationality: Option<String>,
    pub birth_year: Option<i32>,
}

/// 删除作者命令（连同其图书）
#[derive(Debug, Clone)]
pub struct DeleteAuthor {
    pub author_id: Uuid,
}
