//! Book Context - Aggregate Root

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{BookId, BookTitle, Genre, PageCount};
use crate::domain::author::AuthorId;

/// 图书的可选信息
///
/// 缺失的字段在统计时被排除，而不是按 0 计算
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDetails {
    pub genre: Option<Genre>,
    pub pages: Option<PageCount>,
    pub published_year: Option<i32>,
}

/// Book 聚合根
///
/// 不变量:
/// - 图书必须属于一个已存在的作者（由应用层在写入前检查）
/// - 书名非空
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    id: BookId,
    title: BookTitle,
    author_id: AuthorId,
    details: BookDetails,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Book {
    /// 创建新图书
    pub fn new(title: BookTitle, author_id: AuthorId, details: BookDetails) -> Self {
        let now = Utc::now();
        Self {
            id: BookId::new(),
            title,
            author_id,
            details,
            created_at: now,
            updated_at: now,
        }
    }

    /// 从持久化数据重建
    pub fn restore(
        id: BookId,
        title: BookTitle,
        author_id: AuthorId,
        details: BookDetails,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            author_id,
            details,
            created_at,
            updated_at,
        }
    }

    /// 整体替换可编辑字段
    pub fn revise(&mut self, title: BookTitle, author_id: AuthorId, details: BookDetails) {
        self.title = title;
        self.author_id = author_id;
        self.details = details;
        self.updated_at = Utc::now();
    }

    // Getters
    pub fn id(&self) -> &BookId {
        &self.id
    }

    pub fn title(&self) -> &BookTitle {
        &self.title
    }

    pub fn author_id(&self) -> &AuthorId {
        &self.author_id
    }

    pub fn genre(&self) -> Option<&Genre> {
        self.details.genre.as_ref()
    }

    pub fn pages(&self) -> Option<u32> {
        self.details.pages.map(|p| p.get())
    }

    pub fn published_year(&self) -> Option<i32> {
        self.details.published_year
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_creation() {
        let author_id = AuthorId::new();
        let book = Book::new(
            BookTitle::new("Cien años de soledad").unwrap(),
            author_id,
            BookDetails {
                genre: Genre::parse("Realismo mágico"),
                pages: Some(PageCount::new(417).unwrap()),
                published_year: Some(1967),
            },
        );

        assert_eq!(book.title().as_str(), "Cien años de soledad");
        assert_eq!(*book.author_id(), author_id);
        assert_eq!(book.genre().map(Genre::as_str), Some("Realismo mágico"));
        assert_eq!(book.pages(), Some(417));
        assert_eq!(book.published_year(), Some(1967));
        assert_eq!(book.created_at(), book.updated_at());
    }

    #[test]
    fn test_revise_replaces_details() {
        let mut book = Book::new(
            BookTitle::new("Borrador").unwrap(),
            AuthorId::new(),
            BookDetails::default(),
        );
        let id = *book.id();
        let other_author = AuthorId::new();

        book.revise(
            BookTitle::new("Final").unwrap(),
            other_author,
            BookDetails {
                genre: None,
                pages: Some(PageCount::new(120).unwrap()),
                published_year: None,
            },
        );

        assert_eq!(*book.id(), id);
        assert_eq!(book.title().as_str(), "Final");
        assert_eq!(*book.author_id(), other_author);
        assert_eq!(book.pages(), Some(120));
        assert_eq!(book.genre(), None);
    }
}
