//! Book Context - Value Objects

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::BookError;

/// 图书唯一标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookId(Uuid);

impl BookId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for BookId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 书名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookTitle(String);

impl BookTitle {
    pub const MAX_CHARS: usize = 300;

    pub fn new(title: impl Into<String>) -> Result<Self, BookError> {
        let title = title.into().trim().to_string();
        if title.is_empty() {
            return Err(BookError::InvalidTitle("书名不能为空"));
        }
        if title.chars().count() > Self::MAX_CHARS {
            return Err(BookError::InvalidTitle("书名长度不能超过300字符"));
        }
        Ok(Self(title))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BookTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 图书类型
///
/// 空串或纯空白视为"没有类型"，因此只能通过 `parse` 得到 `Option<Genre>`。
/// 原值保留（不做大小写或空白折叠），按类型筛选是精确匹配。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Genre(String);

impl Genre {
    pub fn parse(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// 页数（非负）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PageCount(u32);

impl PageCount {
    pub fn new(pages: i64) -> Result<Self, BookError> {
        u32::try_from(pages)
            .map(Self)
            .map_err(|_| BookError::InvalidPages(pages))
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_rejects_blank() {
        assert!(BookTitle::new("").is_err());
        assert!(BookTitle::new(" \t ").is_err());
        assert_eq!(BookTitle::new(" Rayuela ").unwrap().as_str(), "Rayuela");
    }

    #[test]
    fn test_blank_genre_is_absent() {
        assert_eq!(Genre::parse(""), None);
        assert_eq!(Genre::parse("   "), None);
        assert_eq!(Genre::parse("Novela").unwrap().as_str(), "Novela");
    }

    #[test]
    fn test_page_count_bounds() {
        assert_eq!(PageCount::new(0).unwrap().get(), 0);
        assert_eq!(PageCount::new(417).unwrap().get(), 417);
        assert!(PageCount::new(-1).is_err());
        assert!(PageCount::new(i64::from(u32::MAX) + 1).is_err());
    }
}
