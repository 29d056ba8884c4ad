//! Data Transfer Objects
//!
//! JSON 字段统一使用 camelCase

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::application::{
    AuthorBooksResponse, AuthorResponse, AuthorSummary, BookResponse, SearchBooksResponse,
};
use crate::domain::author::{AuthorStatistics, BookPages, BookYear};
use crate::domain::Pagination;

/// 与浏览器 `Date.toISOString()` 一致的时间格式
fn iso_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

// ============================================================================
// Author DTOs
// ============================================================================

/// 创建 / 更新作者请求体
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRequest {
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub nationality: Option<String>,
    pub birth_year: Option<i32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub nationality: Option<String>,
    pub birth_year: Option<i32>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<AuthorResponse> for AuthorDto {
    fn from(author: AuthorResponse) -> Self {
        Self {
            id: author.id,
            name: author.name,
            email: author.email,
            bio: author.bio,
            nationality: author.nationality,
            birth_year: author.birth_year,
            created_at: iso_timestamp(author.created_at),
            updated_at: iso_timestamp(author.updated_at),
        }
    }
}

/// 图书中嵌入的作者摘要
#[derive(Debug, Serialize)]
pub struct AuthorRefDto {
    pub id: Uuid,
    pub name: String,
}

impl From<AuthorSummary> for AuthorRefDto {
    fn from(author: AuthorSummary) -> Self {
        Self {
            id: author.id,
            name: author.name,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorBooksDto {
    pub author_id: Uuid,
    pub author_name: String,
    pub total: usize,
    pub books: Vec<BookDto>,
}

impl From<AuthorBooksResponse> for AuthorBooksDto {
    fn from(result: AuthorBooksResponse) -> Self {
        Self {
            author_id: result.author_id,
            author_name: result.author_name,
            total: result.books.len(),
            books: result.books.into_iter().map(BookDto::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookYearDto {
    pub title: String,
    pub year: i32,
}

impl From<BookYear> for BookYearDto {
    fn from(b: BookYear) -> Self {
        Self {
            title: b.title,
            year: b.year,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BookPagesDto {
    pub title: String,
    pub pages: u32,
}

impl From<BookPages> for BookPagesDto {
    fn from(b: BookPages) -> Self {
        Self {
            title: b.title,
            pages: b.pages,
        }
    }
}

/// 作者统计，缺失项序列化为 `null`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorStatsDto {
    pub author_id: String,
    pub author_name: String,
    pub total_books: usize,
    pub first_book: Option<BookYearDto>,
    pub latest_book: Option<BookYearDto>,
    pub average_pages: u32,
    pub genres: Vec<String>,
    pub longest_book: Option<BookPagesDto>,
    pub shortest_book: Option<BookPagesDto>,
}

impl From<AuthorStatistics> for AuthorStatsDto {
    fn from(stats: AuthorStatistics) -> Self {
        Self {
            author_id: stats.author_id.to_string(),
            author_name: stats.author_name,
            total_books: stats.total_books,
            first_book: stats.first_book.map(BookYearDto::from),
            latest_book: stats.latest_book.map(BookYearDto::from),
            average_pages: stats.average_pages,
            genres: stats.genres,
            longest_book: stats.longest_book.map(BookPagesDto::from),
            shortest_book: stats.shortest_book.map(BookPagesDto::from),
        }
    }
}

// ============================================================================
// Book DTOs
// ============================================================================

/// 创建 / 更新图书请求体
///
/// `authorId` 按字符串接收，格式错误视为作者不存在
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRequest {
    pub title: String,
    pub genre: Option<String>,
    pub pages: Option<i64>,
    pub published_year: Option<i32>,
    pub author_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    pub id: Uuid,
    pub title: String,
    pub genre: Option<String>,
    pub pages: Option<i64>,
    pub published_year: Option<i32>,
    pub author_id: Uuid,
    pub author: AuthorRefDto,
    pub created_at: String,
    pub updated_at: String,
}

impl From<BookResponse> for BookDto {
    fn from(book: BookResponse) -> Self {
        Self {
            id: book.id,
            title: book.title,
            genre: book.genre,
            pages: book.pages,
            published_year: book.published_year,
            author_id: book.author_id,
            author: AuthorRefDto::from(book.author),
            created_at: iso_timestamp(book.created_at),
            updated_at: iso_timestamp(book.updated_at),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationDto {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl From<Pagination> for PaginationDto {
    fn from(p: Pagination) -> Self {
        Self {
            page: p.page,
            limit: p.limit,
            total: p.total,
            total_pages: p.total_pages,
            has_next: p.has_next,
            has_prev: p.has_prev,
        }
    }
}

/// 检索结果 `{data, pagination}`
#[derive(Debug, Serialize)]
pub struct SearchResultDto {
    pub data: Vec<BookDto>,
    pub pagination: PaginationDto,
}

impl From<SearchBooksResponse> for SearchResultDto {
    fn from(result: SearchBooksResponse) -> Self {
        Self {
            data: result.books.into_iter().map(BookDto::from).collect(),
            pagination: PaginationDto::from(result.pagination),
        }
    }
}

// ============================================================================
// Shared
// ============================================================================

/// 删除结果
#[derive(Debug, Serialize)]
pub struct DeletedDto {
    pub id: Uuid,
    pub deleted: bool,
}

impl DeletedDto {
    pub fn new(id: Uuid) -> Self {
        Self { id, deleted: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::author::AuthorId;

    #[test]
    fn test_empty_stats_serialize_with_nulls() {
        let id = AuthorId::new();
        let dto = AuthorStatsDto::from(AuthorStatistics::empty(id, "Nadie"));
        let json = serde_json::to_value(&dto).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "authorId": id.to_string(),
                "authorName": "Nadie",
                "totalBooks": 0,
                "firstBook": null,
                "latestBook": null,
                "averagePages": 0,
                "genres": [],
                "longestBook": null,
                "shortestBook": null,
            })
        );
    }

    #[test]
    fn test_pagination_field_names() {
        let json = serde_json::to_value(PaginationDto::from(Pagination::new(2, 10, 35))).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "page": 2,
                "limit": 10,
                "total": 35,
                "totalPages": 4,
                "hasNext": true,
                "hasPrev": true,
            })
        );
    }

    #[test]
    fn test_book_request_accepts_missing_optionals() {
        let req: BookRequest =
            serde_json::from_str(r#"{"title":"Ficciones","authorId":"abc"}"#).unwrap();
        assert_eq!(req.title, "Ficciones");
        assert_eq!(req.genre, None);
        assert_eq!(req.pages, None);
        assert_eq!(req.published_year, None);
    }
}
