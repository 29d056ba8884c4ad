//! 图书检索参数规范化
//!
//! 把来自查询字符串的原始参数（全部可选、不可信）转换为有界的检索描述。
//! 非法或越界的值一律回退到默认值，从不报错。

use std::collections::HashMap;

/// 默认每页条数
pub const DEFAULT_LIMIT: u32 = 10;
/// 每页条数上限
pub const MAX_LIMIT: u32 = 50;

/// 原始检索参数
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSearchParams {
    pub search: Option<String>,
    pub genre: Option<String>,
    pub author_name: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
}

impl RawSearchParams {
    /// 从查询字符串键值对中提取（键名为 camelCase）
    pub fn from_query(query: &HashMap<String, String>) -> Self {
        let get = |key: &str| query.get(key).cloned();
        Self {
            search: get("search"),
            genre: get("genre"),
            author_name: get("authorName"),
            page: get("page"),
            limit: get("limit"),
            sort_by: get("sortBy"),
            order: get("order"),
        }
    }
}

/// 允许排序的字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    Title,
    PublishedYear,
    #[default]
    CreatedAt,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Title => "title",
            SortField::PublishedYear => "publishedYear",
            SortField::CreatedAt => "createdAt",
        }
    }

    /// 精确匹配（区分大小写），其余一律为 `createdAt`
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("title") => SortField::Title,
            Some("publishedYear") => SortField::PublishedYear,
            _ => SortField::CreatedAt,
        }
    }
}

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    /// 不区分大小写，其余一律为 `desc`
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some(s) if s.eq_ignore_ascii_case("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }
}

/// 图书筛选条件，`None` 表示不筛选
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    /// 书名包含（不区分大小写）
    pub search: Option<String>,
    /// 类型精确匹配
    pub genre: Option<String>,
    /// 作者姓名包含（不区分大小写）
    pub author_name: Option<String>,
}

/// 规范化后的检索描述
///
/// 不变量:
/// - `page >= 1`
/// - `1 <= limit <= MAX_LIMIT`
/// - `skip == (page - 1) * limit`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookSearch {
    pub filter: BookFilter,
    pub page: u32,
    pub limit: u32,
    pub sort_by: SortField,
    pub order: SortOrder,
    pub skip: u64,
}

impl Default for BookSearch {
    fn default() -> Self {
        Self::normalize(&RawSearchParams::default())
    }
}

impl BookSearch {
    /// 规范化原始参数
    pub fn normalize(raw: &RawSearchParams) -> Self {
        let page = match raw.page.as_deref().and_then(parse_leading_int) {
            Some(n) if n >= 1 => u32::try_from(n).unwrap_or(u32::MAX),
            _ => 1,
        };

        let limit = match raw.limit.as_deref().and_then(parse_leading_int) {
            Some(n) if n > i64::from(MAX_LIMIT) => MAX_LIMIT,
            Some(n) if n >= 1 => n as u32,
            _ => DEFAULT_LIMIT,
        };

        Self {
            filter: BookFilter {
                search: non_empty(&raw.search),
                genre: non_empty(&raw.genre),
                author_name: non_empty(&raw.author_name),
            },
            page,
            limit,
            sort_by: SortField::parse(raw.sort_by.as_deref()),
            order: SortOrder::parse(raw.order.as_deref()),
            skip: u64::from(page - 1) * u64::from(limit),
        }
    }

    /// 还原为查询参数形式（再次规范化结果不变）
    pub fn to_params(&self) -> RawSearchParams {
        RawSearchParams {
            search: self.filter.search.clone(),
            genre: self.filter.genre.clone(),
            author_name: self.filter.author_name.clone(),
            page: Some(self.page.to_string()),
            limit: Some(self.limit.to_string()),
            sort_by: Some(self.sort_by.as_str().to_string()),
            order: Some(self.order.as_str().to_string()),
        }
    }

    /// 根据总条数生成分页信息
    pub fn pagination(&self, total: u64) -> Pagination {
        Pagination::new(self.page, self.limit, total)
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

/// 宽松的前导整数解析
///
/// 跳过前导空白，读取可选符号与最长的连续数字，忽略后续字符:
/// `"12abc"` -> 12，`"3.9"` -> 3，`"abc"` -> None。溢出时饱和。
fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits: &str = {
        let end = digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(digits.len());
        &digits[..end]
    };
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits.bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

/// 分页信息
///
/// 总条数为 0 时 `total_pages` 为 0，此时 `has_next`、`has_prev` 均为 false
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        let limit_u64 = u64::from(limit.max(1));
        let total_pages = if total > 0 {
            total.div_ceil(limit_u64)
        } else {
            0
        };

        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: u64::from(page) < total_pages,
            has_prev: page > 1 && total_pages > 0,
        }
    }
}
