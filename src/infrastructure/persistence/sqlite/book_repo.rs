//! SQLite Book Repository

use async_trait::async_trait;
use sqlx::FromRow;
use uuid::Uuid;

use super::database::{database_error, format_timestamp, parse_timestamp, parse_uuid};
use super::DbPool;
use crate::application::ports::{
    AuthorSummary, BookRecord, BookRepositoryPort, BookWithAuthor, RepositoryError,
};
use crate::domain::{BookFilter, SortField, SortOrder};

/// 图书联表作者姓名的查询前缀
const BOOK_WITH_AUTHOR_SELECT: &str = r#"
    SELECT b.id, b.title, b.genre, b.pages, b.published_year, b.author_id,
           b.created_at, b.updated_at, a.name AS author_name
    FROM books b
    JOIN authors a ON a.id = b.author_id
"#;

/// SQLite Book Repository
pub struct SqliteBookRepository {
    pool: DbPool,
}

impl SqliteBookRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct BookRow {
    id: String,
    title: String,
    genre: Option<String>,
    pages: Option<i64>,
    published_year: Option<i64>,
    author_id: String,
    created_at: String,
    updated_at: String,
}

impl TryFrom<BookRow> for BookRecord {
    type Error = RepositoryError;

    fn try_from(row: BookRow) -> Result<Self, Self::Error> {
        Ok(BookRecord {
            id: parse_uuid(&row.id)?,
            title: row.title,
            genre: row.genre,
            pages: row.pages,
            published_year: row
                .published_year
                .map(i32::try_from)
                .transpose()
                .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            author_id: parse_uuid(&row.author_id)?,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

#[derive(FromRow)]
struct BookWithAuthorRow {
    #[sqlx(flatten)]
    book: BookRow,
    author_name: String,
}

impl TryFrom<BookWithAuthorRow> for BookWithAuthor {
    type Error = RepositoryError;

    fn try_from(row: BookWithAuthorRow) -> Result<Self, Self::Error> {
        let book = BookRecord::try_from(row.book)?;
        Ok(BookWithAuthor {
            author: AuthorSummary {
                id: book.author_id,
                name: row.author_name,
            },
            book,
        })
    }
}

/// 构建 WHERE 子句，所有用户输入都走参数绑定
///
/// SQLite 的 `lower()` 只处理 ASCII，模糊匹配改用写入时预存的 `*_folded` 列，
/// 检索词在 Rust 侧做同样的 Unicode 小写化
fn where_clause(filter: &BookFilter) -> (String, Vec<String>) {
    let mut conditions = Vec::new();
    let mut binds = Vec::new();

    if let Some(search) = &filter.search {
        conditions.push("instr(b.title_folded, ?) > 0");
        binds.push(search.to_lowercase());
    }
    if let Some(genre) = &filter.genre {
        conditions.push("b.genre = ?");
        binds.push(genre.clone());
    }
    if let Some(author_name) = &filter.author_name {
        conditions.push("instr(a.name_folded, ?) > 0");
        binds.push(author_name.to_lowercase());
    }

    if conditions.is_empty() {
        (String::new(), binds)
    } else {
        (format!("WHERE {}", conditions.join(" AND ")), binds)
    }
}

/// 排序子句，列名只来自枚举映射
///
/// 空值视为最大值：升序排在最后，降序排在最前
fn order_clause(sort_by: SortField, order: SortOrder) -> String {
    let column = match sort_by {
        SortField::Title => "b.title COLLATE NOCASE",
        SortField::PublishedYear => "b.published_year",
        SortField::CreatedAt => "b.created_at",
    };
    let direction = match order {
        SortOrder::Asc => "ASC NULLS LAST",
        SortOrder::Desc => "DESC NULLS FIRST",
    };
    format!("ORDER BY {} {}, b.id ASC", column, direction)
}

#[async_trait]
impl BookRepositoryPort for SqliteBookRepository {
    async fn save(&self, book: &BookRecord) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO books (id, title, title_folded, genre, pages, published_year, author_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                title_folded = excluded.title_folded,
                genre = excluded.genre,
                pages = excluded.pages,
                published_year = excluded.published_year,
                author_id = excluded.author_id,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(book.id.to_string())
        .bind(&book.title)
        .bind(book.title.to_lowercase())
        .bind(&book.genre)
        .bind(book.pages)
        .bind(book.published_year)
        .bind(book.author_id.to_string())
        .bind(format_timestamp(&book.created_at))
        .bind(format_timestamp(&book.updated_at))
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<BookWithAuthor>, RepositoryError> {
        let query = format!("{} WHERE b.id = ?", BOOK_WITH_AUTHOR_SELECT);
        let row: Option<BookWithAuthorRow> = sqlx::query_as(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        row.map(BookWithAuthor::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<BookWithAuthor>, RepositoryError> {
        let query = format!(
            "{} ORDER BY b.created_at DESC, b.id ASC",
            BOOK_WITH_AUTHOR_SELECT
        );
        let rows: Vec<BookWithAuthorRow> = sqlx::query_as(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        rows.into_iter().map(BookWithAuthor::try_from).collect()
    }

    async fn find_by_author(&self, author_id: Uuid) -> Result<Vec<BookRecord>, RepositoryError> {
        // 按创建顺序返回，统计中的并列取舍依赖这个顺序
        let rows: Vec<BookRow> = sqlx::query_as(
            r#"
            SELECT id, title, genre, pages, published_year, author_id, created_at, updated_at
            FROM books
            WHERE author_id = ?
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(author_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.into_iter().map(BookRecord::try_from).collect()
    }

    async fn count(&self, filter: &BookFilter) -> Result<u64, RepositoryError> {
        let (where_sql, binds) = where_clause(filter);
        let query = format!(
            "SELECT COUNT(*) FROM books b JOIN authors a ON a.id = b.author_id {}",
            where_sql
        );

        let mut sql_query = sqlx::query_scalar::<_, i64>(&query);
        for value in binds {
            sql_query = sql_query.bind(value);
        }

        let total = sql_query
            .fetch_one(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(total.max(0) as u64)
    }

    async fn search(
        &self,
        filter: &BookFilter,
        sort_by: SortField,
        order: SortOrder,
        skip: u64,
        limit: u32,
    ) -> Result<Vec<BookWithAuthor>, RepositoryError> {
        let (where_sql, binds) = where_clause(filter);
        let query = format!(
            "{} {} {} LIMIT ? OFFSET ?",
            BOOK_WITH_AUTHOR_SELECT,
            where_sql,
            order_clause(sort_by, order)
        );

        let mut sql_query = sqlx::query_as::<_, BookWithAuthorRow>(&query);
        for value in binds {
            sql_query = sql_query.bind(value);
        }

        let rows = sql_query
            .bind(i64::from(limit))
            .bind(i64::try_from(skip).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        rows.into_iter().map(BookWithAuthor::try_from).collect()
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{AuthorRecord, AuthorRepositoryPort};
    use crate::infrastructure::persistence::sqlite::{
        create_pool, run_migrations, DatabaseConfig, SqliteAuthorRepository,
    };
    use chrono::{Duration, Utc};

    struct Fixture {
        books: SqliteBookRepository,
        borges: Uuid,
        allende: Uuid,
    }

    async fn fixture() -> Fixture {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();

        let authors = SqliteAuthorRepository::new(pool.clone());
        let books = SqliteBookRepository::new(pool);

        let mut ids = Vec::new();
        for (name, email) in [
            ("Jorge Luis Borges", "borges@example.com"),
            ("Isabel Allende", "allende@example.com"),
        ] {
            let now = Utc::now();
            let record = AuthorRecord {
                id: Uuid::new_v4(),
                name: name.to_string(),
                email: email.to_string(),
                bio: None,
                nationality: None,
                birth_year: None,
                created_at: now,
                updated_at: now,
            };
            authors.save(&record).await.unwrap();
            ids.push(record.id);
        }

        let base = Utc::now();
        let seed = [
            ("Ficciones", Some("Cuento"), Some(224), Some(1944), ids[0]),
            ("El Aleph", Some("Cuento"), Some(146), Some(1949), ids[0]),
            ("El hacedor", Some("Poesía"), None, Some(1960), ids[0]),
            ("La casa de los espíritus", Some("Novela"), Some(448), Some(1982), ids[1]),
            ("Eva Luna", Some("novela"), Some(304), None, ids[1]),
        ];
        for (offset, (title, genre, pages, year, author_id)) in seed.into_iter().enumerate() {
            let ts = base + Duration::seconds(offset as i64);
            books
                .save(&BookRecord {
                    id: Uuid::new_v4(),
                    title: title.to_string(),
                    genre: genre.map(str::to_string),
                    pages,
                    published_year: year,
                    author_id,
                    created_at: ts,
                    updated_at: ts,
                })
                .await
                .unwrap();
        }

        Fixture {
            books,
            borges: ids[0],
            allende: ids[1],
        }
    }

    fn titles(rows: &[BookWithAuthor]) -> Vec<&str> {
        rows.iter().map(|r| r.book.title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_find_by_author_in_creation_order() {
        let f = fixture().await;
        let books = f.books.find_by_author(f.borges).await.unwrap();
        let titles: Vec<_> = books.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Ficciones", "El Aleph", "El hacedor"]);
        assert_eq!(books[2].pages, None);
    }

    #[tokio::test]
    async fn test_find_by_id_includes_author() {
        let f = fixture().await;
        let id = f.books.find_by_author(f.allende).await.unwrap()[0].id;
        let row = f.books.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(row.author.name, "Isabel Allende");
        assert_eq!(row.author.id, f.allende);
    }

    #[tokio::test]
    async fn test_count_without_filter() {
        let f = fixture().await;
        assert_eq!(f.books.count(&BookFilter::default()).await.unwrap(), 5);
        assert_eq!(f.books.find_all().await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_title_search_is_case_insensitive() {
        let f = fixture().await;
        let filter = BookFilter {
            search: Some("EL ".to_string()),
            ..Default::default()
        };
        assert_eq!(f.books.count(&filter).await.unwrap(), 2);

        let rows = f
            .books
            .search(&filter, SortField::Title, SortOrder::Asc, 0, 10)
            .await
            .unwrap();
        assert_eq!(titles(&rows), vec!["El Aleph", "El hacedor"]);
    }

    #[tokio::test]
    async fn test_genre_is_exact_match() {
        let f = fixture().await;
        let filter = BookFilter {
            genre: Some("Novela".to_string()),
            ..Default::default()
        };
        let rows = f
            .books
            .search(&filter, SortField::CreatedAt, SortOrder::Desc, 0, 10)
            .await
            .unwrap();
        assert_eq!(titles(&rows), vec!["La casa de los espíritus"]);
    }

    #[tokio::test]
    async fn test_author_name_filter() {
        let f = fixture().await;
        let filter = BookFilter {
            author_name: Some("borges".to_string()),
            genre: Some("Cuento".to_string()),
            ..Default::default()
        };
        assert_eq!(f.books.count(&filter).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_sort_and_paginate() {
        let f = fixture().await;
        let filter = BookFilter::default();

        let newest_first = f
            .books
            .search(&filter, SortField::CreatedAt, SortOrder::Desc, 0, 2)
            .await
            .unwrap();
        assert_eq!(titles(&newest_first), vec!["Eva Luna", "La casa de los espíritus"]);

        let second_page = f
            .books
            .search(&filter, SortField::CreatedAt, SortOrder::Desc, 2, 2)
            .await
            .unwrap();
        assert_eq!(titles(&second_page), vec!["El hacedor", "El Aleph"]);

        let by_year = f
            .books
            .search(&filter, SortField::PublishedYear, SortOrder::Desc, 0, 2)
            .await
            .unwrap();
        assert_eq!(titles(&by_year), vec!["Eva Luna", "La casa de los espíritus"]);

        let past_end = f
            .books
            .search(&filter, SortField::Title, SortOrder::Asc, 50, 10)
            .await
            .unwrap();
        assert!(past_end.is_empty());
    }

    #[tokio::test]
    async fn test_delete() {
        let f = fixture().await;
        let id = f.books.find_by_author(f.borges).await.unwrap()[0].id;
        f.books.delete(id).await.unwrap();
        assert!(f.books.find_by_id(id).await.unwrap().is_none());
        assert_eq!(f.books.count(&BookFilter::default()).await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_missing_year_sorts_as_largest() {
        let f = fixture().await;
        let filter = BookFilter::default();

        let oldest_first = f
            .books
            .search(&filter, SortField::PublishedYear, SortOrder::Asc, 0, 10)
            .await
            .unwrap();
        assert_eq!(
            titles(&oldest_first),
            vec![
                "Ficciones",
                "El Aleph",
                "El hacedor",
                "La casa de los espíritus",
                "Eva Luna",
            ]
        );

        let newest_first = f
            .books
            .search(&filter, SortField::PublishedYear, SortOrder::Desc, 0, 10)
            .await
            .unwrap();
        assert_eq!(titles(&newest_first)[0], "Eva Luna");
        assert_eq!(titles(&newest_first)[4], "Ficciones");
    }

    #[tokio::test]
    async fn test_title_search_folds_accented_letters() {
        let f = fixture().await;
        let filter = BookFilter {
            search: Some("ESPÍRITUS".to_string()),
            ..Default::default()
        };
        assert_eq!(f.books.count(&filter).await.unwrap(), 1);

        let rows = f
            .books
            .search(&filter, SortField::CreatedAt, SortOrder::Desc, 0, 10)
            .await
            .unwrap();
        assert_eq!(titles(&rows), vec!["La casa de los espíritus"]);
    }

    #[tokio::test]
    async fn test_author_name_search_folds_accented_letters() {
        let f = fixture().await;
        let authors = SqliteAuthorRepository::new(f.books.pool.clone());
        let now = Utc::now();
        let record = AuthorRecord {
            id: Uuid::new_v4(),
            name: "Ángeles Mastretta".to_string(),
            email: "mastretta@example.com".to_string(),
            bio: None,
            nationality: None,
            birth_year: None,
            created_at: now,
            updated_at: now,
        };
        authors.save(&record).await.unwrap();
        f.books
            .save(&BookRecord {
                id: Uuid::new_v4(),
                title: "Arráncame la vida".to_string(),
                genre: None,
                pages: None,
                published_year: Some(1985),
                author_id: record.id,
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();

        let filter = BookFilter {
            author_name: Some("ÁNGELES".to_string()),
            ..Default::default()
        };
        let rows = f
            .books
            .search(&filter, SortField::CreatedAt, SortOrder::Desc, 0, 10)
            .await
            .unwrap();
        assert_eq!(titles(&rows), vec!["Arráncame la vida"]);
        assert_eq!(rows[0].author.name, "Ángeles Mastretta");
    }
}
