//! Author Context - 作者图书统计
//!
//! 对单个作者已加载的全部图书做一次性归约，得到固定形状的统计摘要。
//! 纯函数，不做任何 I/O。
//!
//! 缺失数据的处理规则:
//! - 没有出版年份的图书不参与 first/latest
//! - 没有页数的图书不参与平均页数、最长、最短
//! - 页数为 0 参与平均页数和最长，但不参与最短
//! - 空白类型视为没有类型

use crate::domain::book::Book;

use super::AuthorId;

/// 书名 + 出版年份
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookYear {
    pub title: String,
    pub year: i32,
}

/// 书名 + 页数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookPages {
    pub title: String,
    pub pages: u32,
}

/// 作者统计摘要
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorStatistics {
    pub author_id: AuthorId,
    pub author_name: String,
    pub total_books: usize,
    pub first_book: Option<BookYear>,
    pub latest_book: Option<BookYear>,
    pub average_pages: u32,
    pub genres: Vec<String>,
    pub longest_book: Option<BookPages>,
    pub shortest_book: Option<BookPages>,
}

impl AuthorStatistics {
    /// 没有任何图书时的统计
    pub fn empty(author_id: AuthorId, author_name: impl Into<String>) -> Self {
        Self {
            author_id,
            author_name: author_name.into(),
            total_books: 0,
            first_book: None,
            latest_book: None,
            average_pages: 0,
            genres: Vec::new(),
            longest_book: None,
            shortest_book: None,
        }
    }

    /// 计算作者统计
    ///
    /// `books` 的顺序只影响并列时的取舍:
    /// - first: 年份最小者中最先出现的
    /// - latest: 年份最大者中最后出现的（等价于稳定升序排序后的末尾）
    /// - longest / shortest: 并列时取最先出现的
    pub fn compute(author_id: AuthorId, author_name: impl Into<String>, books: &[Book]) -> Self {
        if books.is_empty() {
            return Self::empty(author_id, author_name);
        }

        let (first_book, latest_book) = year_bounds(books);

        Self {
            author_id,
            author_name: author_name.into(),
            total_books: books.len(),
            first_book,
            latest_book,
            average_pages: average_pages(books),
            genres: distinct_genres(books),
            longest_book: longest(books),
            shortest_book: shortest(books),
        }
    }
}

fn year_bounds(books: &[Book]) -> (Option<BookYear>, Option<BookYear>) {
    let mut first: Option<(&Book, i32)> = None;
    let mut latest: Option<(&Book, i32)> = None;

    for book in books {
        let Some(year) = book.published_year() else {
            continue;
        };
        if first.map_or(true, |(_, y)| year < y) {
            first = Some((book, year));
        }
        if latest.map_or(true, |(_, y)| year >= y) {
            latest = Some((book, year));
        }
    }

    let to_year = |(book, year): (&Book, i32)| BookYear {
        title: book.title().as_str().to_string(),
        year,
    };
    (first.map(to_year), latest.map(to_year))
}

/// 平均页数，四舍五入（.5 进位）
fn average_pages(books: &[Book]) -> u32 {
    let (sum, count) = books
        .iter()
        .filter_map(Book::pages)
        .fold((0u64, 0u64), |(sum, count), pages| {
            (sum + u64::from(pages), count + 1)
        });

    if count == 0 {
        return 0;
    }

    // floor(sum / count + 0.5)，整数运算避免浮点误差
    ((2 * sum + count) / (2 * count)) as u32
}

fn distinct_genres(books: &[Book]) -> Vec<String> {
    let mut genres: Vec<String> = Vec::new();
    for genre in books.iter().filter_map(Book::genre) {
        if !genres.iter().any(|g| g == genre.as_str()) {
            genres.push(genre.as_str().to_string());
        }
    }
    genres
}

fn longest(books: &[Book]) -> Option<BookPages> {
    pick_by_pages(books.iter(), |candidate, current| candidate > current)
}

fn shortest(books: &[Book]) -> Option<BookPages> {
    pick_by_pages(
        books.iter().filter(|b| b.pages().is_some_and(|p| p > 0)),
        |candidate, current| candidate < current,
    )
}

/// 在有页数的图书中挑选一本，`replaces` 严格成立时才替换，保证并列取先出现者
fn pick_by_pages<'a>(
    books: impl Iterator<Item = &'a Book>,
    replaces: impl Fn(u32, u32) -> bool,
) -> Option<BookPages> {
    let mut picked: Option<(&Book, u32)> = None;

    for book in books {
        let Some(pages) = book.pages() else {
            continue;
        };
        if picked.map_or(true, |(_, current)| replaces(pages, current)) {
            picked = Some((book, pages));
        }
    }

    picked.map(|(book, pages)| BookPages {
        title: book.title().as_str().to_string(),
        pages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::book::{BookDetails, BookTitle, Genre, PageCount};

    fn book(title: &str, pages: Option<i64>, year: Option<i32>, genre: Option<&str>) -> Book {
        Book::new(
            BookTitle::new(title).unwrap(),
            AuthorId::new(),
            BookDetails {
                genre: genre.and_then(Genre::parse),
                pages: pages.map(|p| PageCount::new(p).unwrap()),
                published_year: year,
            },
        )
    }

    fn compute(books: &[Book]) -> AuthorStatistics {
        AuthorStatistics::compute(AuthorId::new(), "Autora", books)
    }

    #[test]
    fn test_empty_list_yields_empty_summary() {
        let id = AuthorId::new();
        let stats = AuthorStatistics::compute(id, "Autora", &[]);
        assert_eq!(stats, AuthorStatistics::empty(id, "Autora"));
        assert_eq!(stats.total_books, 0);
        assert_eq!(stats.average_pages, 0);
        assert!(stats.genres.is_empty());
    }

    #[test]
    fn test_mixed_books_example() {
        let books = vec![
            book("A", Some(100), Some(2000), None),
            book("B", None, Some(1999), None),
            book("C", Some(50), Some(2000), None),
        ];
        let stats = compute(&books);

        assert_eq!(stats.total_books, 3);
        assert_eq!(
            stats.first_book,
            Some(BookYear { title: "B".to_string(), year: 1999 })
        );
        // 稳定排序: 同为 2000 年时取后出现的 C
        assert_eq!(
            stats.latest_book,
            Some(BookYear { title: "C".to_string(), year: 2000 })
        );
        assert_eq!(stats.average_pages, 75);
        assert_eq!(
            stats.longest_book,
            Some(BookPages { title: "A".to_string(), pages: 100 })
        );
        assert_eq!(
            stats.shortest_book,
            Some(BookPages { title: "C".to_string(), pages: 50 })
        );
    }

    #[test]
    fn test_first_book_tie_keeps_first_encountered() {
        let books = vec![
            book("X", None, Some(1980), None),
            book("Y", None, Some(1980), None),
        ];
        let stats = compute(&books);
        assert_eq!(stats.first_book.unwrap().title, "X");
        assert_eq!(stats.latest_book.unwrap().title, "Y");
    }

    #[test]
    fn test_no_years_means_no_first_or_latest() {
        let stats = compute(&[book("A", Some(10), None, None)]);
        assert_eq!(stats.first_book, None);
        assert_eq!(stats.latest_book, None);
        assert_eq!(stats.total_books, 1);
    }

    #[test]
    fn test_average_ignores_missing_pages_and_rounds_half_up() {
        let books = vec![
            book("A", Some(1), None, None),
            book("B", Some(2), None, None),
            book("C", None, None, None),
        ];
        // (1 + 2) / 2 = 1.5 -> 2
        assert_eq!(compute(&books).average_pages, 2);

        let books = vec![
            book("A", Some(10), None, None),
            book("B", Some(11), None, None),
            book("C", Some(11), None, None),
        ];
        // 32 / 3 = 10.67 -> 11
        assert_eq!(compute(&books).average_pages, 11);
    }

    #[test]
    fn test_no_pages_means_zero_average() {
        let books = vec![
            book("A", None, Some(2001), None),
            book("B", None, None, None),
        ];
        let stats = compute(&books);
        assert_eq!(stats.average_pages, 0);
        assert_eq!(stats.longest_book, None);
        assert_eq!(stats.shortest_book, None);
    }

    #[test]
    fn test_zero_pages_never_shortest() {
        let books = vec![
            book("Vacío", Some(0), None, None),
            book("Corto", Some(30), None, None),
        ];
        let stats = compute(&books);
        assert_eq!(stats.shortest_book.unwrap().title, "Corto");
        assert_eq!(stats.average_pages, 15);
    }

    #[test]
    fn test_only_zero_pages() {
        let books = vec![book("Vacío", Some(0), None, None)];
        let stats = compute(&books);
        assert_eq!(stats.shortest_book, None);
        assert_eq!(
            stats.longest_book,
            Some(BookPages { title: "Vacío".to_string(), pages: 0 })
        );
        assert_eq!(stats.average_pages, 0);
    }

    #[test]
    fn test_longest_and_shortest_ties_keep_first() {
        let books = vec![
            book("L1", Some(300), None, None),
            book("S1", Some(20), None, None),
            book("L2", Some(300), None, None),
            book("S2", Some(20), None, None),
        ];
        let stats = compute(&books);
        assert_eq!(stats.longest_book.unwrap().title, "L1");
        assert_eq!(stats.shortest_book.unwrap().title, "S1");
    }

    #[test]
    fn test_genres_distinct_in_first_occurrence_order() {
        let books = vec![
            book("A", None, None, Some("Poesía")),
            book("B", None, None, Some("  ")),
            book("C", None, None, Some("Ensayo")),
            book("D", None, None, Some("Poesía")),
            book("E", None, None, None),
            book("F", None, None, Some("")),
        ];
        assert_eq!(compute(&books).genres, vec!["Poesía", "Ensayo"]);
    }
}
