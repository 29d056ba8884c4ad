//! Book HTTP Handlers

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use std::collections::HashMap;
use std::sync::Arc;

use crate::application::{
    CreateBook, DeleteBook, GetBook, ListBooks, SearchBooks, UpdateBook,
};
use crate::domain::RawSearchParams;
use crate::infrastructure::http::dto::{BookDto, BookRequest, DeletedDto, SearchResultDto};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 列出所有图书
pub async fn list_books(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BookDto>>, ApiError> {
    let books = state.list_books_handler.handle(ListBooks).await?;
    Ok(Json(books.into_iter().map(BookDto::from).collect()))
}

/// 创建图书
pub async fn create_book(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BookRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<BookDto>), ApiError> {
    let Json(req) = payload?;
    let author_id = ApiError::parse_id("Author", &req.author_id)?;

    let book = state
        .create_book_handler
        .handle(CreateBook {
            title: req.title,
            genre: req.genre,
            pages: req.pages,
            published_year: req.published_year,
            author_id,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(BookDto::from(book))))
}

/// 检索图书
///
/// 查询参数按原始字符串接收，非法值由规范化逻辑回退为默认值
pub async fn search_books(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<SearchResultDto>, ApiError> {
    let result = state
        .search_books_handler
        .handle(SearchBooks {
            params: RawSearchParams::from_query(&query),
        })
        .await?;
    Ok(Json(SearchResultDto::from(result)))
}

/// 获取图书详情
pub async fn get_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<BookDto>, ApiError> {
    let book_id = ApiError::parse_id("Book", &id)?;
    let book = state.get_book_handler.handle(GetBook { book_id }).await?;
    Ok(Json(BookDto::from(book)))
}

/// 更新图书
pub async fn update_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<BookRequest>, JsonRejection>,
) -> Result<Json<BookDto>, ApiError> {
    let book_id = ApiError::parse_id("Book", &id)?;
    let Json(req) = payload?;
    let author_id = ApiError::parse_id("Author", &req.author_id)?;

    let book = state
        .update_book_handler
        .handle(UpdateBook {
            book_id,
            title: req.title,
            genre: req.genre,
            pages: req.pages,
            published_year: req.published_year,
            author_id,
        })
        .await?;

    Ok(Json(BookDto::from(book)))
}

/// 删除图书
pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeletedDto>, ApiError> {
    let book_id = ApiError::parse_id("Book", &id)?;
    state.delete_book_handler.handle(DeleteBook { book_id }).await?;
    Ok(Json(DeletedDto::new(book_id)))
}
