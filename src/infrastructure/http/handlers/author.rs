//! Author HTTP Handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::application::{
    CreateAuthor, DeleteAuthor, GetAuthor, GetAuthorBooks, GetAuthorStats, ListAuthors,
    UpdateAuthor,
};
use crate::infrastructure::http::dto::{
    AuthorBooksDto, AuthorDto, AuthorRequest, AuthorStatsDto, DeletedDto,
};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 列出所有作者
pub async fn list_authors(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AuthorDto>>, ApiError> {
    let authors = state.list_authors_handler.handle(ListAuthors).await?;
    Ok(Json(authors.into_iter().map(AuthorDto::from).collect()))
}

/// 创建作者
pub async fn create_author(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AuthorRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthorDto>), ApiError> {
    let Json(req) = payload?;

    let author = state
        .create_author_handler
        .handle(CreateAuthor {
            name: req.name,
            email: req.email,
            bio: req.bio,
            nationality: req.nationality,
            birth_year: req.birth_year,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(AuthorDto::from(author))))
}

/// 获取作者详情
pub async fn get_author(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<AuthorDto>, ApiError> {
    let author_id = ApiError::parse_id("Author", &id)?;
    let author = state
        .get_author_handler
        .handle(GetAuthor { author_id })
        .await?;
    Ok(Json(AuthorDto::from(author)))
}

/// 更新作者
pub async fn update_author(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<AuthorRequest>, JsonRejection>,
) -> Result<Json<AuthorDto>, ApiError> {
    let author_id = ApiError::parse_id("Author", &id)?;
    let Json(req) = payload?;

    let author = state
        .update_author_handler
        .handle(UpdateAuthor {
            author_id,
            name: req.name,
            email: req.email,
            bio: req.bio,
            nationality: req.nationality,
            birth_year: req.birth_year,
        })
        .await?;

    Ok(Json(AuthorDto::from(author)))
}

/// 删除作者（连同其全部图书）
pub async fn delete_author(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeletedDto>, ApiError> {
    let author_id = ApiError::parse_id("Author", &id)?;
    state
        .delete_author_handler
        .handle(DeleteAuthor { author_id })
        .await?;
    Ok(Json(DeletedDto::new(author_id)))
}

/// 作者的全部图书
pub async fn get_author_books(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<AuthorBooksDto>, ApiError> {
    let author_id = ApiError::parse_id("Author", &id)?;
    let result = state
        .get_author_books_handler
        .handle(GetAuthorBooks { author_id })
        .await?;
    Ok(Json(AuthorBooksDto::from(result)))
}

/// 作者统计
pub async fn get_author_stats(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<AuthorStatsDto>, ApiError> {
    let author_id = ApiError::parse_id("Author", &id)?;
    let stats = state
        .get_author_stats_handler
        .handle(GetAuthorStats { author_id })
        .await?;
    Ok(Json(AuthorStatsDto::from(stats)))
}
