//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping                 GET     健康检查
//! - /api/authors              GET     列出所有作者
//! - /api/authors              POST    创建作者
//! - /api/authors/:id          GET     获取作者详情
//! - /api/authors/:id          PUT     更新作者
//! - /api/authors/:id          DELETE  删除作者（连同其图书）
//! - /api/authors/:id/books    GET     作者的全部图书
//! - /api/authors/:id/stats    GET     作者统计
//! - /api/books                GET     列出所有图书
//! - /api/books                POST    创建图书
//! - /api/books/search         GET     检索图书（过滤 + 排序 + 分页）
//! - /api/books/:id            GET     获取图书详情
//! - /api/books/:id            PUT     更新图书
//! - /api/books/:id            DELETE  删除图书

use axum::{routing::get, Router};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/authors", author_routes())
        .nest("/books", book_routes())
}

/// Author 路由
fn author_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/",
            get(handlers::list_authors).post(handlers::create_author),
        )
        .route(
            "/:id",
            get(handlers::get_author)
                .put(handlers::update_author)
                .delete(handlers::delete_author),
        )
        .route("/:id/books", get(handlers::get_author_books))
        .route("/:id/stats", get(handlers::get_author_stats))
}

/// Book 路由
///
/// 静态段 `/search` 优先于 `/:id` 匹配
fn book_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(handlers::list_books).post(handlers::create_book))
        .route("/search", get(handlers::search_books))
        .route(
            "/:id",
            get(handlers::get_book)
                .put(handlers::update_book)
                .delete(handlers::delete_book),
        )
}
