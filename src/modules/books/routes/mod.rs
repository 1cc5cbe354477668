//! HTTP bindings for the books module, mounted under `/api/books`.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use shelf_http::AppError;

use super::models::{BookFields, BookId, BookResponse, LendRequest};
use super::repository::BookFilter;
use super::service::BookService;

type ApiResult<T> = Result<T, AppError>;

/// Build the module router with the service as shared state.
pub fn router(service: Arc<BookService>) -> Router {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route("/health", get(health_check))
        .route(
            "/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .route("/{id}/lend", post(lend_book))
        .route("/{id}/return", post(return_book))
        .with_state(service)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "books module is healthy"
}

async fn list_books(
    State(service): State<Arc<BookService>>,
    Query(filter): Query<BookFilter>,
) -> Json<Vec<BookResponse>> {
    let books = service.list(&filter).await;
    Json(books.iter().map(BookResponse::from).collect())
}

async fn get_book(
    State(service): State<Arc<BookService>>,
    Path(id): Path<BookId>,
) -> ApiResult<Json<BookResponse>> {
    let book = service.get(id).await?;
    Ok(Json(book.into()))
}

async fn create_book(
    State(service): State<Arc<BookService>>,
    Json(fields): Json<BookFields>,
) -> ApiResult<(StatusCode, Json<BookResponse>)> {
    let book = service.create(fields).await?;
    Ok((StatusCode::CREATED, Json(book.into())))
}

async fn update_book(
    State(service): State<Arc<BookService>>,
    Path(id): Path<BookId>,
    Json(fields): Json<BookFields>,
) -> ApiResult<Json<BookResponse>> {
    let book = service.update(id, fields).await?;
    Ok(Json(book.into()))
}

async fn delete_book(
    State(service): State<Arc<BookService>>,
    Path(id): Path<BookId>,
) -> ApiResult<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn lend_book(
    State(service): State<Arc<BookService>>,
    Path(id): Path<BookId>,
    Json(request): Json<LendRequest>,
) -> ApiResult<Json<BookResponse>> {
    let book = service.lend(id, request.lent_to).await?;
    Ok(Json(book.into()))
}

async fn return_book(
    State(service): State<Arc<BookService>>,
    Path(id): Path<BookId>,
) -> ApiResult<Json<BookResponse>> {
    let book = service.return_book(id).await?;
    Ok(Json(book.into()))
}
