mod books;
mod health;

pub use books::{create_book, delete_book, get_book, list_books, update_book};
pub use health::health_check;

use crate::error::GatewayError;
use crate::store::BookStore;
use axum::{
    http::{Method, Uri},
    routing::{delete, get, post, put},
    Router,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Instant;

/// Shared handler state. The store is injected here instead of living in a global.
#[derive(Clone)]
pub struct GatewayState {
    pub store: Arc<dyn BookStore>,
    pub started_at: DateTime<Utc>,
    pub start_time: Instant,
}

impl GatewayState {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self {
            store,
            started_at: Utc::now(),
            start_time: Instant::now(),
        }
    }
}

/// Builds the gateway router.
///
/// Bare `/books/{get,update,delete}/` paths are routed explicitly so an empty id
/// is answered with 400 after the verb check, instead of falling through to 404.
pub fn router(state: GatewayState) -> Router {
    Router::new()
        // Health check (for load balancer)
        .route("/health", get(health_check).fallback(method_not_allowed))
        .route("/books", get(list_books).fallback(method_not_allowed))
        .route(
            "/books/create",
            post(create_book).fallback(method_not_allowed),
        )
        .route("/books/get/", get(missing_id).fallback(method_not_allowed))
        .route("/books/get/{id}", get(get_book).fallback(method_not_allowed))
        .route(
            "/books/update/",
            put(missing_id).fallback(method_not_allowed),
        )
        .route(
            "/books/update/{id}",
            put(update_book).fallback(method_not_allowed),
        )
        .route(
            "/books/delete/",
            delete(missing_id).fallback(method_not_allowed),
        )
        .route(
            "/books/delete/{id}",
            delete(delete_book).fallback(method_not_allowed),
        )
        .fallback(route_not_found)
        .with_state(state)
}

async fn missing_id() -> GatewayError {
    GatewayError::MissingId
}

async fn method_not_allowed(method: Method) -> GatewayError {
    GatewayError::MethodNotAllowed {
        method: method.to_string(),
    }
}

async fn route_not_found(uri: Uri) -> GatewayError {
    GatewayError::RouteNotFound {
        path: uri.path().to_string(),
    }
}
