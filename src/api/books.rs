//! Book endpoints
//!
//! - GET    /books              - List all books
//! - POST   /books/create       - Create a book with a generated id
//! - GET    /books/get/{id}     - Fetch one book
//! - PUT    /books/update/{id}  - Overwrite a book's fields
//! - DELETE /books/delete/{id}  - Remove a book

use crate::api::GatewayState;
use crate::error::{GatewayError, Result};
use crate::models::{Book, BookFields, MessageResponse};
use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    Json,
};
use tracing::{debug, info};
use uuid::Uuid;

pub async fn list_books(State(state): State<GatewayState>) -> Result<Json<Vec<Book>>> {
    let books = state.store.list().await?;

    debug!("Listing {} books", books.len());

    Ok(Json(books))
}

pub async fn get_book(
    State(state): State<GatewayState>,
    path: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<Book>> {
    let id = path_id(path)?;
    let id = require_id(&id)?;

    match state.store.get(id).await? {
        Some(book) => Ok(Json(book)),
        None => Err(GatewayError::BookNotFound { id: id.to_string() }),
    }
}

pub async fn create_book(State(state): State<GatewayState>, body: Bytes) -> Result<Json<Book>> {
    let fields = decode_fields(&body)?;

    let book = fields.into_book(Uuid::new_v4().to_string());

    state.store.insert(&book).await?;

    info!("Created book {} ({:?})", book.id, book.title);

    Ok(Json(book))
}

pub async fn update_book(
    State(state): State<GatewayState>,
    path: std::result::Result<Path<String>, PathRejection>,
    body: Bytes,
) -> Result<Json<MessageResponse>> {
    let id = path_id(path)?;
    let id = require_id(&id)?;
    let fields = decode_fields(&body)?;

    let rows_affected = state.store.update(id, &fields).await?;
    if rows_affected == 0 {
        return Err(GatewayError::BookNotFound { id: id.to_string() });
    }

    info!("Updated book {}", id);

    Ok(Json(MessageResponse::new("Book updated successfully")))
}

pub async fn delete_book(
    State(state): State<GatewayState>,
    path: std::result::Result<Path<String>, PathRejection>,
) -> Result<Json<MessageResponse>> {
    let id = path_id(path)?;
    let id = require_id(&id)?;

    let rows_affected = state.store.delete(id).await?;
    if rows_affected == 0 {
        return Err(GatewayError::BookNotFound { id: id.to_string() });
    }

    info!("Deleted book {}", id);

    Ok(Json(MessageResponse::new("Book deleted successfully")))
}

fn path_id(path: std::result::Result<Path<String>, PathRejection>) -> Result<String> {
    path.map(|Path(id)| id)
        .map_err(|e| GatewayError::InvalidId {
            cause: e.body_text(),
        })
}

fn require_id(id: &str) -> Result<&str> {
    if id.is_empty() {
        return Err(GatewayError::MissingId);
    }
    Ok(id)
}

// Content-Type is not checked: any body that isn't a book object is a 400.
fn decode_fields(body: &[u8]) -> Result<BookFields> {
    BookFields::decode(body).map_err(|e| GatewayError::InvalidBody {
        cause: e.to_string(),
    })
}
