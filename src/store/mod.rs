mod memory;
mod postgres;

pub use memory::MemoryBookStore;
pub use postgres::PgBookStore;

use crate::error::Result;
use crate::models::{Book, BookFields};
use async_trait::async_trait;

/// Access to the `books` table. Each method maps to exactly one statement.
///
/// `update` and `delete` return the number of affected rows; the caller decides
/// what zero means.
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Book>>;

    async fn get(&self, id: &str) -> Result<Option<Book>>;

    async fn insert(&self, book: &Book) -> Result<()>;

    async fn update(&self, id: &str, fields: &BookFields) -> Result<u64>;

    async fn delete(&self, id: &str) -> Result<u64>;

    async fn ping(&self) -> Result<()>;

    fn backend(&self) -> &'static str;
}
