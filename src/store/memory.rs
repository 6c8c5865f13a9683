use crate::error::{GatewayError, Result};
use crate::models::{Book, BookFields};
use crate::store::BookStore;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// In-process store keeping rows in insertion order. Used when no database is
/// configured and as the store behind the router tests.
#[derive(Default)]
pub struct MemoryBookStore {
    books: RwLock<Vec<Book>>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.books.read().await.len()
    }

    #[cfg(test)]
    pub async fn is_empty(&self) -> bool {
        self.books.read().await.is_empty()
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    async fn list(&self) -> Result<Vec<Book>> {
        Ok(self.books.read().await.clone())
    }

    async fn get(&self, id: &str) -> Result<Option<Book>> {
        Ok(self.books.read().await.iter().find(|b| b.id == id).cloned())
    }

    async fn insert(&self, book: &Book) -> Result<()> {
        let mut books = self.books.write().await;

        if books.iter().any(|b| b.id == book.id) {
            return Err(GatewayError::QueryFailed {
                operation: "create the book",
                cause: format!("duplicate key value violates unique constraint: id={}", book.id),
            });
        }

        books.push(book.clone());
        Ok(())
    }

    async fn update(&self, id: &str, fields: &BookFields) -> Result<u64> {
        let mut books = self.books.write().await;

        match books.iter_mut().find(|b| b.id == id) {
            Some(book) => {
                book.apply(fields);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: &str) -> Result<u64> {
        let mut books = self.books.write().await;
        let before = books.len();
        books.retain(|b| b.id != id);
        Ok((before - books.len()) as u64)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
