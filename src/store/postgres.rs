use crate::config::Config;
use crate::error::{GatewayError, Result};
use crate::models::{Book, BookFields};
use crate::store::BookStore;
use async_trait::async_trait;
use deadpool_postgres::{Config as PoolConfig, Object, Pool, Runtime};
use std::time::Duration;
use tokio_postgres::{NoTls, Row};
use tracing::{debug, info};

const SELECT_ALL: &str = "SELECT id, title, author, publishedYear, genre FROM books";

const SELECT_ONE: &str = "SELECT id, title, author, publishedYear, genre FROM books WHERE id = $1";

const INSERT: &str = "
    INSERT INTO books (id, title, author, publishedYear, genre)
    VALUES ($1, $2, $3, $4, $5)
";

const UPDATE: &str = "
    UPDATE books
    SET title = $1, author = $2, publishedYear = $3, genre = $4
    WHERE id = $5
";

const DELETE: &str = "DELETE FROM books WHERE id = $1";

pub struct PgBookStore {
    pool: Pool,
    database: String,
}

impl PgBookStore {
    /// Builds the pool and pings the database once. Any failure here is meant to abort startup.
    pub async fn connect(config: &Config) -> Result<Self> {
        let pool = create_pool(
            &config.database_url,
            config.max_connections,
            config.pool_timeout,
        )?;

        let store = Self {
            pool,
            database: config.database_name().to_string(),
        };

        store.ping().await?;

        info!("Connected to PostgreSQL database {}", store.database);

        Ok(store)
    }

    async fn client(&self) -> Result<Object> {
        self.pool
            .get()
            .await
            .map_err(|e| GatewayError::ConnectionFailed {
                database: self.database.clone(),
                cause: e.to_string(),
            })
    }
}

#[async_trait]
impl BookStore for PgBookStore {
    async fn list(&self) -> Result<Vec<Book>> {
        let client = self.client().await?;

        let rows = client
            .query(SELECT_ALL, &[])
            .await
            .map_err(|e| query_failed("fetch books", e))?;

        debug!("Fetched {} books", rows.len());

        rows.iter()
            .map(|row| book_from_row(row).map_err(|e| query_failed("parse book data", e)))
            .collect()
    }

    async fn get(&self, id: &str) -> Result<Option<Book>> {
        let client = self.client().await?;

        let row = client
            .query_opt(SELECT_ONE, &[&id])
            .await
            .map_err(|e| query_failed("fetch the book", e))?;

        row.as_ref()
            .map(book_from_row)
            .transpose()
            .map_err(|e| query_failed("parse book data", e))
    }

    async fn insert(&self, book: &Book) -> Result<()> {
        let client = self.client().await?;

        client
            .execute(
                INSERT,
                &[
                    &book.id,
                    &book.title,
                    &book.author,
                    &book.published_year,
                    &book.genre,
                ],
            )
            .await
            .map_err(|e| query_failed("create the book", e))?;

        Ok(())
    }

    async fn update(&self, id: &str, fields: &BookFields) -> Result<u64> {
        let client = self.client().await?;

        client
            .execute(
                UPDATE,
                &[
                    &fields.title,
                    &fields.author,
                    &fields.published_year,
                    &fields.genre,
                    &id,
                ],
            )
            .await
            .map_err(|e| query_failed("update the book", e))
    }

    async fn delete(&self, id: &str) -> Result<u64> {
        let client = self.client().await?;

        client
            .execute(DELETE, &[&id])
            .await
            .map_err(|e| query_failed("delete the book", e))
    }

    async fn ping(&self) -> Result<()> {
        let client = self.client().await?;

        // Simple ping query
        client
            .execute("SELECT 1", &[])
            .await
            .map_err(|e| GatewayError::ConnectionFailed {
                database: self.database.clone(),
                cause: format!("Ping failed: {}", e),
            })?;

        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

fn query_failed(operation: &'static str, err: tokio_postgres::Error) -> GatewayError {
    GatewayError::QueryFailed {
        operation,
        cause: err.to_string(),
    }
}

// Nullable columns read back as empty strings.
fn book_from_row(row: &Row) -> std::result::Result<Book, tokio_postgres::Error> {
    let text = |idx: usize| -> std::result::Result<String, tokio_postgres::Error> {
        Ok(row.try_get::<_, Option<String>>(idx)?.unwrap_or_default())
    };

    Ok(Book {
        id: row.try_get(0)?,
        title: text(1)?,
        author: text(2)?,
        published_year: text(3)?,
        genre: text(4)?,
    })
}

fn create_pool(database_url: &str, max_size: u32, timeout: Duration) -> Result<Pool> {
    let mut cfg = PoolConfig::new();
    cfg.url = Some(database_url.to_string());

    cfg.pool = Some(deadpool_postgres::PoolConfig {
        max_size: max_size as usize,
        timeouts: deadpool_postgres::Timeouts {
            wait: Some(timeout),
            create: Some(timeout),
            recycle: Some(timeout),
        },
        ..Default::default()
    });

    cfg.create_pool(Some(Runtime::Tokio1), NoTls)
        .map_err(|e| GatewayError::Internal(format!("Failed to create pool: {}", e)))
}
