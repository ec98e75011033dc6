use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::models::{Product, ProductPayload};

/// Storage capability consumed by the product routes
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn list(&self, start: i64, count: i64) -> sqlx::Result<Vec<Product>>;
    async fn get(&self, id: i64) -> sqlx::Result<Option<Product>>;
    async fn create(&self, payload: ProductPayload) -> sqlx::Result<Product>;
    /// Returns `None` when no product has this id
    async fn update(&self, id: i64, payload: ProductPayload) -> sqlx::Result<Option<Product>>;
    async fn delete(&self, id: i64) -> sqlx::Result<()>;
    async fn ping(&self) -> sqlx::Result<()>;
}

pub struct SqliteProducts {
    pool: SqlitePool,
}

impl SqliteProducts {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for SqliteProducts {
    async fn list(&self, start: i64, count: i64) -> sqlx::Result<Vec<Product>> {
        Product::read_page(&self.pool, start, count).await
    }

    async fn get(&self, id: i64) -> sqlx::Result<Option<Product>> {
        Product::read(&self.pool, id).await
    }

    async fn create(&self, payload: ProductPayload) -> sqlx::Result<Product> {
        Product::create(&self.pool, payload).await
    }

    async fn update(&self, id: i64, payload: ProductPayload) -> sqlx::Result<Option<Product>> {
        Product::update(&self.pool, id, payload).await
    }

    async fn delete(&self, id: i64) -> sqlx::Result<()> {
        Product::delete(&self.pool, id).await
    }

    async fn ping(&self) -> sqlx::Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
