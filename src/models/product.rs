use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
}

/// Body accepted by create and update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPayload {
    pub name: String,
    pub price: f64,
}

impl Product {
    pub async fn read(pool: &sqlx::SqlitePool, id: i64) -> sqlx::Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT id, name, price FROM products WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn read_page(
        pool: &sqlx::SqlitePool,
        start: i64,
        count: i64,
    ) -> sqlx::Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT id, name, price FROM products ORDER BY id LIMIT ? OFFSET ?",
        )
        .bind(count)
        .bind(start)
        .fetch_all(pool)
        .await
    }

    pub async fn create(pool: &sqlx::SqlitePool, payload: ProductPayload) -> sqlx::Result<Self> {
        let sql = "INSERT INTO products (name, price) VALUES (?, ?) RETURNING id, name, price";
        sqlx::query_as::<_, Self>(sql)
            .bind(&payload.name)
            .bind(payload.price)
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &sqlx::SqlitePool,
        id: i64,
        payload: ProductPayload,
    ) -> sqlx::Result<Option<Self>> {
        let sql = "UPDATE products SET name = ?, price = ? WHERE id = ? RETURNING id, name, price";
        sqlx::query_as::<_, Self>(sql)
            .bind(&payload.name)
            .bind(payload.price)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &sqlx::SqlitePool, id: i64) -> sqlx::Result<()> {
        sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
