use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, Query, State,
    },
    handler::Handler,
    http::StatusCode,
    middleware, routing, Json, Router,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::guard::{authorize, RouteGuard};
use crate::models::{AppError, AppState, CustomResponse, Product, ProductPayload, Role};

const MAX_PAGE_SIZE: i64 = 10;

/// Reads are open, writes are guarded per route.
pub fn router(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    let editors = middleware::from_fn_with_state(RouteGuard::new(state, Role::EDITORS), authorize);
    let admins = middleware::from_fn_with_state(RouteGuard::new(state, Role::ADMINS), authorize);

    Router::new()
        .route("/products", routing::get(list_products))
        .route("/product", routing::post(create_product.layer(editors.clone())))
        .route(
            "/product/{id}",
            routing::get(read_product)
                .put(update_product.layer(editors))
                .delete(delete_product.layer(admins)),
        )
}

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub start: Option<String>,
    pub count: Option<String>,
}

impl ListQuery {
    /// Unparseable values count as zero. `count` outside 1..=10 becomes 10,
    /// a negative `start` becomes 0.
    pub fn window(&self) -> (i64, i64) {
        let parse = |value: &Option<String>| {
            value
                .as_deref()
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(0)
        };
        let mut count = parse(&self.count);
        let mut start = parse(&self.start);
        if !(1..=MAX_PAGE_SIZE).contains(&count) {
            count = MAX_PAGE_SIZE;
        }
        if start < 0 {
            start = 0;
        }
        (start, count)
    }
}

fn product_id(id: Result<Path<i64>, PathRejection>) -> Result<i64, AppError> {
    id.map(|Path(id)| id)
        .map_err(|_| AppError::invalid_product_id())
}

fn product_payload(
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> Result<ProductPayload, AppError> {
    payload
        .map(|Json(payload)| payload)
        .map_err(|_| AppError::invalid_payload())
}

async fn list_products(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<CustomResponse<Vec<Product>>, AppError> {
    let (start, count) = query.window();
    let products = app_state.products.list(start, count).await?;
    debug!("Listed {} products from {}", products.len(), start);
    Ok(CustomResponse::api(StatusCode::OK, products))
}

async fn read_product(
    State(app_state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<CustomResponse<Product>, AppError> {
    let id = product_id(id)?;
    let product = app_state
        .products
        .get(id)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;
    Ok(CustomResponse::api(StatusCode::OK, product))
}

async fn create_product(
    State(app_state): State<Arc<AppState>>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> Result<CustomResponse<Product>, AppError> {
    let payload = product_payload(payload)?;
    let product = app_state.products.create(payload).await?;
    debug!("Product created: {:?}", product);
    Ok(CustomResponse::api(StatusCode::CREATED, product))
}

async fn update_product(
    State(app_state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ProductPayload>, JsonRejection>,
) -> Result<CustomResponse<Product>, AppError> {
    let id = product_id(id)?;
    let payload = product_payload(payload)?;
    let product = app_state
        .products
        .update(id, payload)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;
    debug!("Product updated: {:?}", product);
    Ok(CustomResponse::api(StatusCode::OK, product))
}

async fn delete_product(
    State(app_state): State<Arc<AppState>>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<CustomResponse<Value>, AppError> {
    let id = product_id(id)?;
    app_state.products.delete(id).await?;
    debug!("Product {} deleted", id);
    Ok(CustomResponse::api(
        StatusCode::OK,
        serde_json::json!({ "result": "success" }),
    ))
}
