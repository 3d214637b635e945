use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::json;

use catalog_http::{
    error::AppError,
    extract::{AppJson, AppPath, AppQuery},
};
use catalog_kernel::settings::CatalogSettings;

use super::models::{Product, ProductId, ProductRequest};
use super::page::Page;
use super::service::{ProductError, ProductService};
use super::validation::{FieldError, ListQuery, PageQuery};

/// Shared state of the product routes
#[derive(Clone)]
pub struct ProductsState {
    pub service: Arc<ProductService>,
    pub catalog: CatalogSettings,
}

impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound { .. } => AppError::not_found(err.to_string()),
            ProductError::Storage(source) => AppError::Internal(source),
        }
    }
}

fn validation_failed(errors: Vec<FieldError>) -> AppError {
    let details = errors
        .into_iter()
        .map(|e| json!({ "field": e.field, "message": e.message }))
        .collect();
    AppError::validation(details, "Validation error")
}

pub fn router(state: ProductsState) -> Router {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route("/search", get(list_products))
        .route("/all", get(list_all_products))
        .route("/paginated", get(list_paginated))
        .route("/health", get(health_check))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "products module is healthy"
}

/// Filtered, paginated listing
async fn list_products(
    State(state): State<ProductsState>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<Page<Product>>, AppError> {
    let request = query
        .page_request(&state.catalog)
        .map_err(validation_failed)?;
    let page = state
        .service
        .filter_and_list_paginated(&query.filter(), request)
        .await?;
    Ok(Json(page))
}

/// Filtered listing without pagination
async fn list_all_products(
    State(state): State<ProductsState>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<Vec<Product>>, AppError> {
    let products = state.service.filter_and_list(&query.filter()).await?;
    Ok(Json(products))
}

/// Unfiltered paginated listing
async fn list_paginated(
    State(state): State<ProductsState>,
    AppQuery(query): AppQuery<PageQuery>,
) -> Result<Json<Page<Product>>, AppError> {
    let request = query
        .page_request(&state.catalog)
        .map_err(validation_failed)?;
    Ok(Json(state.service.list_all_paginated(request).await?))
}

async fn create_product(
    State(state): State<ProductsState>,
    AppJson(request): AppJson<ProductRequest>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let input = request.validate().map_err(validation_failed)?;
    let product = state.service.create(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

async fn get_product(
    State(state): State<ProductsState>,
    AppPath(id): AppPath<ProductId>,
) -> Result<Json<Product>, AppError> {
    Ok(Json(state.service.find_by_id(id).await?))
}

async fn update_product(
    State(state): State<ProductsState>,
    AppPath(id): AppPath<ProductId>,
    AppJson(request): AppJson<ProductRequest>,
) -> Result<Json<Product>, AppError> {
    let input = request.validate().map_err(validation_failed)?;
    Ok(Json(state.service.update(id, input).await?))
}

async fn delete_product(
    State(state): State<ProductsState>,
    AppPath(id): AppPath<ProductId>,
) -> Result<StatusCode, AppError> {
    state.service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
