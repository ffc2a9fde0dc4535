//! Product handlers

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use tracing::debug;

use core_kernel::{ProductId, StoreError};
use domain_product::{Product, ProductFilter};

use crate::dto::product::ListProductsQuery;
use crate::handlers::created_response;
use crate::{error::ApiError, AppState};

/// Lists products, optionally filtered by `category` and `active`
pub async fn list_products(
    State(state): State<AppState>,
    query: Result<Query<ListProductsQuery>, QueryRejection>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let Query(query) = query?;
    let Some(store) = state.products.as_ref() else {
        return Ok(Json(Vec::new()));
    };

    let filter = ProductFilter::from(query);
    let products = if filter.is_empty() {
        store.list_products().await?
    } else {
        store.list_products_filtered(&filter).await?
    };

    debug!(count = products.len(), filtered = !filter.is_empty(), "Listed products");
    Ok(Json(products))
}

/// Gets a product by ID
pub async fn get_product(
    State(state): State<AppState>,
    id: Result<Path<ProductId>, PathRejection>,
) -> Result<Json<Product>, ApiError> {
    let Path(id) = id?;
    let Some(store) = state.products.as_ref() else {
        return Err(StoreError::not_found(ProductId::entity(), id).into());
    };

    Ok(Json(store.get_product(id).await?))
}

/// Creates a product
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<Product>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let Json(product) = payload?;
    let Some(store) = state.products.as_ref() else {
        return Ok((StatusCode::CREATED, Json(product)));
    };

    let outcome = store.create_product(product.clone()).await;
    created_response(outcome, product, state.config.mask_create_failures)
}

/// Replaces a product
pub async fn update_product(
    State(state): State<AppState>,
    id: Result<Path<ProductId>, PathRejection>,
    payload: Result<Json<Product>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let Path(id) = id?;
    let Json(product) = payload?;
    let Some(store) = state.products.as_ref() else {
        return Ok(Json(product.with_id(id)));
    };

    Ok(Json(store.update_product(id, product).await?))
}

/// Deletes a product
pub async fn delete_product(
    State(state): State<AppState>,
    id: Result<Path<ProductId>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;
    if let Some(store) = state.products.as_ref() {
        store.delete_product(id).await?;
    }

    Ok(StatusCode::NO_CONTENT)
}
