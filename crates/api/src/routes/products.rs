//! HTTP handlers for the product catalog.
//!
//! Reads are public; writes require the admin flag.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use tracing::instrument;

use boutique_core::ProductId;

use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::models::Product;
use crate::services::CatalogService;
use crate::services::catalog::{NewProduct, ProductUpdate};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// `GET /api/products`
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Product>>, AppError> {
    let products = CatalogService::new(state.pool()).list().await?;
    Ok(Json(products))
}

/// `GET /api/products/{id}`
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<Product>, AppError> {
    let product = CatalogService::new(state.pool()).get(id).await?;
    Ok(Json(product))
}

/// `POST /api/products` (admin)
#[instrument(skip(state, _admin, payload), fields(name = %payload.name))]
pub async fn create(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Json(payload): Json<NewProduct>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let product = CatalogService::new(state.pool()).create(&payload).await?;

    tracing::info!(product_id = %product.id, "product created");

    Ok((StatusCode::CREATED, Json(product)))
}

/// `PUT /api/products/{id}` (admin)
pub async fn update(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<ProductId>,
    Json(payload): Json<ProductUpdate>,
) -> Result<Json<Product>, AppError> {
    let product = CatalogService::new(state.pool()).update(id, &payload).await?;
    Ok(Json(product))
}

/// `DELETE /api/products/{id}` (admin)
pub async fn destroy(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<ProductId>,
) -> Result<Json<MessageResponse>, AppError> {
    CatalogService::new(state.pool()).delete(id).await?;

    Ok(Json(MessageResponse {
        message: "Product removed",
    }))
}
