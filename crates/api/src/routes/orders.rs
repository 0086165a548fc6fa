//! Order route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use tracing::instrument;

use boutique_core::OrderId;

use crate::error::AppError;
use crate::middleware::{CurrentUser, RequireAdmin};
use crate::models::{Order, OrderUser};
use crate::services::OrderService;
use crate::services::orders::{NewOrder, PaymentConfirmation};
use crate::state::AppState;

/// An order with its owning user's details flattened in.
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    #[serde(flatten)]
    pub order: Order,
    pub user: OrderUser,
}

/// `POST /api/orders`
#[instrument(skip_all, fields(user_id = %user.id))]
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<NewOrder>,
) -> Result<(StatusCode, Json<Order>), AppError> {
    let order = OrderService::new(state.pool())
        .create(user.id, &payload)
        .await?;

    tracing::info!(order_id = %order.id, "order placed");

    Ok((StatusCode::CREATED, Json(order)))
}

/// `GET /api/orders` (admin)
pub async fn index(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<Json<Vec<OrderResponse>>, AppError> {
    let orders = OrderService::new(state.pool()).list_all().await?;

    Ok(Json(
        orders
            .into_iter()
            .map(|(order, user)| OrderResponse { order, user })
            .collect(),
    ))
}

/// `GET /api/orders/myorders`
pub async fn my_orders(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Order>>, AppError> {
    let orders = OrderService::new(state.pool()).list_for_user(user.id).await?;
    Ok(Json(orders))
}

/// `GET /api/orders/{id}`
pub async fn show(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(id): Path<OrderId>,
) -> Result<Json<OrderResponse>, AppError> {
    let (order, user) = OrderService::new(state.pool()).get(id).await?;
    Ok(Json(OrderResponse { order, user }))
}

/// `PUT /api/orders/{id}/pay`
///
/// Accepts the payment provider's confirmation payload as-is; no signature
/// verification happens here.
#[instrument(skip_all, fields(order_id = %id))]
pub async fn pay(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(id): Path<OrderId>,
    Json(payload): Json<PaymentConfirmation>,
) -> Result<Json<Order>, AppError> {
    let order = OrderService::new(state.pool()).pay(id, &payload).await?;

    tracing::info!(order_id = %order.id, "order paid");

    Ok(Json(order))
}

/// `PUT /api/orders/{id}/deliver` (admin)
pub async fn deliver(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Path(id): Path<OrderId>,
) -> Result<Json<Order>, AppError> {
    let order = OrderService::new(state.pool()).mark_delivered(id).await?;
    Ok(Json(order))
}
