//! HTTP handlers for the shopping cart.
//!
//! Every response carries the full cart plus a `totals` object, so clients
//! never need a follow-up read after a mutation.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use boutique_core::money::CartTotals;
use boutique_core::{CartItemId, ProductId};

use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::models::Cart;
use crate::services::CartService;
use crate::services::cart::compute_totals;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub product_id: ProductId,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

const fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Deserialize)]
pub struct UpdateQuantityRequest {
    pub quantity: i32,
}

/// Cart fields at the top level, computed totals nested under `totals`.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    #[serde(flatten)]
    pub cart: Cart,
    pub totals: CartTotals,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        let totals = compute_totals(&cart.items);
        Self { cart, totals }
    }
}

/// `GET /api/cart`
pub async fn show(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<CartResponse>, AppError> {
    let cart = CartService::new(state.pool()).get_or_create(user.id).await?;
    Ok(Json(cart.into()))
}

/// `POST /api/cart`
pub async fn add(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<AddItemRequest>,
) -> Result<(StatusCode, Json<CartResponse>), AppError> {
    let cart = CartService::new(state.pool())
        .add_item(user.id, payload.product_id, payload.quantity)
        .await?;

    Ok((StatusCode::CREATED, Json(cart.into())))
}

/// `PUT /api/cart/{itemId}`
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(item_id): Path<CartItemId>,
    Json(payload): Json<UpdateQuantityRequest>,
) -> Result<Json<CartResponse>, AppError> {
    let cart = CartService::new(state.pool())
        .update_item_quantity(user.id, item_id, payload.quantity)
        .await?;

    Ok(Json(cart.into()))
}

/// `DELETE /api/cart/{itemId}`
pub async fn remove(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(item_id): Path<CartItemId>,
) -> Result<Json<CartResponse>, AppError> {
    let cart = CartService::new(state.pool())
        .remove_item(user.id, item_id)
        .await?;

    Ok(Json(cart.into()))
}

/// `DELETE /api/cart`
pub async fn clear(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<CartResponse>, AppError> {
    let cart = CartService::new(state.pool()).clear(user.id).await?;
    Ok(Json(cart.into()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::models::CartItem;
    use boutique_core::{CartId, UserId};
    use chrono::Utc;

    fn cart_with_one_watch() -> Cart {
        Cart {
            id: CartId::new(1),
            user_id: UserId::new(7),
            items: vec![CartItem {
                id: CartItemId::new(10),
                product_id: ProductId::new(3),
                name: "Montre dorée classique".to_string(),
                image: "/assets/montre1.jpg".to_string(),
                price: "199.99".parse().unwrap(),
                quantity: 1,
            }],
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_response_nests_totals_under_their_own_key() {
        let response = CartResponse::from(cart_with_one_watch());
        let json = serde_json::to_value(&response).unwrap();

        let totals = json.get("totals").expect("totals object");
        assert!((totals["subtotal"].as_f64().unwrap() - 199.99).abs() < 1e-9);
        assert!((totals["tax"].as_f64().unwrap() - 20.0).abs() < 1e-9);
        assert!((totals["total"].as_f64().unwrap() - 219.99).abs() < 1e-9);
        assert!(json.get("subtotal").is_none());
    }

    #[test]
    fn test_money_serializes_as_json_numbers() {
        let response = CartResponse::from(cart_with_one_watch());
        let json = serde_json::to_value(&response).unwrap();

        assert!(json["items"][0]["price"].is_number());
        assert!(json["totals"]["total"].is_number());
    }
}
