//! # Cart Handlers
//!
//! Handler‌های سبد خرید

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    api::extractors::ValidatedJson,
    error::Result,
    models::{AddToCartRequest, ApiResponse, CartItem, NewCartItem},
    services::AppState,
};

// =====================================
// Get Cart
// =====================================
/// محتوای سبد
///
/// # Endpoint
/// `GET /api/cart`
pub async fn get_cart(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<CartItem>>>> {
    let items = state.commerce.cart().await?;

    Ok(Json(ApiResponse::success(items)))
}

// =====================================
// Add to Cart
// =====================================
/// افزودن به سبد
///
/// اندازه و سبک از کاتالوگ resolve میشن و قیمت کل همینجا بسته میشه -
/// تغییر بعدی قیمت کاتالوگ روی این آیتم اثری نداره.
///
/// # Endpoint
/// `POST /api/cart`
pub async fn add_to_cart(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<AddToCartRequest>,
) -> Result<impl IntoResponse> {
    let size = state.catalog.find_size(&request.size_id)?;
    let style = state.catalog.find_active_style(&request.style_id).await?;

    let draft = NewCartItem::new(request.couplet, size, style, request.quantity);
    let item = state.commerce.add_to_cart(draft).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(item))))
}

// =====================================
// Remove / Clear
// =====================================
/// حذف یک آیتم از سبد
///
/// # Endpoint
/// `DELETE /api/cart/:id`
pub async fn remove_item(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> Result<impl IntoResponse> {
    state.commerce.remove_from_cart(&item_id).await?;

    // 204 No Content
    Ok(StatusCode::NO_CONTENT)
}

/// خالی کردن سبد
///
/// # Endpoint
/// `DELETE /api/cart`
pub async fn clear_cart(State(state): State<AppState>) -> Result<impl IntoResponse> {
    state.commerce.clear_cart().await?;

    Ok(StatusCode::NO_CONTENT)
}
