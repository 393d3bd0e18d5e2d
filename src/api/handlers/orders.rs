//! # Order Handlers
//!
//! Handler‌های checkout، سفارش و پرداخت

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tracing::info;

use crate::{
    api::extractors::ValidatedJson,
    error::{OptionExt, Result},
    models::{ApiResponse, CheckoutRequest, Order, PaymentResponse},
    services::AppState,
};

// =====================================
// Checkout
// =====================================
/// ثبت سفارش از سبد فعلی
///
/// اطلاعات ارسال همینجا اعتبارسنجی میشه؛ در صورت خطا هیچ
/// سفارشی ساخته نمیشه.
///
/// # Endpoint
/// `POST /api/orders`
pub async fn checkout(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CheckoutRequest>,
) -> Result<impl IntoResponse> {
    let order = state.commerce.checkout(request.shipping_info).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::success(order))))
}

// =====================================
// List / Get
// =====================================
/// لیست سفارش‌ها - جدیدترین اول
///
/// # Endpoint
/// `GET /api/orders`
pub async fn list_orders(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<Order>>>> {
    let orders = state.commerce.orders().await?;

    Ok(Json(ApiResponse::success(orders)))
}

/// جزئیات یک سفارش
///
/// # Endpoint
/// `GET /api/orders/:id`
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<ApiResponse<Order>>> {
    let order = state
        .commerce
        .find_order(&order_id)
        .await?
        .ok_or_not_found(format!("Order '{}' not found", order_id))?;

    Ok(Json(ApiResponse::success(order)))
}

// =====================================
// Pay
// =====================================
/// شبیه‌سازی پرداخت سفارش
///
/// بعد از پرداخت موفق، سبد خالی میشه (مثل جریان checkout فروشگاه).
///
/// # Endpoint
/// `POST /api/orders/:id/pay`
pub async fn pay_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<ApiResponse<PaymentResponse>>> {
    let paid = state.commerce.simulate_payment(&order_id).await?;

    if !paid {
        return Ok(Json(ApiResponse::success(PaymentResponse {
            paid: false,
            transaction_id: None,
        })));
    }

    // پرداخت موفق → سبد خالی میشه
    state.commerce.clear_cart().await?;

    let transaction_id = state
        .commerce
        .find_order(&order_id)
        .await?
        .and_then(|o| o.transaction_id);

    info!(order_id = %order_id, "Order paid, cart cleared");

    Ok(Json(ApiResponse::success(PaymentResponse {
        paid: true,
        transaction_id,
    })))
}
