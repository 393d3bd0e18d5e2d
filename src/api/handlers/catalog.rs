//! # Catalog Handlers
//!
//! Handler‌های کاتالوگ فروشگاه - فقط آیتم‌های فعال

use axum::{extract::State, Json};

use crate::{
    error::Result,
    models::{ApiResponse, Product, SizeOption, StyleOption},
    services::AppState,
};

/// اندازه‌های چاپ
///
/// # Endpoint
/// `GET /api/catalog/sizes`
pub async fn sizes(State(state): State<AppState>) -> Json<ApiResponse<Vec<SizeOption>>> {
    Json(ApiResponse::success(state.catalog.size_options()))
}

/// سبک‌های فعال
///
/// # Endpoint
/// `GET /api/catalog/styles`
pub async fn styles(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<StyleOption>>>> {
    let styles = state.catalog.active_styles().await?;

    Ok(Json(ApiResponse::success(styles)))
}

/// محصولات فعال
///
/// # Endpoint
/// `GET /api/catalog/products`
pub async fn products(State(state): State<AppState>) -> Result<Json<ApiResponse<Vec<Product>>>> {
    let products = state.catalog.active_products().await?;

    Ok(Json(ApiResponse::success(products)))
}
