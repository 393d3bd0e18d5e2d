//! # Admin Handlers
//!
//! Handler‌های کنسول مدیریت - همه به جز login پشت `AdminAuth`
//!
//! مدیریت کاربرها و تنظیمات پرداخت فقط با نقش admin؛
//! مدیریت محتوا (سبک، محصول، سفارش) برای editor هم بازه.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    api::extractors::{AdminAuth, ValidatedJson},
    error::Result,
    models::{
        AdminUserResponse, ApiResponse, CreateAdminUserRequest, CreateProductRequest,
        CreateStyleRequest, EmptyResponse, LoginRequest, LoginResponse, Order,
        PaymentMethodConfig, Product, StyleImage, UpdateAdminUserRequest, UpdateOrderStatusRequest,
        UpdatePaymentConfigRequest, UpdateProductRequest, UpdateStyleRequest,
    },
    services::AppState,
};

// =====================================
// Auth
// =====================================
/// ورود ادمین
///
/// # Endpoint
/// `POST /api/admin/auth/login`
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>> {
    let response = state.admin.login(request).await?;

    Ok(Json(ApiResponse::success(response)))
}

// =====================================
// Users
// =====================================
/// لیست کاربرهای ادمین
///
/// # Endpoint
/// `GET /api/admin/users`
pub async fn list_users(
    State(state): State<AppState>,
    auth: AdminAuth,
) -> Result<Json<ApiResponse<Vec<AdminUserResponse>>>> {
    auth.require_admin_role()?;

    let users = state.admin.list_users().await?;
    Ok(Json(ApiResponse::success(users)))
}

/// ساخت کاربر ادمین
///
/// # Endpoint
/// `POST /api/admin/users`
pub async fn create_user(
    State(state): State<AppState>,
    auth: AdminAuth,
    ValidatedJson(request): ValidatedJson<CreateAdminUserRequest>,
) -> Result<impl IntoResponse> {
    auth.require_admin_role()?;

    let user = state.admin.create_user(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(user))))
}

/// بروزرسانی کاربر ادمین
///
/// # Endpoint
/// `PUT /api/admin/users/:id`
pub async fn update_user(
    State(state): State<AppState>,
    auth: AdminAuth,
    Path(user_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateAdminUserRequest>,
) -> Result<Json<ApiResponse<AdminUserResponse>>> {
    auth.require_admin_role()?;

    let user = state.admin.update_user(&user_id, request).await?;
    Ok(Json(ApiResponse::success(user)))
}

/// حذف کاربر ادمین
///
/// # Endpoint
/// `DELETE /api/admin/users/:id`
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AdminAuth,
    Path(user_id): Path<String>,
) -> Result<Json<EmptyResponse>> {
    auth.require_admin_role()?;

    state.admin.delete_user(&user_id).await?;
    Ok(Json(EmptyResponse::ok("User deleted")))
}

// =====================================
// Styles
// =====================================
/// لیست همه سبک‌ها (فعال و غیرفعال)
///
/// # Endpoint
/// `GET /api/admin/styles`
pub async fn list_styles(
    State(state): State<AppState>,
    _auth: AdminAuth,
) -> Result<Json<ApiResponse<Vec<StyleImage>>>> {
    let styles = state.catalog.styles().await?;
    Ok(Json(ApiResponse::success(styles)))
}

/// ساخت سبک
///
/// # Endpoint
/// `POST /api/admin/styles`
pub async fn create_style(
    State(state): State<AppState>,
    _auth: AdminAuth,
    ValidatedJson(request): ValidatedJson<CreateStyleRequest>,
) -> Result<impl IntoResponse> {
    let style = state.catalog.create_style(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(style))))
}

/// بروزرسانی سبک
///
/// # Endpoint
/// `PUT /api/admin/styles/:id`
pub async fn update_style(
    State(state): State<AppState>,
    _auth: AdminAuth,
    Path(style_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateStyleRequest>,
) -> Result<Json<ApiResponse<StyleImage>>> {
    let style = state.catalog.update_style(&style_id, request).await?;
    Ok(Json(ApiResponse::success(style)))
}

/// فعال/غیرفعال کردن سبک
///
/// # Endpoint
/// `POST /api/admin/styles/:id/toggle`
pub async fn toggle_style(
    State(state): State<AppState>,
    _auth: AdminAuth,
    Path(style_id): Path<String>,
) -> Result<Json<ApiResponse<StyleImage>>> {
    let style = state.catalog.toggle_style(&style_id).await?;
    Ok(Json(ApiResponse::success(style)))
}

/// حذف سبک
///
/// # Endpoint
/// `DELETE /api/admin/styles/:id`
pub async fn delete_style(
    State(state): State<AppState>,
    _auth: AdminAuth,
    Path(style_id): Path<String>,
) -> Result<Json<EmptyResponse>> {
    state.catalog.delete_style(&style_id).await?;
    Ok(Json(EmptyResponse::ok("Style deleted")))
}

/// دانلود خروجی JSON سبک‌ها
///
/// # Endpoint
/// `GET /api/admin/styles/export`
///
/// # Response
/// فایل JSON با header دانلود و نام فایل تاریخ‌دار
pub async fn export_styles(
    State(state): State<AppState>,
    _auth: AdminAuth,
) -> Result<Response> {
    let export = state.catalog.export_styles().await?;

    let headers = [
        (header::CONTENT_TYPE, "application/json".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", export.filename),
        ),
    ];

    Ok((headers, export.content).into_response())
}

// =====================================
// Products
// =====================================
/// لیست همه محصولات
///
/// # Endpoint
/// `GET /api/admin/products`
pub async fn list_products(
    State(state): State<AppState>,
    _auth: AdminAuth,
) -> Result<Json<ApiResponse<Vec<Product>>>> {
    let products = state.catalog.products().await?;
    Ok(Json(ApiResponse::success(products)))
}

/// ساخت محصول
///
/// # Endpoint
/// `POST /api/admin/products`
pub async fn create_product(
    State(state): State<AppState>,
    _auth: AdminAuth,
    ValidatedJson(request): ValidatedJson<CreateProductRequest>,
) -> Result<impl IntoResponse> {
    let product = state.catalog.create_product(request).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(product))))
}

/// بروزرسانی محصول
///
/// # Endpoint
/// `PUT /api/admin/products/:id`
pub async fn update_product(
    State(state): State<AppState>,
    _auth: AdminAuth,
    Path(product_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateProductRequest>,
) -> Result<Json<ApiResponse<Product>>> {
    let product = state.catalog.update_product(&product_id, request).await?;
    Ok(Json(ApiResponse::success(product)))
}

/// فعال/غیرفعال کردن محصول
///
/// # Endpoint
/// `POST /api/admin/products/:id/toggle`
pub async fn toggle_product(
    State(state): State<AppState>,
    _auth: AdminAuth,
    Path(product_id): Path<String>,
) -> Result<Json<ApiResponse<Product>>> {
    let product = state.catalog.toggle_product(&product_id).await?;
    Ok(Json(ApiResponse::success(product)))
}

/// حذف محصول
///
/// # Endpoint
/// `DELETE /api/admin/products/:id`
pub async fn delete_product(
    State(state): State<AppState>,
    _auth: AdminAuth,
    Path(product_id): Path<String>,
) -> Result<Json<EmptyResponse>> {
    state.catalog.delete_product(&product_id).await?;
    Ok(Json(EmptyResponse::ok("Product deleted")))
}

// =====================================
// Payment Configs
// =====================================
/// لیست تنظیمات پرداخت
///
/// # Endpoint
/// `GET /api/admin/payment-configs`
pub async fn list_payment_configs(
    State(state): State<AppState>,
    auth: AdminAuth,
) -> Result<Json<ApiResponse<Vec<PaymentMethodConfig>>>> {
    auth.require_admin_role()?;

    let configs = state.catalog.payment_configs().await?;
    Ok(Json(ApiResponse::success(configs)))
}

/// بروزرسانی تنظیمات یک روش پرداخت
///
/// # Endpoint
/// `PUT /api/admin/payment-configs/:id`
pub async fn update_payment_config(
    State(state): State<AppState>,
    auth: AdminAuth,
    Path(config_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdatePaymentConfigRequest>,
) -> Result<Json<ApiResponse<PaymentMethodConfig>>> {
    auth.require_admin_role()?;

    let config = state
        .catalog
        .update_payment_config(&config_id, request)
        .await?;
    Ok(Json(ApiResponse::success(config)))
}

/// فعال/غیرفعال کردن یک روش پرداخت
///
/// # Endpoint
/// `POST /api/admin/payment-configs/:id/toggle`
pub async fn toggle_payment_config(
    State(state): State<AppState>,
    auth: AdminAuth,
    Path(config_id): Path<String>,
) -> Result<Json<ApiResponse<PaymentMethodConfig>>> {
    auth.require_admin_role()?;

    let config = state.catalog.toggle_payment_config(&config_id).await?;
    Ok(Json(ApiResponse::success(config)))
}

// =====================================
// Orders (admin)
// =====================================
/// تغییر وضعیت سفارش
///
/// # Endpoint
/// `PATCH /api/admin/orders/:id/status`
pub async fn update_order_status(
    State(state): State<AppState>,
    _auth: AdminAuth,
    Path(order_id): Path<String>,
    Json(request): Json<UpdateOrderStatusRequest>,
) -> Result<Json<ApiResponse<Order>>> {
    state
        .commerce
        .update_order_status(&order_id, request.status)
        .await?;

    let order = state
        .commerce
        .find_order(&order_id)
        .await?
        .ok_or_else(|| crate::error::AppError::order_not_found(&order_id))?;

    Ok(Json(ApiResponse::success(order)))
}
