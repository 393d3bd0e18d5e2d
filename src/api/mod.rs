//! # لایه API
//!
//! این ماژول HTTP handlers و routing رو مدیریت میکنه.
//!
//! ## مفاهیم Rust + Axum:
//! - **Router**: تعریف مسیرها
//! - **Extractors**: استخراج داده از request
//! - **State**: اشتراک state بین handlers
//! - **Tower**: زیرساخت middleware
//!
//! ## ساختار URL‌ها:
//! - `POST /api/couplets/generate` - تولید دوبیتی
//! - `GET /api/couplets/history` - تاریخچه تولید
//! - `GET|POST|DELETE /api/cart` - سبد خرید
//! - `GET /api/catalog/...` - کاتالوگ فروشگاه
//! - `POST /api/orders` - checkout
//! - `POST /api/orders/:id/pay` - شبیه‌سازی پرداخت
//! - `/api/admin/...` - کنسول مدیریت (JWT)
//! - `GET /health` - Health check

mod handlers;
mod middleware;
mod extractors;

pub use handlers::*;
pub use middleware::*;
pub use extractors::*;

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, patch, post, put},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{config::Config, database::Database, services::AppState};

// =====================================
// Router Builder
// =====================================
/// ساخت Router اصلی برنامه
///
/// # Arguments
/// * `db` - اتصال دیتابیس
/// * `config` - تنظیمات برنامه
pub fn create_router(db: Database, config: Config) -> Router {
    // ساخت AppState
    let state = AppState::new(db, config);

    Router::new()
        // API routes
        .nest("/api", api_routes())
        // Health check
        .route("/health", get(handlers::health::health_check))
        // Middleware‌های سفارشی
        .layer(axum_middleware::from_fn(middleware::request_timing))
        .layer(axum_middleware::from_fn(middleware::request_id))
        // Middleware‌های عمومی
        .layer(
            ServiceBuilder::new()
                // Tracing - لاگ کردن request‌ها
                .layer(TraceLayer::new_for_http())
                // Timeout - حداکثر زمان پردازش
                // سقف بالاتر از مهلت ۳۰ ثانیه‌ای DeepSeek + بقیه زنجیره
                .layer(TimeoutLayer::new(Duration::from_secs(120)))
                // Compression - فشرده‌سازی response
                .layer(CompressionLayer::new())
                // CORS - اجازه دسترسی از فرانت
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        // تزریق state به همه handlers
        .with_state(state)
}

/// Route‌های API
fn api_routes() -> Router<AppState> {
    Router::new()
        // Couplet generation
        .nest("/couplets", couplet_routes())
        // Cart
        .nest("/cart", cart_routes())
        // Catalog (فروشگاه - فقط آیتم‌های فعال)
        .nest("/catalog", catalog_routes())
        // Orders
        .nest("/orders", order_routes())
        // Admin console (JWT)
        .nest("/admin", admin_routes())
}

/// Route‌های تولید دوبیتی
fn couplet_routes() -> Router<AppState> {
    Router::new()
        .route("/generate", post(handlers::couplet::generate))
        .route("/history", get(handlers::couplet::history))
}

/// Route‌های سبد خرید
fn cart_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::cart::get_cart)
                .post(handlers::cart::add_to_cart)
                .delete(handlers::cart::clear_cart),
        )
        .route("/:id", delete(handlers::cart::remove_item))
}

/// Route‌های کاتالوگ فروشگاه
fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/sizes", get(handlers::catalog::sizes))
        .route("/styles", get(handlers::catalog::styles))
        .route("/products", get(handlers::catalog::products))
}

/// Route‌های سفارش
fn order_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::orders::list_orders).post(handlers::orders::checkout),
        )
        .route("/:id", get(handlers::orders::get_order))
        .route("/:id/pay", post(handlers::orders::pay_order))
}

/// Route‌های کنسول مدیریت
fn admin_routes() -> Router<AppState> {
    Router::new()
        // Auth
        .route("/auth/login", post(handlers::admin::login))
        // Users
        .route(
            "/users",
            get(handlers::admin::list_users).post(handlers::admin::create_user),
        )
        .route(
            "/users/:id",
            put(handlers::admin::update_user).delete(handlers::admin::delete_user),
        )
        // Styles
        .route(
            "/styles",
            get(handlers::admin::list_styles).post(handlers::admin::create_style),
        )
        .route("/styles/export", get(handlers::admin::export_styles))
        .route(
            "/styles/:id",
            put(handlers::admin::update_style).delete(handlers::admin::delete_style),
        )
        .route("/styles/:id/toggle", post(handlers::admin::toggle_style))
        // Products
        .route(
            "/products",
            get(handlers::admin::list_products).post(handlers::admin::create_product),
        )
        .route(
            "/products/:id",
            put(handlers::admin::update_product).delete(handlers::admin::delete_product),
        )
        .route(
            "/products/:id/toggle",
            post(handlers::admin::toggle_product),
        )
        // Payment configs
        .route(
            "/payment-configs",
            get(handlers::admin::list_payment_configs),
        )
        .route(
            "/payment-configs/:id",
            put(handlers::admin::update_payment_config),
        )
        .route(
            "/payment-configs/:id/toggle",
            post(handlers::admin::toggle_payment_config),
        )
        // Orders
        .route(
            "/orders/:id/status",
            patch(handlers::admin::update_order_status),
        )
}
