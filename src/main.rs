//! # Couplet Shop - نقطه ورود برنامه
//!
//! این فایل نقطه شروع اجرای برنامه است.
//! در Rust، `main.rs` برای باینری‌ها و `lib.rs` برای کتابخانه‌ها استفاده میشه.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use couplet_shop::{api::create_router, config::Config, database::Database, error::Result};

/// نقطه ورود اصلی برنامه
///
/// # Errors
/// خطا برمیگردونه اگه:
/// - تنظیمات لود نشن
/// - دیتابیس متصل نشه
/// - سرور استارت نشه
#[tokio::main]
async fn main() -> Result<()> {
    // لود کردن متغیرهای محیطی از فایل .env
    // اگه فایل نباشه اوکیه
    dotenvy::dotenv().ok();

    // راه‌اندازی سیستم لاگینگ
    init_tracing();

    info!("🚀 Starting Couplet Shop Service...");

    // لود کردن تنظیمات
    let config = Config::from_env()?;
    config.validate()?;
    info!("✅ Configuration loaded successfully");

    // اتصال به دیتابیس
    let database = Database::connect(&config.database_url).await?;
    info!("✅ Database connected successfully");

    // اجرای migration‌ها
    database.migrate().await?;
    info!("✅ Database migrations applied");

    // ساخت router با تمام route‌ها و middleware‌ها
    let app = create_router(database, config.clone());

    // آدرس سرور
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("🌐 Server listening on http://{}", addr);

    // ساخت listener و اجرای سرور
    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .await
        .map_err(|e| couplet_shop::error::AppError::Server(e.to_string()))?;

    Ok(())
}

/// راه‌اندازی سیستم tracing برای لاگینگ
///
/// EnvFilter از متغیر RUST_LOG میخونه؛ اگه نبود default استفاده میکنه
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("couplet_shop=debug,tower_http=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .with_level(true)
                .pretty(),
        )
        .init();
}
