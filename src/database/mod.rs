//! # ماژول دیتابیس (Persistent Store)
//!
//! این ماژول فروشگاه key-value برنامه رو مدیریت میکنه.
//!
//! ## مدل ذخیره‌سازی
//!
//! همه‌ی داده‌ها به شکل collectionهای JSON زیر keyهای اسمی نگهداری میشن
//! (سبد خرید، سفارش‌ها، تاریخچه تولید، کاربرها، کاتالوگ). قرارداد ساده‌ست:
//! - هر نوشتن = serialize به JSON و ذخیره زیر یک key
//! - هر خوندن = parse، و در صورت خرابی → collection خالی
//! - هیچ تراکنشی بین keyها وجود نداره
//!
//! ## مفاهیم Rust:
//! - **Arc<T>**: Reference Counting برای اشتراک pool بین threads
//! - **async/await**: برنامه‌نویسی غیرهمزمان
//! - Repository Pattern: جداسازی لایه داده از منطق

mod store;
mod repository;

pub use store::*;
pub use repository::*;

use std::sync::Arc;

use sqlx::{
    migrate::Migrator,
    sqlite::{SqlitePool, SqlitePoolOptions},
};

use crate::error::Result;

// مسیر migration‌ها
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

// =====================================
// Database Connection
// =====================================
/// اتصال به دیتابیس با Connection Pool
///
/// # مفاهیم:
/// - `Arc<SqlitePool>`: Reference counting برای thread-safe sharing
/// - هر clone فقط counter رو زیاد میکنه، داده کپی نمیشه
#[derive(Debug, Clone)]
pub struct Database {
    /// Connection pool
    pool: Arc<SqlitePool>,
}

impl Database {
    /// اتصال به دیتابیس
    ///
    /// # Arguments
    /// * `database_url` - آدرس دیتابیس (مثلا `sqlite://data/couplet_shop.db`)
    ///
    /// # Errors
    /// خطا برمیگردونه اگه اتصال موفق نباشه
    pub async fn connect(database_url: impl AsRef<str>) -> Result<Self> {
        // ساخت پوشه data اگه وجود نداره
        let url = database_url.as_ref();
        if url.starts_with("sqlite://") {
            if let Some(path) = url.strip_prefix("sqlite://") {
                // حذف query parameters
                let path = path.split('?').next().unwrap_or(path);
                if let Some(parent) = std::path::Path::new(path).parent() {
                    std::fs::create_dir_all(parent)?;
                }
            }
        }

        // ساخت connection pool
        let pool = SqlitePoolOptions::new()
            .max_connections(10)
            .min_connections(1)
            .acquire_timeout(std::time::Duration::from_secs(5))
            .idle_timeout(std::time::Duration::from_secs(600))
            .connect(url)
            .await?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// اجرای migration‌ها
    pub async fn migrate(&self) -> Result<()> {
        MIGRATOR.run(&*self.pool).await?;
        Ok(())
    }

    /// دسترسی به pool
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// بررسی سلامت دیتابیس
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&*self.pool).await?;
        Ok(())
    }

    /// ساخت دیتابیس in-memory
    ///
    /// برای تست‌ها - :memory: یه دیتابیس موقت در RAM میسازه.
    /// max_connections باید 1 باشه وگرنه هر اتصال دیتابیس جدا میبینه.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(":memory:")
            .await?;

        let db = Self {
            pool: Arc::new(pool),
        };

        db.migrate().await?;
        Ok(db)
    }
}
