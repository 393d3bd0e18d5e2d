//! # Couplet Shop Library
//!
//! این کتابخانه backend یک فروشگاه دوبیتی (对联) سفارشی رو ارائه میده:
//! تولید دوبیتی با چند مدل زبانی و fallback به قالب محلی، سبد خرید و
//! سفارش، و کنسول مدیریت.
//!
//! ## ساختار پروژه
//!
//! ```text
//! src/
//! ├── lib.rs          # نقطه ورود کتابخانه - اینجا!
//! ├── main.rs         # نقطه ورود باینری
//! ├── config/         # مدیریت تنظیمات
//! ├── error/          # تعریف خطاها
//! ├── database/       # key-value store و repositoryها
//! ├── models/         # مدل‌های داده
//! ├── generator/      # زنجیره تولید دوبیتی
//! ├── services/       # منطق کسب‌وکار
//! ├── api/            # لایه API
//! └── utils/          # توابع کمکی
//! ```
//!
//! ## مثال استفاده
//!
//! ```rust,no_run
//! use couplet_shop::{config::Config, database::Database};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::from_env().unwrap();
//!     let db = Database::connect(&config.database_url).await.unwrap();
//! }
//! ```

// =====================================
// Module Declarations
// =====================================
// `pub mod` یعنی این ماژول از بیرون کتابخانه قابل دسترسی هست

/// ماژول مدیریت تنظیمات برنامه
pub mod config;

/// ماژول تعریف و مدیریت خطاها
pub mod error;

/// ماژول key-value store و repositoryها
pub mod database;

/// ماژول مدل‌های داده (Domain Models)
pub mod models;

/// ماژول تولید دوبیتی (زنجیره fallback)
pub mod generator;

/// ماژول سرویس‌ها (Business Logic)
pub mod services;

/// ماژول API و HTTP Handlers
pub mod api;

/// ماژول توابع کمکی
pub mod utils;

// =====================================
// Re-exports
// =====================================
// Re-export کردن آیتم‌های پرکاربرد برای دسترسی راحت‌تر

/// نتیجه عملیات با خطای سفارشی ما
pub use error::Result;

/// خطای اصلی برنامه
pub use error::AppError;

// =====================================
// Prelude Module
// =====================================
/// ماژول prelude برای import راحت‌تر آیتم‌های پرکاربرد
///
/// کاربرد:
/// ```rust
/// use couplet_shop::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::database::Database;
    pub use crate::error::{AppError, Result};
    pub use crate::generator::CoupletGenerator;
    pub use crate::models::*;
    pub use crate::services::*;
}
