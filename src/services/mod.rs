//! # ماژول سرویس‌ها (Business Logic Layer)
//!
//! این ماژول منطق کسب‌وکار برنامه رو پیاده‌سازی میکنه.
//!
//! ## لایه‌بندی معماری
//!
//! ```text
//! ┌─────────────────┐
//! │    API Layer    │  <-- HTTP handlers (axum)
//! ├─────────────────┤
//! │  Service Layer  │  <-- Business logic (اینجا!)
//! ├─────────────────┤
//! │ Repository Layer│  <-- JSON collections
//! ├─────────────────┤
//! │  KV Store (SQLite)
//! └─────────────────┘
//! ```
//!
//! ## مفاهیم Rust:
//! - **Dependency Injection**: store و config تزریق میشن، نه global
//! - **Arc<T>**: اشتراک امن بین threads

mod commerce_service;
mod admin_service;
mod catalog_service;

pub use commerce_service::*;
pub use admin_service::*;
pub use catalog_service::*;

use std::sync::Arc;

use crate::{
    config::Config,
    database::{Database, HistoryRepository, KvStore},
    generator::CoupletGenerator,
};

// =====================================
// Application State
// =====================================
/// وضعیت برنامه که بین همه handlers اشتراک‌گذاری میشه
///
/// # مفاهیم:
/// - `Arc<T>`: Reference counting برای thread-safe sharing
/// - این state در axum با `with_state` تزریق میشه
#[derive(Clone)]
pub struct AppState {
    /// تنظیمات برنامه
    pub config: Arc<Config>,

    /// اتصال دیتابیس - برای health check
    pub db: Database,

    /// سرویس تولید دوبیتی
    pub generator: Arc<CoupletGenerator>,

    /// سرویس سبد و سفارش
    pub commerce: Arc<CommerceService>,

    /// سرویس کاربران ادمین
    pub admin: Arc<AdminService>,

    /// سرویس کاتالوگ
    pub catalog: Arc<CatalogService>,
}

impl AppState {
    /// ساخت AppState جدید
    ///
    /// # مفاهیم:
    /// - Factory method: همه‌ی وابستگی‌ها یکجا wire میشن
    #[must_use]
    pub fn new(db: Database, config: Config) -> Self {
        let store = KvStore::new(db.clone());
        let config = Arc::new(config);

        let generator = Arc::new(CoupletGenerator::new(
            &config.providers,
            HistoryRepository::history(store.clone()),
        ));

        let commerce = Arc::new(CommerceService::new(store.clone()));
        let admin = Arc::new(AdminService::new(store.clone(), config.clone()));
        let catalog = Arc::new(CatalogService::new(store));

        Self {
            config,
            db,
            generator,
            commerce,
            admin,
            catalog,
        }
    }

    /// دسترسی به config
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }
}

// =====================================
// Service Trait
// =====================================
/// Trait پایه برای services
///
/// # مفاهیم:
/// - این یک marker trait هست
/// - همه services باید Send + Sync باشن برای thread-safety
pub trait Service: Send + Sync {}
